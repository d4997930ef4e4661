//! Pure derivations over the catalog and the current selection.

use serde::Serialize;

use crate::dataset::{compare_names, sort_chronologically, Catalog, CountryRecord, VideoEntry};
use crate::selection::SelectionStore;

pub const CONTINENT_ORDER: [&str; 8] = [
    "Africa",
    "Antarctica",
    "Asia",
    "Europe",
    "North America",
    "South America",
    "Oceania",
    "Unknown",
];

/// Whole-dataset figures; independent of the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub total_countries: usize,
    pub total_videos: usize,
    pub first: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinentCount {
    pub continent: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub name: String,
    pub count: usize,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem<'a> {
    pub country: &'a str,
    pub video: &'a VideoEntry,
}

/// `first` and `latest` only consider videos whose timestamp parses.
pub fn global_stats(catalog: &Catalog) -> GlobalStats {
    let dated: Vec<_> = catalog
        .records()
        .iter()
        .flat_map(|record| record.videos.iter())
        .filter_map(|video| video.published().map(|at| (at, video)))
        .collect();

    GlobalStats {
        total_countries: catalog.len(),
        total_videos: catalog.summaries().iter().map(|s| s.count).sum(),
        first: dated
            .iter()
            .min_by_key(|(at, _)| *at)
            .map(|(_, video)| video.published_at.clone()),
        latest: dated
            .iter()
            .max_by_key(|(at, _)| *at)
            .map(|(_, video)| video.published_at.clone()),
    }
}

/// Countries per continent in display order, zero counts omitted.
///
/// Continent names outside [`CONTINENT_ORDER`] are counted as `Unknown`.
pub fn continent_summary(catalog: &Catalog) -> Vec<ContinentCount> {
    let mut counts = [0_usize; CONTINENT_ORDER.len()];
    let unknown = CONTINENT_ORDER.len() - 1;
    for summary in catalog.summaries() {
        let slot = CONTINENT_ORDER
            .iter()
            .position(|continent| *continent == summary.continent)
            .unwrap_or(unknown);
        counts[slot] += 1;
    }

    CONTINENT_ORDER
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(continent, count)| ContinentCount {
            continent: *continent,
            count,
        })
        .collect()
}

pub fn checklist(catalog: &Catalog, selection: &SelectionStore, search: &str) -> Vec<ChecklistItem> {
    let needle = search.trim().to_lowercase();
    catalog
        .summaries()
        .iter()
        .filter(|summary| summary.name.to_lowercase().contains(&needle))
        .map(|summary| ChecklistItem {
            name: summary.name.clone(),
            count: summary.count,
            checked: selection.contains(&summary.name),
        })
        .collect()
}

/// Selected countries A-Z, videos kept in stored chronological order.
pub fn filtered_results<'a>(
    catalog: &'a Catalog,
    selection: &SelectionStore,
) -> Vec<&'a CountryRecord> {
    let mut selected: Vec<&CountryRecord> = catalog
        .records()
        .iter()
        .filter(|record| selection.contains(&record.country))
        .collect();
    selected.sort_by(|a, b| compare_names(&a.country, &b.country));
    selected
}

/// Every selected video merged across countries by publish date.
pub fn filtered_timeline<'a>(
    catalog: &'a Catalog,
    selection: &SelectionStore,
) -> Vec<TimelineItem<'a>> {
    let mut items: Vec<TimelineItem<'a>> = catalog
        .records()
        .iter()
        .filter(|record| selection.contains(&record.country))
        .flat_map(|record| {
            record.videos.iter().map(move |video| TimelineItem {
                country: record.country.as_str(),
                video,
            })
        })
        .collect();
    sort_chronologically(&mut items, |item| item.video);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Catalog {
        Catalog::from_json(
            br#"[
                {"country": "Brazil", "continent": "South America", "videos": [
                    {"title": "A", "url": "u1", "publishedAt": "2025-08-01T00:00:00Z"}
                ]},
                {"country": "Japan", "continent": "Asia", "videos": []}
            ]"#,
        )
        .unwrap()
    }

    fn wider() -> Catalog {
        Catalog::from_json(
            br#"[
                {"country": "Peru", "continent": "South America", "videos": [
                    {"title": "Lima", "url": "p1", "publishedAt": "2025-03-01T00:00:00Z"},
                    {"title": "Cusco", "url": "p2", "publishedAt": "2025-01-10T00:00:00Z"}
                ]},
                {"country": "Kenya", "continent": "Africa", "videos": [
                    {"title": "Nairobi", "url": "k1", "publishedAt": "2025-02-01T00:00:00Z"}
                ]},
                {"country": "Fiji", "continent": "Australia", "videos": []},
                {"country": "Nowhere", "videos": []}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn scenario_stats_and_checklist() {
        let catalog = scenario();
        let selection = SelectionStore::new(&catalog);

        let stats = global_stats(&catalog);
        assert_eq!(stats.total_countries, 2);
        assert_eq!(stats.total_videos, 1);
        assert_eq!(stats.first.as_deref(), Some("2025-08-01T00:00:00Z"));
        assert_eq!(stats.latest, stats.first);

        let continents = continent_summary(&catalog);
        assert_eq!(
            continents,
            vec![
                ContinentCount { continent: "Asia", count: 1 },
                ContinentCount { continent: "South America", count: 1 },
            ]
        );

        let items = checklist(&catalog, &selection, "");
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].name.as_str(), items[0].count), ("Brazil", 1));
        assert_eq!((items[1].name.as_str(), items[1].count), ("Japan", 0));
        assert!(items.iter().all(|item| item.checked));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = scenario();
        let selection = SelectionStore::new(&catalog);
        let items = checklist(&catalog, &selection, "  jAp ");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Japan");
    }

    #[test]
    fn total_videos_ignores_selection() {
        let catalog = wider();
        let mut selection = SelectionStore::new(&catalog);
        selection.clear();
        let stats = global_stats(&catalog);
        let expected: usize = catalog.records().iter().map(|r| r.videos.len()).sum();
        assert_eq!(stats.total_videos, expected);
        assert_eq!(stats.first.as_deref(), Some("2025-01-10T00:00:00Z"));
        assert_eq!(stats.latest.as_deref(), Some("2025-03-01T00:00:00Z"));
    }

    #[test]
    fn date_range_skips_unparseable_timestamps() {
        let catalog = Catalog::from_json(
            br#"[
                {"country": "Chile", "videos": [
                    {"title": "Blank", "url": "c1", "publishedAt": ""},
                    {"title": "Santiago", "url": "c2", "publishedAt": "2024-11-05T00:00:00Z"},
                    {"title": "Soon", "url": "c3", "publishedAt": "coming soon"}
                ]}
            ]"#,
        )
        .unwrap();
        let stats = global_stats(&catalog);
        assert_eq!(stats.total_videos, 3);
        assert_eq!(stats.first.as_deref(), Some("2024-11-05T00:00:00Z"));
        assert_eq!(stats.latest.as_deref(), Some("2024-11-05T00:00:00Z"));

        let undated = Catalog::from_json(
            br#"[{"country": "Chile", "videos": [{"title": "Blank", "url": "c1", "publishedAt": ""}]}]"#,
        )
        .unwrap();
        let stats = global_stats(&undated);
        assert_eq!(stats.total_videos, 1);
        assert_eq!((stats.first, stats.latest), (None, None));
    }

    #[test]
    fn continent_counts_cover_every_country() {
        let catalog = wider();
        let continents = continent_summary(&catalog);
        let total: usize = continents.iter().map(|c| c.count).sum();
        assert_eq!(total, catalog.len());
        assert!(continents.iter().all(|c| c.count > 0));
        assert_eq!(continents.last().unwrap().continent, "Unknown");
        assert_eq!(continents.last().unwrap().count, 2);
    }

    #[test]
    fn results_follow_selection() {
        let catalog = wider();
        let mut selection = SelectionStore::new(&catalog);
        let all: Vec<_> = filtered_results(&catalog, &selection)
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(all, vec!["Fiji", "Kenya", "Nowhere", "Peru"]);

        selection.clear();
        assert!(filtered_results(&catalog, &selection).is_empty());
        selection.toggle("Peru");
        let only = filtered_results(&catalog, &selection);
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].videos[0].title, "Cusco");
    }

    #[test]
    fn timeline_merges_countries_chronologically() {
        let catalog = wider();
        let selection = SelectionStore::new(&catalog);
        let titles: Vec<_> = filtered_timeline(&catalog, &selection)
            .iter()
            .map(|item| (item.country, item.video.title.as_str()))
            .collect();
        assert_eq!(
            titles,
            vec![("Peru", "Cusco"), ("Kenya", "Nairobi"), ("Peru", "Lima")]
        );
    }
}
