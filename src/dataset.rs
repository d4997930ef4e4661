use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};

pub const UNKNOWN_CONTINENT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    pub title: String,
    pub url: String,
    pub published_at: String,
}

impl VideoEntry {
    /// Parsed publish instant, `None` when the source text is not a timestamp.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default)]
    pub videos: Vec<VideoEntry>,
}

impl CountryRecord {
    pub fn continent_or_unknown(&self) -> &str {
        self.continent
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_CONTINENT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySummary {
    pub name: String,
    pub continent: String,
    pub count: usize,
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Loaded dataset after normalization. Never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CountryRecord>,
    summaries: Vec<CountrySummary>,
}

impl Catalog {
    pub fn from_json(bytes: &[u8]) -> AppResult<Self> {
        let records: Vec<CountryRecord> = serde_json::from_slice(bytes)
            .map_err(|err| AppError::Parse(format!("invalid dataset: {err}")))?;
        Ok(Self::normalize(records))
    }

    /// Sorts every video list chronologically and derives the A-Z summaries.
    pub fn normalize(mut records: Vec<CountryRecord>) -> Self {
        for record in &mut records {
            sort_chronologically(&mut record.videos, |video| video);
        }

        let mut summaries: Vec<CountrySummary> = records
            .iter()
            .map(|record| CountrySummary {
                name: record.country.clone(),
                continent: record.continent_or_unknown().to_string(),
                count: record.videos.len(),
                first: record.videos.first().map(|v| v.published_at.clone()),
                last: record.videos.last().map(|v| v.published_at.clone()),
            })
            .collect();
        summaries.sort_by(|a, b| compare_names(&a.name, &b.name));

        debug!(
            countries = records.len(),
            videos = summaries.iter().map(|s| s.count).sum::<usize>(),
            "normalized dataset"
        );
        Self { records, summaries }
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn summaries(&self) -> &[CountrySummary] {
        &self.summaries
    }

    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.country.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Approximates a locale compare: case-folded first, exact text breaks ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable ascending sort by publish instant. Unparseable timestamps sort first.
pub fn sort_chronologically<T>(items: &mut [T], video: impl Fn(&T) -> &VideoEntry) {
    items.sort_by_cached_key(|item| video(item).published());
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"country": "Japan", "continent": "Asia", "videos": [
            {"title": "Tokyo", "url": "u2", "publishedAt": "2025-09-03T10:00:00Z"},
            {"title": "Osaka", "url": "u3", "publishedAt": "2025-08-15T10:00:00+09:00"}
        ]},
        {"country": "brazil", "continent": "South America", "videos": [
            {"title": "Rio", "url": "u1", "publishedAt": "2025-08-01T20:56:00Z"}
        ]},
        {"country": "Chad", "videos": []}
    ]"#;

    #[test]
    fn sorts_videos_and_summaries() {
        let catalog = Catalog::from_json(SAMPLE.as_bytes()).unwrap();
        let japan = &catalog.records()[0];
        assert_eq!(japan.videos[0].title, "Osaka");
        assert_eq!(japan.videos[1].title, "Tokyo");
        for record in catalog.records() {
            for pair in record.videos.windows(2) {
                assert!(pair[0].published() <= pair[1].published());
            }
        }

        let names: Vec<_> = catalog.summaries().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["brazil", "Chad", "Japan"]);
    }

    #[test]
    fn country_without_videos_has_no_dates() {
        let catalog = Catalog::from_json(SAMPLE.as_bytes()).unwrap();
        let chad = catalog
            .summaries()
            .iter()
            .find(|s| s.name == "Chad")
            .unwrap();
        assert_eq!(chad.count, 0);
        assert_eq!(chad.continent, UNKNOWN_CONTINENT);
        assert!(chad.first.is_none());
        assert!(chad.last.is_none());
    }

    #[test]
    fn unparseable_timestamps_sort_first() {
        let mut videos = vec![
            VideoEntry {
                title: "ok".into(),
                url: "u".into(),
                published_at: "2024-01-02".into(),
            },
            VideoEntry {
                title: "bad".into(),
                url: "u".into(),
                published_at: "yesterday".into(),
            },
        ];
        sort_chronologically(&mut videos, |v| v);
        assert_eq!(videos[0].title, "bad");
        assert!(videos[1].published().is_some());
    }

    #[test]
    fn rejects_non_array_dataset() {
        let err = Catalog::from_json(br#"{"country": "Peru"}"#).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
