//! HTML fragments for the dashboard panels.
//!
//! Every function here is `render(model) -> fragment`; the webview only swaps
//! the returned markup into place.

use crate::dataset::{parse_timestamp, CountryRecord};
use crate::views::{ChecklistItem, ContinentCount, GlobalStats, TimelineItem};

pub const NO_COUNTRIES_SELECTED: &str = "No countries selected.";
pub const NO_TIMELINE_ITEMS: &str = "No timeline items.";
const MISSING_DATE: &str = "–";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StatsFragment {
    pub countries: String,
    pub videos: String,
    pub first: String,
    pub latest: String,
}

pub fn render_stats(stats: &GlobalStats) -> StatsFragment {
    let date = |value: &Option<String>| {
        value
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| MISSING_DATE.to_string())
    };
    StatsFragment {
        countries: stats.total_countries.to_string(),
        videos: stats.total_videos.to_string(),
        first: date(&stats.first),
        latest: date(&stats.latest),
    }
}

pub fn render_continent_summary(counts: &[ContinentCount]) -> String {
    counts
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="row"><div>{}</div><div><b>{}</b></div></div>"#,
                html_escape(entry.continent),
                entry.count
            )
        })
        .collect()
}

pub fn render_checklist(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|item| {
            let name = html_escape(&item.name);
            format!(
                r#"<label class="country-item"><div class="country-left"><input type="checkbox" data-country="{name}"{checked}/><span>{name}</span></div><span class="country-count">{count}</span></label>"#,
                checked = if item.checked { " checked" } else { "" },
                count = item.count,
            )
        })
        .collect()
}

pub fn render_results(records: &[&CountryRecord]) -> String {
    if records.is_empty() {
        return empty_state(NO_COUNTRIES_SELECTED);
    }

    records
        .iter()
        .map(|record| {
            let videos: String = record
                .videos
                .iter()
                .map(|video| {
                    format!(
                        r#"<div class="video">{}<div class="muted">{}</div></div>"#,
                        video_link(&video.url, &video.title),
                        html_escape(&format_date(&video.published_at))
                    )
                })
                .collect();
            let count = record.videos.len();
            format!(
                r#"<div class="country-block"><h3>{} <small>{} video{}</small></h3>{}</div>"#,
                html_escape(&record.country),
                count,
                if count == 1 { "" } else { "s" },
                videos
            )
        })
        .collect()
}

pub fn render_timeline(items: &[TimelineItem<'_>]) -> String {
    if items.is_empty() {
        return empty_state(NO_TIMELINE_ITEMS);
    }

    items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="tl-item"><div class="date">{}</div><div><b>{}</b></div>{}</div>"#,
                html_escape(&format_date(&item.video.published_at)),
                html_escape(item.country),
                video_link(&item.video.url, &item.video.title)
            )
        })
        .collect()
}

/// `Aug 1, 2025`; unparseable input is shown as-is.
pub fn format_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|instant| instant.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn video_link(url: &str, title: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
        html_escape(url),
        html_escape(title)
    )
}

fn empty_state(message: &str) -> String {
    format!(r#"<p class="muted">{message}</p>"#)
}
