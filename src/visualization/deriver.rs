//! @ai:module:intent Compute chart data from the canonical report
//! @ai:module:layer application
//! @ai:module:public_api SeriesDeriver, SeriesDeriverTrait
//! @ai:module:stateless true

use crate::model::{PlatformPresence, Report, SearchTarget, Timeline};
use crate::visualization::series::{ChartKind, ChartSeries};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;

/// @ai:intent Trait for chart series derivation
pub trait SeriesDeriverTrait: Send + Sync {
    /// @ai:intent Derive presence then activity series, omitting those without data
    fn derive(&self, report: &Report) -> Vec<ChartSeries>;
}

/// @ai:intent Derives chart series from a report
pub struct SeriesDeriver {
    date_regex: Regex,
}

impl SeriesDeriver {
    /// @ai:intent Create a new series deriver
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            date_regex: Regex::new(r"^\s*(\d{4}-\d{2}-\d{2})").expect("Invalid regex"),
        }
    }

    /// @ai:intent Claimed platforms first, ties kept in source order
    /// @ai:effects pure
    fn presence_series(target: &SearchTarget, presence: &PlatformPresence) -> Option<ChartSeries> {
        if presence.platforms.is_empty() {
            return None;
        }

        let mut points: Vec<(String, u64)> = presence
            .platforms
            .iter()
            .map(|p| (p.name.clone(), u64::from(p.status.claimed)))
            .collect();

        // sort_by is stable
        points.sort_by(|a, b| b.1.cmp(&a.1));

        Some(ChartSeries {
            kind: ChartKind::PlatformPresence,
            label: ChartKind::PlatformPresence.title(target),
            points,
        })
    }

    /// @ai:intent Posts per calendar day, ascending, only days with posts
    /// @ai:effects pure
    fn activity_series(&self, target: &SearchTarget, timeline: &Timeline) -> Option<ChartSeries> {
        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        for post in &timeline.posts {
            match self.calendar_date(&post.timestamp) {
                Some(date) => *per_day.entry(date).or_insert(0) += 1,
                None => tracing::debug!("Post without a usable date: {:?}", post.timestamp),
            }
        }

        if per_day.is_empty() {
            return None;
        }

        Some(ChartSeries {
            kind: ChartKind::TweetActivity,
            label: ChartKind::TweetActivity.title(target),
            points: per_day
                .into_iter()
                .map(|(date, count)| (date.format("%Y-%m-%d").to_string(), count))
                .collect(),
        })
    }

    /// @ai:intent Date part of a post timestamp
    /// @ai:effects pure
    fn calendar_date(&self, timestamp: &str) -> Option<NaiveDate> {
        let cap = self.date_regex.captures(timestamp)?;
        NaiveDate::parse_from_str(cap.get(1)?.as_str(), "%Y-%m-%d").ok()
    }
}

impl Default for SeriesDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesDeriverTrait for SeriesDeriver {
    /// @ai:intent Derive all chart series for a report
    /// @ai:effects pure
    fn derive(&self, report: &Report) -> Vec<ChartSeries> {
        let presence = report
            .presence()
            .and_then(|p| Self::presence_series(&report.target, p));
        let activity = report
            .timeline()
            .and_then(|t| self.activity_series(&report.target, t));

        presence.into_iter().chain(activity).collect()
    }
}
