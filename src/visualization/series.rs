//! @ai:module:intent Chart series derived from the canonical report
//! @ai:module:layer domain
//! @ai:module:public_api ChartKind, ChartSeries
//! @ai:module:stateless true

use crate::model::SearchTarget;
use serde::{Deserialize, Serialize};

/// @ai:intent Which chart a series feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bar chart, one bar per platform, 1 when claimed
    PlatformPresence,
    /// Line chart of posts per calendar day
    TweetActivity,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::PlatformPresence => "platform_presence",
            ChartKind::TweetActivity => "tweet_activity",
        }
    }

    /// @ai:intent Image filename for a target
    /// @ai:effects pure
    pub fn file_name(&self, target: &SearchTarget) -> String {
        format!("{}_{}.png", target.as_str(), self.as_str())
    }

    pub fn title(&self, target: &SearchTarget) -> String {
        match self {
            ChartKind::PlatformPresence => format!("Platform Presence for {}", target),
            ChartKind::TweetActivity => format!("Tweet Activity for {}", target),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Ordered (category, value) points for one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub label: String,
    pub points: Vec<(String, u64)>,
}

impl ChartSeries {
    /// @ai:intent Largest value in the series, zero when empty
    /// @ai:effects pure
    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|(_, v)| *v).max().unwrap_or(0)
    }
}
