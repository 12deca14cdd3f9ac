//! @ai:module:intent Normalize raw tool outputs into the canonical report
//! @ai:module:layer application
//! @ai:module:public_api ReportBuilder, ReportBuilderTrait
//! @ai:module:stateless true

use crate::error::{Diagnostics, Warning};
use crate::model::types::{
    PlatformEntry, PlatformPresence, PlatformStatus, Post, ProfileSummary, Report, SearchTarget,
    Timeline, ToolResult,
};
use crate::sources::{RawToolOutput, ToolKind};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Status string the platform-presence tool uses for an existing account.
const CLAIMED_STATUS: &str = "Claimed";

/// @ai:intent Trait for report assembly
pub trait ReportBuilderTrait: Send + Sync {
    /// @ai:intent Build a report from whatever tool outputs were loaded
    fn build(
        &self,
        target: &SearchTarget,
        generated_at: DateTime<Utc>,
        outputs: Vec<RawToolOutput>,
        diagnostics: &mut Diagnostics,
    ) -> Report;
}

/// Raw platform entry as written by the presence tool.
#[derive(Debug, Deserialize)]
struct RawPlatform {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Raw timeline record; only the post fields.
#[derive(Debug, Default, Deserialize)]
struct RawPost {
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    tweet: Option<Value>,
    #[serde(default)]
    likes_count: Option<Count>,
    #[serde(default)]
    retweets_count: Option<Count>,
}

/// Raw timeline record; only the profile fields.
#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    username: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    bio: Option<Value>,
    #[serde(default)]
    user_id: Option<Value>,
}

/// Counters show up as numbers or numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u64),
    Text(String),
    Other(Value),
}

impl Count {
    fn value(self) -> u64 {
        match self {
            Count::Number(n) => n,
            Count::Text(text) => text.trim().parse().unwrap_or(0),
            Count::Other(_) => 0,
        }
    }
}

/// @ai:intent Assembles the canonical report from raw tool outputs
pub struct ReportBuilder;

impl ReportBuilder {
    /// @ai:intent Create a new report builder
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Convert presence entries, skipping entries that are not objects
    /// @ai:effects pure
    fn normalize_presence(
        raw: Map<String, Value>,
        diagnostics: &mut Diagnostics,
    ) -> PlatformPresence {
        let mut platforms = Vec::with_capacity(raw.len());

        for (name, value) in raw {
            match serde_json::from_value::<RawPlatform>(value) {
                Ok(entry) => platforms.push(PlatformEntry {
                    name,
                    status: PlatformStatus {
                        claimed: entry.status.as_deref() == Some(CLAIMED_STATUS),
                        url: entry.url.unwrap_or_default(),
                    },
                }),
                Err(e) => diagnostics.record(Warning::MalformedRecord {
                    tool: ToolKind::PlatformPresence,
                    record: name,
                    message: e.to_string(),
                }),
            }
        }

        PlatformPresence { platforms }
    }

    /// @ai:intent Convert timeline records into posts in source order
    /// @ai:effects pure
    fn normalize_timeline(records: Vec<Value>, diagnostics: &mut Diagnostics) -> Timeline {
        let profile = records.first().and_then(Self::profile_from);
        let mut posts = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            if !record.is_object() {
                diagnostics.record(Warning::MalformedRecord {
                    tool: ToolKind::SocialTimeline,
                    record: format!("#{}", index + 1),
                    message: format!("expected a JSON object, found {}", record),
                });
                continue;
            }

            let raw = RawPost::deserialize(&record).unwrap_or_default();
            posts.push(Post {
                timestamp: text_of(raw.date),
                text: text_of(raw.tweet),
                like_count: raw.likes_count.map(Count::value).unwrap_or(0),
                retweet_count: raw.retweets_count.map(Count::value).unwrap_or(0),
            });
        }

        Timeline { profile, posts }
    }

    /// @ai:intent Lift profile fields from a post record, defaulting absent ones
    /// @ai:effects pure
    fn profile_from(record: &Value) -> Option<ProfileSummary> {
        if !record.is_object() {
            return None;
        }

        let raw = RawProfile::deserialize(record).unwrap_or_default();

        Some(ProfileSummary {
            handle: text_of(raw.username),
            display_name: text_of(raw.name),
            bio: text_of(raw.bio),
            id: number_of(raw.user_id),
        })
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent String form of a scalar, empty for anything else
/// @ai:effects pure
fn text_of(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// @ai:intent Unsigned form of a number or numeric string, zero otherwise
/// @ai:effects pure
fn number_of(value: Option<Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

impl ReportBuilderTrait for ReportBuilder {
    /// @ai:intent Build a report; never fails, absent tools are simply missing
    /// @ai:effects pure
    fn build(
        &self,
        target: &SearchTarget,
        generated_at: DateTime<Utc>,
        outputs: Vec<RawToolOutput>,
        diagnostics: &mut Diagnostics,
    ) -> Report {
        let mut report = Report::new(target.clone(), generated_at);

        for output in outputs {
            let result = match output {
                RawToolOutput::PlatformPresence(raw) => {
                    ToolResult::PlatformPresence(Self::normalize_presence(raw, diagnostics))
                }
                RawToolOutput::SocialTimeline(records) => {
                    ToolResult::SocialTimeline(Self::normalize_timeline(records, diagnostics))
                }
                RawToolOutput::ProfileMetadata(raw) => ToolResult::ProfileMetadata(raw),
            };
            report.tools.insert(result.tool(), result);
        }

        tracing::info!(
            "Built report for {} with {} tool result(s)",
            target,
            report.tools.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build(outputs: Vec<RawToolOutput>) -> (Report, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let report = ReportBuilder::new().build(
            &SearchTarget::new("alice").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
            outputs,
            &mut diagnostics,
        );
        (report, diagnostics)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_empty_outputs_still_build_report() {
        let (report, diagnostics) = build(vec![]);
        assert!(report.tools.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_presence_status_maps_to_claimed() {
        let raw = object(json!({
            "github": {"status": "Claimed", "url": "https://github.com/alice"},
            "reddit": {"status": "Available", "url": "https://reddit.com/u/alice"},
            "gitlab": {}
        }));

        let (report, _) = build(vec![RawToolOutput::PlatformPresence(raw)]);
        let presence = report.presence().unwrap();

        assert_eq!(
            presence.platforms,
            vec![
                PlatformEntry {
                    name: "github".to_string(),
                    status: PlatformStatus {
                        claimed: true,
                        url: "https://github.com/alice".to_string()
                    },
                },
                PlatformEntry {
                    name: "reddit".to_string(),
                    status: PlatformStatus {
                        claimed: false,
                        url: "https://reddit.com/u/alice".to_string()
                    },
                },
                PlatformEntry {
                    name: "gitlab".to_string(),
                    status: PlatformStatus::default(),
                },
            ]
        );
    }

    #[test]
    fn test_presence_skips_non_object_entry() {
        let raw = object(json!({
            "github": {"status": "Claimed", "url": "https://github.com/alice"},
            "broken": "Claimed"
        }));

        let (report, diagnostics) = build(vec![RawToolOutput::PlatformPresence(raw)]);

        assert_eq!(report.presence().unwrap().platforms.len(), 1);
        assert_eq!(diagnostics.warnings().len(), 1);
    }

    #[test]
    fn test_timeline_posts_and_profile_defaults() {
        let records = vec![
            json!({
                "date": "2024-01-02 08:00:00",
                "tweet": "hello",
                "likes_count": 3,
                "retweets_count": "2",
                "username": "alice",
                "name": "Alice",
                "user_id": 42
            }),
            json!({"date": "2024-01-01", "tweet": "older"}),
        ];

        let (report, diagnostics) = build(vec![RawToolOutput::SocialTimeline(records)]);
        let timeline = report.timeline().unwrap();

        assert!(diagnostics.is_empty());
        assert_eq!(
            timeline.profile,
            Some(ProfileSummary {
                handle: "alice".to_string(),
                display_name: "Alice".to_string(),
                bio: String::new(),
                id: 42,
            })
        );
        assert_eq!(
            timeline.posts,
            vec![
                Post {
                    timestamp: "2024-01-02 08:00:00".to_string(),
                    text: "hello".to_string(),
                    like_count: 3,
                    retweet_count: 2,
                },
                Post {
                    timestamp: "2024-01-01".to_string(),
                    text: "older".to_string(),
                    like_count: 0,
                    retweet_count: 0,
                },
            ]
        );
    }

    #[test]
    fn test_timeline_drops_only_non_object_records() {
        let records = vec![
            json!({"tweet": "one"}),
            json!(17),
            json!({"tweet": ["not", "text"]}),
            json!({"tweet": "two"}),
        ];

        let (report, diagnostics) = build(vec![RawToolOutput::SocialTimeline(records)]);
        let texts: Vec<_> = report
            .timeline()
            .unwrap()
            .posts
            .iter()
            .map(|p| p.text.clone())
            .collect();

        assert_eq!(texts, vec!["one", "", "two"]);
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(matches!(
            diagnostics.warnings()[0],
            Warning::MalformedRecord { .. }
        ));
    }

    #[test]
    fn test_timeline_coerces_scalar_fields() {
        let records = vec![
            json!({"date": "2024-01-01", "tweet": "a"}),
            json!({"date": 1704067200, "tweet": "b"}),
            json!({"tweet": 12345}),
            json!({"date": "2024-01-02", "tweet": "d", "likes_count": [1]}),
        ];

        let (report, diagnostics) = build(vec![RawToolOutput::SocialTimeline(records)]);
        let posts = &report.timeline().unwrap().posts;

        assert!(diagnostics.is_empty());
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[1].timestamp, "1704067200");
        assert_eq!(posts[2].text, "12345");
        assert_eq!(posts[2].timestamp, "");
        assert_eq!(posts[3].like_count, 0);
    }

    #[test]
    fn test_empty_timeline_has_no_profile() {
        let (report, _) = build(vec![RawToolOutput::SocialTimeline(vec![])]);
        let timeline = report.timeline().unwrap();

        assert!(timeline.profile.is_none());
        assert!(timeline.posts.is_empty());
    }

    #[test]
    fn test_metadata_passes_through() {
        let raw = object(json!({"detected": [{"site": "x"}], "info": {"age": null}}));

        let (report, _) = build(vec![RawToolOutput::ProfileMetadata(raw.clone())]);

        assert_eq!(report.metadata(), Some(&raw));
    }
}
