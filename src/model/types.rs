//! @ai:module:intent Canonical report model shared by every renderer
//! @ai:module:layer domain
//! @ai:module:public_api SearchTarget, Report, ToolResult, PlatformPresence, Timeline, Post, ProfileSummary
//! @ai:module:stateless true

use crate::error::Error;
use crate::sources::ToolKind;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// @ai:intent Username under investigation, safe to use as a filename prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTarget(String);

impl SearchTarget {
    /// @ai:intent Validate a username
    /// @ai:pre username is non-empty and has no path separators
    /// @ai:effects pure
    pub fn new(username: &str) -> Result<Self, Error> {
        let username = username.trim();

        let invalid = username.is_empty()
            || username == "."
            || username == ".."
            || username.contains(['/', '\\']);

        if invalid {
            return Err(Error::InvalidTarget(username.to_string()));
        }

        Ok(Self(username.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// @ai:intent Claim status of the username on one platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
    pub claimed: bool,
    pub url: String,
}

/// @ai:intent One platform row in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEntry {
    pub name: String,
    pub status: PlatformStatus,
}

/// @ai:intent Platform presence result, serialized as a name-keyed map in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformPresence {
    pub platforms: Vec<PlatformEntry>,
}

impl PlatformPresence {
    /// @ai:intent Number of platforms where the username is claimed
    /// @ai:effects pure
    pub fn claimed_count(&self) -> usize {
        self.platforms.iter().filter(|p| p.status.claimed).count()
    }
}

impl Serialize for PlatformPresence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.platforms.len()))?;
        for entry in &self.platforms {
            map.serialize_entry(&entry.name, &entry.status)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlatformPresence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PresenceVisitor;

        impl<'de> serde::de::Visitor<'de> for PresenceVisitor {
            type Value = PlatformPresence;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of platform name to claim status")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut platforms = Vec::new();
                while let Some((name, status)) = access.next_entry::<String, PlatformStatus>()? {
                    platforms.push(PlatformEntry { name, status });
                }
                Ok(PlatformPresence { platforms })
            }
        }

        deserializer.deserialize_map(PresenceVisitor)
    }
}

/// @ai:intent A single social post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub timestamp: String,
    pub text: String,
    pub like_count: u64,
    pub retweet_count: u64,
}

/// @ai:intent Profile fields lifted from the first timeline record
///
/// These come from a post record, not a profile lookup, so they are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub handle: String,
    pub display_name: String,
    pub bio: String,
    pub id: u64,
}

/// @ai:intent Timeline result: posts in source order plus optional profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSummary>,
    pub posts: Vec<Post>,
}

/// @ai:intent Normalized output of one tool
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    PlatformPresence(PlatformPresence),
    SocialTimeline(Timeline),
    ProfileMetadata(Map<String, Value>),
}

impl ToolResult {
    pub fn tool(&self) -> ToolKind {
        match self {
            ToolResult::PlatformPresence(_) => ToolKind::PlatformPresence,
            ToolResult::SocialTimeline(_) => ToolKind::SocialTimeline,
            ToolResult::ProfileMetadata(_) => ToolKind::ProfileMetadata,
        }
    }
}

/// @ai:intent Canonical report for one target and one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "username")]
    pub target: SearchTarget,
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "platforms", with = "tool_map")]
    pub tools: BTreeMap<ToolKind, ToolResult>,
}

impl Report {
    /// @ai:intent Create a report with no tool results yet
    /// @ai:effects pure
    pub fn new(target: SearchTarget, generated_at: DateTime<Utc>) -> Self {
        Self {
            target,
            generated_at,
            tools: BTreeMap::new(),
        }
    }

    pub fn presence(&self) -> Option<&PlatformPresence> {
        match self.tools.get(&ToolKind::PlatformPresence) {
            Some(ToolResult::PlatformPresence(presence)) => Some(presence),
            _ => None,
        }
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        match self.tools.get(&ToolKind::SocialTimeline) {
            Some(ToolResult::SocialTimeline(timeline)) => Some(timeline),
            _ => None,
        }
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        match self.tools.get(&ToolKind::ProfileMetadata) {
            Some(ToolResult::ProfileMetadata(metadata)) => Some(metadata),
            _ => None,
        }
    }
}

/// Serializes the tool map keyed by report key, payload shape chosen by key.
mod tool_map {
    use super::{PlatformPresence, Timeline, ToolResult};
    use crate::sources::ToolKind;
    use serde::de::{Error as _, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use serde_json::{Map, Value};
    use std::collections::BTreeMap;

    const KEYS: &[&str] = &["sherlock", "twitter", "social_analyzer"];

    pub fn serialize<S>(tools: &BTreeMap<ToolKind, ToolResult>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(tools.len()))?;
        for (tool, result) in tools {
            match result {
                ToolResult::PlatformPresence(presence) => {
                    map.serialize_entry(tool.as_str(), presence)?
                }
                ToolResult::SocialTimeline(timeline) => {
                    map.serialize_entry(tool.as_str(), timeline)?
                }
                ToolResult::ProfileMetadata(metadata) => {
                    map.serialize_entry(tool.as_str(), metadata)?
                }
            }
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<ToolKind, ToolResult>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ToolMapVisitor;

        impl<'de> Visitor<'de> for ToolMapVisitor {
            type Value = BTreeMap<ToolKind, ToolResult>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of tool results keyed by tool name")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tools = BTreeMap::new();

                while let Some(key) = access.next_key::<String>()? {
                    let tool = ToolKind::from_key(&key)
                        .ok_or_else(|| A::Error::unknown_field(&key, KEYS))?;

                    let result = match tool {
                        ToolKind::PlatformPresence => {
                            ToolResult::PlatformPresence(access.next_value::<PlatformPresence>()?)
                        }
                        ToolKind::SocialTimeline => {
                            ToolResult::SocialTimeline(access.next_value::<Timeline>()?)
                        }
                        ToolKind::ProfileMetadata => {
                            ToolResult::ProfileMetadata(access.next_value::<Map<String, Value>>()?)
                        }
                    };
                    tools.insert(tool, result);
                }

                Ok(tools)
            }
        }

        deserializer.deserialize_map(ToolMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        let mut report = Report::new(
            SearchTarget::new("alice").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 3, 10, 30, 0).unwrap(),
        );
        report.tools.insert(
            ToolKind::PlatformPresence,
            ToolResult::PlatformPresence(PlatformPresence {
                platforms: vec![
                    PlatformEntry {
                        name: "twitter".to_string(),
                        status: PlatformStatus {
                            claimed: false,
                            url: String::new(),
                        },
                    },
                    PlatformEntry {
                        name: "github".to_string(),
                        status: PlatformStatus {
                            claimed: true,
                            url: "https://github.com/alice".to_string(),
                        },
                    },
                ],
            }),
        );
        report
    }

    #[test]
    fn test_search_target_rejects_path_like_names() {
        assert!(SearchTarget::new("alice").is_ok());
        assert_eq!(SearchTarget::new("  bob ").unwrap().as_str(), "bob");
        assert!(SearchTarget::new("").is_err());
        assert!(SearchTarget::new("..").is_err());
        assert!(SearchTarget::new("a/b").is_err());
        assert!(SearchTarget::new("a\\b").is_err());
    }

    #[test]
    fn test_json_keys_follow_canonical_order() {
        let json = serde_json::to_string(&sample_report()).unwrap();

        let username = json.find("\"username\"").unwrap();
        let timestamp = json.find("\"timestamp\"").unwrap();
        let platforms = json.find("\"platforms\"").unwrap();
        assert!(username < timestamp && timestamp < platforms);
        assert!(json.contains("\"sherlock\""));
    }

    #[test]
    fn test_presence_keeps_source_order_through_json() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();

        let names: Vec<_> = parsed
            .presence()
            .unwrap()
            .platforms
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["twitter", "github"]);
    }

    #[test]
    fn test_unknown_tool_key_is_rejected() {
        let json = r#"{"username":"alice","timestamp":"2024-01-03T10:30:00Z","platforms":{"instagram":{}}}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }

    #[test]
    fn test_accessors_return_only_matching_tool() {
        let report = sample_report();
        assert_eq!(report.presence().unwrap().claimed_count(), 1);
        assert!(report.timeline().is_none());
        assert!(report.metadata().is_none());
    }
}
