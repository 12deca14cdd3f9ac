//! @ai:module:intent Identifiers for the external lookup tools and their artifacts
//! @ai:module:layer domain
//! @ai:module:public_api ToolKind
//! @ai:module:stateless true

use crate::model::SearchTarget;
use serde::{Deserialize, Serialize};

/// @ai:intent External tool whose output feeds the report
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    #[serde(rename = "sherlock")]
    PlatformPresence,
    #[serde(rename = "twitter")]
    SocialTimeline,
    #[serde(rename = "social_analyzer")]
    ProfileMetadata,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [
        ToolKind::PlatformPresence,
        ToolKind::SocialTimeline,
        ToolKind::ProfileMetadata,
    ];

    /// @ai:intent Key used for this tool in the canonical report
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::PlatformPresence => "sherlock",
            ToolKind::SocialTimeline => "twitter",
            ToolKind::ProfileMetadata => "social_analyzer",
        }
    }

    /// @ai:intent Parse a report key back into a tool
    /// @ai:effects pure
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == key)
    }

    /// @ai:intent Human readable tool name
    /// @ai:effects pure
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::PlatformPresence => "Sherlock",
            ToolKind::SocialTimeline => "Twitter",
            ToolKind::ProfileMetadata => "Social-Analyzer",
        }
    }

    /// @ai:intent Filename suffix the tool writes after the username
    /// @ai:effects pure
    fn file_suffix(&self) -> &'static str {
        match self {
            ToolKind::PlatformPresence => "sherlock.json",
            ToolKind::SocialTimeline => "twitter_tweets.json",
            ToolKind::ProfileMetadata => "social_analyzer.json",
        }
    }

    /// @ai:intent Well-known artifact filename for a target
    /// @ai:effects pure
    pub fn file_name(&self, target: &SearchTarget) -> String {
        format!("{}_{}", target.as_str(), self.file_suffix())
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let target = SearchTarget::new("alice").unwrap();
        assert_eq!(ToolKind::PlatformPresence.file_name(&target), "alice_sherlock.json");
        assert_eq!(
            ToolKind::SocialTimeline.file_name(&target),
            "alice_twitter_tweets.json"
        );
        assert_eq!(
            ToolKind::ProfileMetadata.file_name(&target),
            "alice_social_analyzer.json"
        );
    }

    #[test]
    fn test_from_key_matches_as_str() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_key(tool.as_str()), Some(tool));
        }
        assert_eq!(ToolKind::from_key("instagram"), None);
    }
}
