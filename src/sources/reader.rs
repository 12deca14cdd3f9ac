//! @ai:module:intent Locate and parse the artifacts left by external tools
//! @ai:module:layer infrastructure
//! @ai:module:public_api ResultReader, ResultReaderTrait, RawToolOutput
//! @ai:module:stateless true

use crate::error::{Diagnostics, Warning};
use crate::model::SearchTarget;
use crate::sources::tool::ToolKind;
use serde_json::{Map, Value};
use std::path::Path;

/// @ai:intent Tool output parsed at the format level, not yet normalized
#[derive(Debug, Clone, PartialEq)]
pub enum RawToolOutput {
    PlatformPresence(Map<String, Value>),
    SocialTimeline(Vec<Value>),
    ProfileMetadata(Map<String, Value>),
}

/// @ai:intent Trait for loading tool artifacts
pub trait ResultReaderTrait: Send + Sync {
    /// @ai:intent Load one tool's artifact, degrading to None on absence or malformed content
    fn read(
        &self,
        dir: &Path,
        target: &SearchTarget,
        tool: ToolKind,
        diagnostics: &mut Diagnostics,
    ) -> Option<RawToolOutput>;
}

/// @ai:intent Reads tool artifacts from a working directory
pub struct ResultReader;

impl ResultReader {
    /// @ai:intent Create a new result reader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse a whole-file JSON object
    /// @ai:effects pure
    fn parse_object(
        content: &str,
        tool: ToolKind,
        path: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Option<Map<String, Value>> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => {
                diagnostics.record(Warning::NotAnObject {
                    tool,
                    path: path.to_path_buf(),
                });
                None
            }
            Err(source) => {
                diagnostics.record(Warning::MalformedSource {
                    tool,
                    path: path.to_path_buf(),
                    source,
                });
                None
            }
        }
    }

    /// @ai:intent Parse one JSON value per non-empty line, skipping bad lines
    /// @ai:effects pure
    fn parse_lines(content: &str, path: &Path, diagnostics: &mut Diagnostics) -> Vec<Value> {
        let mut values = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(line) {
                Ok(value) => values.push(value),
                Err(source) => diagnostics.record(Warning::MalformedLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                    source,
                }),
            }
        }

        values
    }
}

impl Default for ResultReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultReaderTrait for ResultReader {
    /// @ai:intent Load one tool's artifact
    /// @ai:effects fs:read
    fn read(
        &self,
        dir: &Path,
        target: &SearchTarget,
        tool: ToolKind,
        diagnostics: &mut Diagnostics,
    ) -> Option<RawToolOutput> {
        let path = dir.join(tool.file_name(target));

        if !path.is_file() {
            tracing::debug!("No {} output at {}", tool.display_name(), path.display());
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => {
                diagnostics.record(Warning::Read { tool, path, source });
                return None;
            }
        };

        let output = match tool {
            ToolKind::PlatformPresence => RawToolOutput::PlatformPresence(Self::parse_object(
                &content,
                tool,
                &path,
                diagnostics,
            )?),
            ToolKind::SocialTimeline => {
                RawToolOutput::SocialTimeline(Self::parse_lines(&content, &path, diagnostics))
            }
            ToolKind::ProfileMetadata => RawToolOutput::ProfileMetadata(Self::parse_object(
                &content,
                tool,
                &path,
                diagnostics,
            )?),
        };

        tracing::info!("Loaded {} output from {}", tool.display_name(), path.display());
        Some(output)
    }
}
