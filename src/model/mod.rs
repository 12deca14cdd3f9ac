//! @ai:module:intent Canonical report model and its assembly
//! @ai:module:layer domain
//! @ai:module:public_api Report, ToolResult, SearchTarget, ReportBuilder

pub mod builder;
pub mod types;

pub use builder::{ReportBuilder, ReportBuilderTrait};
pub use types::{
    PlatformEntry, PlatformPresence, PlatformStatus, Post, ProfileSummary, Report, SearchTarget,
    Timeline, ToolResult,
};
