//! @ai:module:intent Resolve the working directory a lookup run wrote into
//! @ai:module:layer infrastructure
//! @ai:module:public_api RunLocator
//! @ai:module:stateless true

use crate::model::SearchTarget;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Timestamp suffix used when a run directory is named `<username>_<timestamp>`.
pub const RUN_DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// @ai:intent Finds run directories under a results root
pub struct RunLocator;

impl RunLocator {
    /// @ai:intent Latest `<username>_<timestamp>` directory under results_dir
    /// @ai:effects fs:read
    pub fn latest_run(results_dir: &Path, target: &SearchTarget) -> Option<PathBuf> {
        let prefix = format!("{}_", target.as_str());

        WalkDir::new(results_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|name| name.strip_prefix(&prefix))
                    .map(is_run_timestamp)
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .max()
    }

    /// @ai:intent Pick the working directory: explicit, latest run, or `<results_dir>/<username>`
    /// @ai:effects fs:read
    pub fn resolve(
        explicit: Option<PathBuf>,
        results_dir: &Path,
        target: &SearchTarget,
    ) -> PathBuf {
        explicit
            .or_else(|| Self::latest_run(results_dir, target))
            .unwrap_or_else(|| results_dir.join(target.as_str()))
    }
}

fn is_run_timestamp(suffix: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(suffix, RUN_DIR_TIMESTAMP_FORMAT).is_ok()
}
