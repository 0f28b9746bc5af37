//! Content loaders for reading layouts, scenarios and tuning from files.

pub mod config;
pub mod map;
pub mod scenario;

pub use config::ConfigLoader;
pub use map::MapLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
