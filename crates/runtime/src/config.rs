//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use leaderboard_core::{LapTimeComparison, OrderBy};

use crate::repository::{EntryRepository, FileEntryRepository, InMemoryEntryRepository, Result};

/// Settings for the sync engine and event bus.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub lap_order: LapTimeComparison,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            lap_order: LapTimeComparison::Lexicographic,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `LEADERBOARD_LAP_ORDER` - `lexicographic` or `numeric` (default: lexicographic)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("LEADERBOARD_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(order) = read_env::<LapTimeComparison>("LEADERBOARD_LAP_ORDER") {
            config.lap_order = order;
        }

        config
    }

    /// Ordering used by both boards.
    pub fn order(&self) -> OrderBy {
        OrderBy::lap_time_ascending().with_comparison(self.lap_order)
    }
}

/// Where entries are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StorageBackend {
    /// Lost when the process exits.
    Memory,
    /// JSON files under the data directory.
    #[default]
    File,
}

#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_STORAGE` - `file` or `memory` (default: file)
    /// - `LEADERBOARD_DATA_DIR` - Directory for collection files (default: platform-specific)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(backend) = read_env::<StorageBackend>("LEADERBOARD_STORAGE") {
            config.backend = backend;
        }

        config.data_dir = env::var("LEADERBOARD_DATA_DIR").ok().map(PathBuf::from);

        config
    }

    /// Directory holding the collection files.
    ///
    /// Follows platform conventions:
    /// - macOS: `~/Library/Application Support/leaderboard`
    /// - Linux: `~/.local/share/leaderboard` (or `$XDG_DATA_HOME/leaderboard`)
    /// - Windows: `%APPDATA%\leaderboard`
    /// - Fallback: `./leaderboard_data`
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        directories::ProjectDirs::from("", "", "leaderboard")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./leaderboard_data"))
    }

    /// Open the configured repository.
    pub fn open(&self) -> Result<Arc<dyn EntryRepository>> {
        match self.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory entry storage");
                Ok(Arc::new(InMemoryEntryRepository::new()))
            }
            StorageBackend::File => {
                let dir = self.data_dir();
                tracing::info!("Using file entry storage at {}", dir.display());
                Ok(Arc::new(FileEntryRepository::open(dir)?))
            }
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_core::{Category, EntryRecord, LapTime};
    use tempfile::TempDir;

    #[test]
    fn defaults_use_string_order_and_file_storage() {
        let runtime = RuntimeConfig::default();
        assert_eq!(runtime.event_buffer_size, 100);
        assert_eq!(runtime.order(), OrderBy::lap_time_ascending());

        let storage = StorageConfig::default();
        assert_eq!(storage.backend, StorageBackend::File);
    }

    #[test]
    fn numeric_order_is_opt_in() {
        let config = RuntimeConfig {
            lap_order: LapTimeComparison::Numeric,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.order().comparison, LapTimeComparison::Numeric);
    }

    #[test]
    fn backend_parses_from_config_text() {
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("FILE".parse::<StorageBackend>(), Ok(StorageBackend::File));
        assert!("cloud".parse::<StorageBackend>().is_err());
    }

    #[tokio::test]
    async fn explicit_data_dir_is_used_for_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: Some(temp_dir.path().join("boards")),
        };

        let repo = config.open().unwrap();
        repo.create(
            Category::Staff,
            EntryRecord {
                name: "A. Driver".into(),
                company: "Acme".into(),
                lap_time: LapTime::from_text("1:00.000").unwrap(),
                date: "2024-01-01".into(),
            },
        )
        .await
        .unwrap();

        assert!(temp_dir.path().join("boards").join("staff.json").exists());
    }
}
