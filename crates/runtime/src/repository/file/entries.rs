//! File-backed entry collections.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use leaderboard_core::{Category, Entry, EntryRecord, OrderBy};

use crate::repository::store::ObservableStore;
use crate::repository::{EntryRepository, RepositoryError, Result, Subscription};

/// File-based implementation of [`EntryRepository`].
///
/// Each collection is a JSON array of documents at `{base_dir}/{collection}.json`.
/// Live queries are served from memory; the file is rewritten on every change
/// on the blocking thread pool, holding only that collection's lock.
///
/// # File Format
///
/// ```text
/// [
///   {"id": "...", "name": "...", "company": "...", "lapTime": "1:23.456", "date": "..."},
///   ...
/// ]
/// ```
///
/// Documents are kept in insertion order; ordering is applied per query.
pub struct FileEntryRepository {
    base_dir: PathBuf,
    store: Arc<ObservableStore>,
}

impl FileEntryRepository {
    /// Open (or create) a repository rooted at `base_dir`.
    ///
    /// Existing collection files are loaded; missing ones start empty.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;

        let store = ObservableStore::new();
        for category in Category::ALL {
            let path = collection_path(&base_dir, category);
            let entries = read_collection(&path)?;

            tracing::debug!(
                "Loaded {} entries for {} from {}",
                entries.len(),
                category,
                path.display()
            );

            store.load(category, entries)?;
        }

        Ok(Self { base_dir, store })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Documents of `collection` in insertion order.
    pub fn entries(&self, collection: Category) -> Result<Vec<Entry>> {
        self.store.entries(collection)
    }
}

#[async_trait]
impl EntryRepository for FileEntryRepository {
    async fn create(&self, collection: Category, record: EntryRecord) -> Result<Entry> {
        let path = collection_path(&self.base_dir, collection);
        let store = Arc::clone(&self.store);

        let (entry, path) = tokio::task::spawn_blocking(move || {
            store
                .insert_with(collection, record, |entries| write_collection(&path, entries))
                .map(|entry| (entry, path))
        })
        .await
        .map_err(|e| RepositoryError::TaskFailed(e.to_string()))??;

        tracing::debug!("Saved entry[{}] to {}", entry.id, path.display());

        Ok(entry)
    }

    fn subscribe(&self, collection: Category, order: OrderBy) -> Result<Subscription> {
        self.store.subscribe(collection, order)
    }
}

fn collection_path(base_dir: &Path, collection: Category) -> PathBuf {
    base_dir.join(format!("{}.json", collection.collection()))
}

fn read_collection(path: &Path) -> Result<Vec<Entry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))
}

fn write_collection(path: &Path, entries: &[Entry]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    let bytes = serde_json::to_vec_pretty(entries)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    // Write to temp file
    fs::write(&temp_path, bytes)?;

    // Atomic rename
    fs::rename(&temp_path, path)?;

    Ok(())
}
