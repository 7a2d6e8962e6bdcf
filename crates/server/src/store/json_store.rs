//! JSON file storage for named collections
//!
//! Every collection is a single JSON array on disk. Reads load the whole
//! file; writes replace it through a temp file and an atomic rename, so a
//! reader never sees a half-written array.
//!
//! There is no locking. Two concurrent load-modify-save cycles on the same
//! collection race and the last writer wins; the earlier update is lost.
//! Callers that delete by index must have read the array immediately before.

use crate::models::Collection;
use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// File-backed store keyed by [`Collection`]
#[derive(Debug, Clone)]
pub struct JsonStore {
    paths: HashMap<Collection, PathBuf>,
}

impl JsonStore {
    /// Create a store from an explicit collection -> file map
    pub fn new(paths: HashMap<Collection, PathBuf>) -> Self {
        Self { paths }
    }

    /// Store with every collection under `dir` using its default file name
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            Collection::ALL
                .into_iter()
                .map(|c| (c, dir.join(c.file_name())))
                .collect(),
        )
    }

    pub fn path(&self, collection: Collection) -> Option<&Path> {
        self.paths.get(&collection).map(PathBuf::as_path)
    }

    /// Load a collection's elements exactly as stored.
    ///
    /// A missing, unreadable or unparsable file (or one that isn't a JSON
    /// array) yields an empty sequence; the cause is logged and never
    /// returned.
    pub async fn load_raw(&self, collection: Collection) -> Vec<Value> {
        let Some(path) = self.path(collection) else {
            warn!("No file configured for collection {}", collection);
            return Vec::new();
        };

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Collection {} has no file yet at {:?}", collection, path);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read collection {} from {:?}: {}", collection, path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to parse collection {} at {:?}: {}", collection, path, e);
                Vec::new()
            }
        }
    }

    /// Typed view of a collection. Elements that don't fit `T` are skipped,
    /// the rest keep their stored order.
    pub async fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let raw = self.load_raw(collection).await;
        let total = raw.len();
        let entries: Vec<T> = raw
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if entries.len() < total {
            warn!(
                "Skipped {} of {} entries in collection {} that don't match the expected shape",
                total - entries.len(),
                total,
                collection
            );
        }
        entries
    }

    /// Overwrite a collection with `entries`, pretty-printed.
    pub async fn save<T: Serialize>(&self, collection: Collection, entries: &[T]) -> Result<()> {
        let path = self
            .path(collection)
            .with_context(|| format!("No file configured for collection {}", collection))?;

        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Unique per write so concurrent saves don't trample each other's temp file
        let temp_path = temp_sibling(path);
        fs::write(&temp_path, json)
            .await
            .with_context(|| format!("Failed to write {:?}", temp_path))?;

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e).with_context(|| format!("Failed to replace {:?}", path));
        }

        Ok(())
    }

    /// Load, push `entry`, save. Existing elements are written back as they
    /// were read.
    pub async fn append<T: Serialize>(&self, collection: Collection, entry: T) -> Result<()> {
        let mut entries = self.load_raw(collection).await;
        entries.push(serde_json::to_value(entry)?);
        self.save(collection, &entries).await
    }

    /// Remove the element at `index`, shifting later elements left.
    ///
    /// Returns `None` without writing when `index` is out of range.
    pub async fn remove_at(&self, collection: Collection, index: usize) -> Result<Option<Value>> {
        let mut entries = self.load_raw(collection).await;
        if index >= entries.len() {
            return Ok(None);
        }

        let removed = entries.remove(index);
        self.save(collection, &entries).await?;
        Ok(Some(removed))
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
}
