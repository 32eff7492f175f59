//! JSON-file document collection keyed by timestamp ids

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Documents kept in memory and written through to a single JSON file.
///
/// Ids are RFC 3339 timestamps with millisecond precision, so key order is
/// insertion order.
#[derive(Debug)]
pub struct DocumentStore<T> {
    path: PathBuf,
    docs: BTreeMap<String, T>,
}

impl<T: Serialize + DeserializeOwned> DocumentStore<T> {
    /// Open the collection at `path`, starting empty if the file is missing
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let docs = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| TranslationError::StoreError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened {} with {} documents", path.display(), docs.len());
        Ok(Self { path, docs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// A free id at or after `now`
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut at = now;
        loop {
            let id = at.to_rfc3339_opts(SecondsFormat::Millis, true);
            if !self.docs.contains_key(&id) {
                return id;
            }
            at += Duration::milliseconds(1);
        }
    }

    /// Store `doc` under a fresh id and return the id
    pub fn insert(&mut self, doc: T) -> Result<String> {
        let id = self.next_id(Utc::now());
        self.put(id.clone(), doc)?;
        Ok(id)
    }

    pub fn put(&mut self, id: String, doc: T) -> Result<()> {
        self.docs.insert(id, doc);
        self.persist()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.docs.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<T>> {
        let removed = self.docs.remove(id);
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.docs.clear();
        self.persist()
    }

    /// Newest documents first, skipping `offset` and yielding at most `limit`
    pub fn newest_first(&self, offset: usize, limit: usize) -> impl Iterator<Item = (&str, &T)> {
        self.docs
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .map(|(id, doc)| (id.as_str(), doc))
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<(&str, &T)>
    where
        F: FnMut(&T) -> bool,
    {
        self.docs
            .iter()
            .rev()
            .find(|(_, doc)| predicate(*doc))
            .map(|(id, doc)| (id.as_str(), doc))
    }

    /// Write the collection through a temporary file and rename it into place
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&self.docs)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
