//! Translation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::core::errors::Result;
use crate::core::models::TranslationOutput;
use crate::store::document::DocumentStore;

/// One remembered translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub output: TranslationOutput,
}

/// History of finished translations, newest first
#[derive(Debug)]
pub struct HistoryStore {
    docs: DocumentStore<HistoryItem>,
}

impl HistoryStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            docs: DocumentStore::open(path)?,
        })
    }

    /// Record `output` and return its id
    pub fn add(&mut self, output: &TranslationOutput) -> Result<String> {
        self.docs.insert(HistoryItem {
            created_at: Utc::now(),
            output: output.clone(),
        })
    }

    /// A page of history, newest first
    pub fn list(&self, offset: usize, limit: usize) -> Vec<(String, HistoryItem)> {
        self.docs
            .newest_first(offset, limit)
            .map(|(id, item)| (id.to_string(), item.clone()))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.docs.get(id)
    }

    /// Delete one item; `false` when no item had that id
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        Ok(self.docs.remove(id)?.is_some())
    }

    pub fn clear(&mut self) -> Result<()> {
        info!("Clearing {} history items", self.docs.len());
        self.docs.clear()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
