//! Saved phrases

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::TranslationOutput;
use crate::store::document::DocumentStore;

/// Schema version written with every entry
pub const PHRASEBOOK_VERSION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhrasebookEntry {
    pub data: TranslationOutput,
    pub phrasebook_version: u32,
}

#[derive(Debug)]
pub struct Phrasebook {
    docs: DocumentStore<PhrasebookEntry>,
}

impl Phrasebook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            docs: DocumentStore::open(path)?,
        })
    }

    /// Id of a saved entry for the same text and language pair
    pub fn find(&self, output: &TranslationOutput) -> Option<String> {
        self.docs
            .find(|entry| {
                entry.data.input_text == output.input_text
                    && entry.data.input_lang == output.input_lang
                    && entry.data.output_lang == output.output_lang
            })
            .map(|(id, _)| id.to_string())
    }

    /// Save `output`, or remove it if already saved.
    ///
    /// Returns the new entry id when saved, `None` when removed.
    pub fn toggle(&mut self, output: &TranslationOutput) -> Result<Option<String>> {
        if let Some(id) = self.find(output) {
            self.docs.remove(&id)?;
            debug!("Removed phrasebook entry {}", id);
            return Ok(None);
        }

        let id = self.docs.insert(PhrasebookEntry {
            data: output.clone(),
            phrasebook_version: PHRASEBOOK_VERSION,
        })?;
        debug!("Saved phrasebook entry {}", id);
        Ok(Some(id))
    }

    pub fn remove(&mut self, id: &str) -> Result<bool> {
        Ok(self.docs.remove(id)?.is_some())
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<(String, PhrasebookEntry)> {
        self.docs
            .newest_first(offset, limit)
            .map(|(id, entry)| (id.to_string(), entry.clone()))
            .collect()
    }
}
