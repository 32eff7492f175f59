//! Local persistence for history and phrasebook

pub mod document;
pub mod history;
pub mod phrasebook;

pub use document::DocumentStore;
pub use history::{HistoryItem, HistoryStore};
pub use phrasebook::{Phrasebook, PhrasebookEntry, PHRASEBOOK_VERSION};
