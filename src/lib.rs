//! gtx-translator - Google Translate web client
//!
//! Translates arbitrarily long text through the provider's web endpoint by
//! splitting it into request-sized chunks, translating them concurrently and
//! merging the results in reading order. Includes a history and phrasebook
//! store, a CLI and an HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod core;
pub mod server;
pub mod store;

// Re-export key types for convenience
pub use crate::core::{
    client::AsyncTranslator,
    config::TranslatorConfig,
    errors::TranslationError,
    models::{
        Alternative, OutputSegment, TranslateOptions, TranslationOutput, TranslationRequest,
        TranslationResult,
    },
    session::{SessionOutcome, TranslationSession},
    token::TokenGenerator,
    transport::Transport,
};

pub use store::{HistoryStore, Phrasebook};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
