//! Caller-side request tracking
//!
//! A UI issues a new translation whenever the input changes. Each request is
//! tagged with an increasing identifier and a result that arrives after a
//! newer request was issued is dropped instead of overwriting fresher output.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::client::AsyncTranslator;
use crate::core::errors::Result;
use crate::core::models::{TranslationOutput, TranslationRequest};
use crate::store::history::HistoryStore;

/// What happened to a session request
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Translation finished and is still the latest request
    Completed(TranslationOutput),
    /// Input was empty or whitespace; nothing was sent
    Blank,
    /// A newer request was issued before this one finished
    Superseded,
}

pub struct TranslationSession {
    translator: AsyncTranslator,
    latest: AtomicU64,
    history: Option<Arc<Mutex<HistoryStore>>>,
}

impl TranslationSession {
    pub fn new(translator: AsyncTranslator) -> Self {
        Self {
            translator,
            latest: AtomicU64::new(0),
            history: None,
        }
    }

    pub fn with_history(mut self, history: Arc<Mutex<HistoryStore>>) -> Self {
        self.history = Some(history);
        self
    }

    /// Drop whatever is in flight, e.g. because the input text changed
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Translate `request` unless it is blank.
    ///
    /// Errors of superseded requests are swallowed like their results.
    pub async fn translate(
        &self,
        request: TranslationRequest,
        save_to_history: bool,
    ) -> Result<SessionOutcome> {
        if request.text.trim().is_empty() {
            return Ok(SessionOutcome::Blank);
        }

        let identifier = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.translator.translate(&request).await;

        if self.latest.load(Ordering::SeqCst) != identifier {
            debug!("Discarding result of superseded request {}", identifier);
            return Ok(SessionOutcome::Superseded);
        }

        let output = TranslationOutput::new(&request, result?);

        if save_to_history {
            match &self.history {
                Some(history) => {
                    history.lock().await.add(&output)?;
                }
                None => warn!("No history store configured, not saving"),
            }
        }

        Ok(SessionOutcome::Completed(output))
    }
}
