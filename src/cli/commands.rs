//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Read;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::core::client::AsyncTranslator;
use crate::core::config::TranslatorConfig;
use crate::core::models::{TranslationOutput, TranslationRequest};
use crate::core::session::{SessionOutcome, TranslationSession};
use crate::store::{HistoryStore, Phrasebook};

/// Commands for gtx-translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text (reads stdin when no text is given)
    Translate {
        /// Text to translate
        text: Option<String>,

        /// Source language (default: auto)
        #[arg(short, long, default_value = "auto")]
        from: String,

        /// Target language (default: en)
        #[arg(short, long, default_value = "en")]
        to: String,

        /// Use the mainland China host
        #[arg(long)]
        china: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Do not record the translation in history
        #[arg(long)]
        no_history: bool,

        /// Save the translation to the phrasebook, or remove it if already saved
        #[arg(long)]
        phrasebook: bool,
    },

    /// Show or edit translation history
    History {
        /// Number of items to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Items to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Delete the item with this id
        #[arg(long)]
        delete: Option<String>,

        /// Delete all history
        #[arg(long)]
        clear: bool,
    },

    /// Show or edit the phrasebook
    Phrasebook {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Remove the entry with this id
        #[arg(long)]
        remove: Option<String>,
    },

    /// Start HTTP API server
    Server {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Print a translation the way a user reads it
fn print_output(output: &TranslationOutput) {
    let result = &output.result;
    println!("{}", result.output_text);
    if let Some(roman) = &result.output_roman {
        println!("  [{}]", roman);
    }
    if let Some(roman) = &result.input_roman {
        println!("  source: {}", roman);
    }
    if let Some(suggested) = &result.suggested_input_text {
        println!("  did you mean: {}", suggested);
    }
    println!(
        "  ({} -> {}, detected {})",
        output.input_lang, output.output_lang, result.detected_input_lang
    );
}

/// Handle translate command
#[allow(clippy::too_many_arguments)]
pub async fn handle_translate(
    config: TranslatorConfig,
    text: Option<String>,
    from: String,
    to: String,
    china: bool,
    json: bool,
    no_history: bool,
    phrasebook: bool,
) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let history = Arc::new(Mutex::new(HistoryStore::open(&config.history_path)?));
    let phrasebook_path = config.phrasebook_path.clone();
    let translator = AsyncTranslator::new(config)?;
    let session = TranslationSession::new(translator).with_history(history);

    let mut request = TranslationRequest::new(from, to, text);
    if china {
        request = request.with_china_mode(true);
    }

    let output = match session.translate(request, !no_history).await? {
        SessionOutcome::Completed(output) => output,
        SessionOutcome::Blank => anyhow::bail!("Nothing to translate"),
        SessionOutcome::Superseded => anyhow::bail!("Translation was superseded"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_output(&output);
    }

    if phrasebook {
        let mut book = Phrasebook::open(&phrasebook_path)?;
        match book.toggle(&output)? {
            Some(id) => println!("Saved to phrasebook ({})", id),
            None => println!("Removed from phrasebook"),
        }
    }

    Ok(())
}

/// Handle history command
pub async fn handle_history(
    config: TranslatorConfig,
    limit: usize,
    offset: usize,
    delete: Option<String>,
    clear: bool,
) -> anyhow::Result<()> {
    let mut history = HistoryStore::open(&config.history_path)?;

    if clear {
        history.clear()?;
        println!("History cleared");
        return Ok(());
    }

    if let Some(id) = delete {
        if history.delete(&id)? {
            println!("Deleted {}", id);
        } else {
            anyhow::bail!("No history item {}", id);
        }
        return Ok(());
    }

    let items = history.list(offset, limit);
    if items.is_empty() {
        println!("History is empty");
        return Ok(());
    }

    for (id, item) in items {
        println!("{}  {} -> {}", id, item.output.input_lang, item.output.output_lang);
        println!("    {}", item.output.input_text);
        println!("    {}", item.output.result.output_text);
    }

    Ok(())
}

/// Handle phrasebook command
pub async fn handle_phrasebook(
    config: TranslatorConfig,
    limit: usize,
    remove: Option<String>,
) -> anyhow::Result<()> {
    let mut book = Phrasebook::open(&config.phrasebook_path)?;

    if let Some(id) = remove {
        if book.remove(&id)? {
            println!("Removed {}", id);
        } else {
            anyhow::bail!("No phrasebook entry {}", id);
        }
        return Ok(());
    }

    for (id, entry) in book.list(0, limit) {
        println!("{}  {}", id, entry.data.input_text);
        println!("    {}", entry.data.result.output_text);
    }

    Ok(())
}

/// Handle server command
pub async fn handle_server(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(config, host, port).await?;

    Ok(())
}
