//! Async translation client with chunking and ordered concurrent merging

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

use crate::core::chunker;
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, SplitSide, TranslationError};
use crate::core::extract::extract;
use crate::core::language::to_provider_code;
use crate::core::models::{TranslationRequest, TranslationResult, PROVIDER_NAME};
use crate::core::repair::parse_body;
use crate::core::token::{TkkTokenGenerator, TokenGenerator};
use crate::core::transport::{HttpTransport, Transport};

/// Data sections requested from the provider
const DATA_TYPES: &[&str] = &["bd", "ex", "ld", "md", "qc", "rw", "rm", "ss", "t", "at"];

type TranslateFuture<'a> = Pin<Box<dyn Future<Output = Result<TranslationResult>> + Send + 'a>>;

/// Per-call parameters shared by every chunk of one translation
#[derive(Debug, Clone, Copy)]
struct Call<'a> {
    input_lang: &'a str,
    output_lang: &'a str,
    china_mode: bool,
}

/// Async translation client
///
/// Short text goes out in one request. Longer text is cut into a head that
/// fits in a request and a tail that is translated recursively, both halves in
/// flight at once, and the results are joined head first.
#[derive(Clone)]
pub struct AsyncTranslator {
    config: Arc<TranslatorConfig>,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenGenerator>,
}

impl AsyncTranslator {
    /// Create a new async translator
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let transport = HttpTransport::new(Duration::from_millis(config.timeout_ms))?;
        let tokens = TkkTokenGenerator::from_seed(&config.tkk)?;

        Ok(Self::with_parts(config, Arc::new(transport), Arc::new(tokens)))
    }

    /// Create from environment
    pub fn from_env() -> anyhow::Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Ok(Self::new(config)?)
    }

    /// Create with a caller-supplied transport and token source
    pub fn with_parts(
        config: TranslatorConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            tokens,
        }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate a request, splitting long text as needed
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let call = Call {
            input_lang: &request.input_lang,
            output_lang: &request.output_lang,
            china_mode: request.options.china_mode.unwrap_or(self.config.china_mode),
        };

        info!(
            "Translating {} chars {} -> {}",
            request.text.chars().count(),
            call.input_lang,
            call.output_lang
        );

        let mut result = self.translate_chunked(call, &request.text).await?;
        result.provider = PROVIDER_NAME.to_string();
        Ok(result)
    }

    /// Translate `text` whole if it fits, otherwise head and tail concurrently
    fn translate_chunked<'a>(&'a self, call: Call<'a>, text: &'a str) -> TranslateFuture<'a> {
        Box::pin(async move {
            if chunker::fits_single_request(text) {
                return self.translate_single(call, text).await;
            }

            let split = chunker::split(text);
            debug!(
                "Splitting {} bytes into {} + {}",
                text.len(),
                split.left.len(),
                split.right.len()
            );

            let (left, right) = tokio::join!(
                self.translate_single(call, split.left),
                self.translate_chunked(call, split.right),
            );

            let left = left.map_err(|e| TranslationError::split(SplitSide::Left, e))?;
            let right = right.map_err(|e| TranslationError::split(SplitSide::Right, e))?;

            Ok(TranslationResult::merge(left, right))
        })
    }

    /// One request for exactly `text`
    async fn translate_single(&self, call: Call<'_>, text: &str) -> Result<TranslationResult> {
        let token = self.tokens.generate(text).await?;
        let url = self.request_url(call.input_lang, call.output_lang, text, &token, call.china_mode)?;

        let body = self.transport.get(&url).await?;
        debug!("Received {} bytes for {} byte chunk", body.len(), text.len());

        let payload = parse_body(&body)?;
        extract(&payload, call.output_lang)
    }

    /// Build the provider query for one chunk
    pub fn request_url(
        &self,
        input_lang: &str,
        output_lang: &str,
        text: &str,
        token: &str,
        china_mode: bool,
    ) -> Result<Url> {
        let host = self.config.host(china_mode);
        let mut url = Url::parse(host)
            .and_then(|base| base.join("translate_a/single"))
            .map_err(|e| TranslationError::ConfigError {
                message: format!("invalid host {}: {}", host, e),
            })?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client", "t")
                .append_pair("sl", to_provider_code(input_lang))
                .append_pair("tl", to_provider_code(output_lang))
                .append_pair("hl", "en");
            for data_type in DATA_TYPES {
                query.append_pair("dt", data_type);
            }
            query
                .append_pair("ie", "UTF-8")
                .append_pair("oe", "UTF-8")
                .append_pair("source", "btn")
                .append_pair("kc", "0")
                .append_pair("ssel", "4")
                .append_pair("tsel", "4")
                .append_pair("tk", token)
                .append_pair("q", text);
        }

        Ok(url)
    }
}
