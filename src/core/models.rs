//! Core data models for translation

use serde::{Deserialize, Serialize};

/// Name stamped on every result produced by this client
pub const PROVIDER_NAME: &str = "Google";

/// Per-call options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateOptions {
    /// Route requests through the mainland host instead of the international
    /// one; the configured default applies when unset
    #[serde(default)]
    pub china_mode: Option<bool>,
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub input_lang: String,
    pub output_lang: String,
    pub text: String,
    #[serde(default)]
    pub options: TranslateOptions,
}

impl TranslationRequest {
    pub fn new(
        input_lang: impl Into<String>,
        output_lang: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            input_lang: input_lang.into(),
            output_lang: output_lang.into(),
            text: text.into(),
            options: TranslateOptions::default(),
        }
    }

    pub fn with_china_mode(mut self, china_mode: bool) -> Self {
        self.options.china_mode = Some(china_mode);
        self
    }
}

/// One alternative rendering of a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub text: String,
    pub accuracy: Option<f64>,
}

/// Per-segment translation detail
///
/// When the provider sends no segment table the whole translation is carried
/// as a single plain segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputSegment {
    /// Segment with its source text and provider alternatives
    #[serde(rename_all = "camelCase")]
    Detailed {
        input_text: String,
        output_arr: Option<Vec<Alternative>>,
    },
    /// Whole output text, used when no segment table was returned
    Plain(String),
}

/// Translation result
///
/// Optional fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub output_text: String,
    pub input_roman: Option<String>,
    pub output_roman: Option<String>,
    pub output_segments: Vec<OutputSegment>,
    pub detected_input_lang: String,
    /// Provider dictionary tables at payload indices 11 to 14, absent entries as `null`
    pub input_dict: Option<Vec<serde_json::Value>>,
    pub output_dict: Option<serde_json::Value>,
    pub suggested_input_lang: Option<String>,
    pub suggested_input_text: Option<String>,
    pub provider: String,
}

impl TranslationResult {
    /// Join two chunk results in reading order.
    ///
    /// Dictionary and suggestion fields only describe a single request and are
    /// dropped. The detected language comes from the left chunk.
    pub fn merge(left: TranslationResult, right: TranslationResult) -> TranslationResult {
        let join = |l: Option<String>, r: Option<String>| match (l, r) {
            (Some(l), Some(r)) => Some(format!("{} {}", l, r)),
            _ => None,
        };

        let mut output_segments = left.output_segments;
        output_segments.extend(right.output_segments);

        TranslationResult {
            output_text: format!("{} {}", left.output_text, right.output_text),
            input_roman: join(left.input_roman, right.input_roman),
            output_roman: join(left.output_roman, right.output_roman),
            output_segments,
            detected_input_lang: left.detected_input_lang,
            input_dict: None,
            output_dict: None,
            suggested_input_lang: None,
            suggested_input_text: None,
            provider: PROVIDER_NAME.to_string(),
        }
    }
}

/// A finished translation together with what was asked, as shown to the user
/// and kept in history and the phrasebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutput {
    pub input_lang: String,
    pub output_lang: String,
    pub input_text: String,
    #[serde(flatten)]
    pub result: TranslationResult,
}

impl TranslationOutput {
    pub fn new(request: &TranslationRequest, result: TranslationResult) -> Self {
        Self {
            input_lang: request.input_lang.clone(),
            output_lang: request.output_lang.clone(),
            input_text: request.text.clone(),
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, roman: Option<&str>, lang: &str) -> TranslationResult {
        TranslationResult {
            output_text: text.to_string(),
            input_roman: roman.map(str::to_string),
            output_roman: roman.map(str::to_string),
            output_segments: vec![OutputSegment::Plain(text.to_string())],
            detected_input_lang: lang.to_string(),
            input_dict: None,
            output_dict: Some(serde_json::json!([["noun"]])),
            suggested_input_lang: Some(lang.to_string()),
            suggested_input_text: None,
            provider: PROVIDER_NAME.to_string(),
        }
    }

    #[test]
    fn test_merge_keeps_left_then_right() {
        let merged = TranslationResult::merge(
            chunk("un", Some("a"), "en"),
            chunk("deux", Some("b"), "de"),
        );

        assert_eq!(merged.output_text, "un deux");
        assert_eq!(merged.input_roman.as_deref(), Some("a b"));
        assert_eq!(merged.output_roman.as_deref(), Some("a b"));
        assert_eq!(
            merged.output_segments,
            vec![
                OutputSegment::Plain("un".to_string()),
                OutputSegment::Plain("deux".to_string()),
            ]
        );
        assert_eq!(merged.detected_input_lang, "en");
        assert!(merged.output_dict.is_none());
        assert!(merged.suggested_input_lang.is_none());
    }

    #[test]
    fn test_result_serializes_absent_fields_as_null() {
        let value = serde_json::to_value(chunk("un", None, "en")).unwrap();

        assert_eq!(value["outputText"], "un");
        assert!(value["inputRoman"].is_null());
        assert!(value.as_object().unwrap().contains_key("suggestedInputText"));
        assert_eq!(value["outputSegments"], serde_json::json!(["un"]));
        assert_eq!(value["provider"], "Google");
    }

    #[test]
    fn test_request_options_default() {
        let request: TranslationRequest =
            serde_json::from_str(r#"{"inputLang":"en","outputLang":"fr","text":"Hello"}"#).unwrap();
        assert_eq!(request.options.china_mode, None);
        assert_eq!(request.with_china_mode(true).options.china_mode, Some(true));
    }

    #[test]
    fn test_merge_drops_one_sided_romanization() {
        let merged = TranslationResult::merge(chunk("un", Some("a"), "en"), chunk("deux", None, "en"));

        assert!(merged.input_roman.is_none());
        assert!(merged.output_roman.is_none());
    }
}
