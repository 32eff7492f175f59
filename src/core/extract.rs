//! Result extraction from the provider's positional payload
//!
//! Index layout of the top-level array:
//!
//! | index  | content                                              |
//! |--------|------------------------------------------------------|
//! | 0      | sentence table, rows of `[output, input, ..]`        |
//! | 1      | output dictionary                                    |
//! | 2      | detected source language                             |
//! | 5      | segments: `[input, _, [[alt, accuracy, ..], ..], ..]` |
//! | 7      | spelling correction, text at position 1              |
//! | 8      | language suggestion, code at `[0][0]`                |
//! | 11..14 | input dictionary tables                              |
//!
//! Rows of the sentence table without an output text carry romanization at
//! positions 2 (output) and 3 (input).

use serde_json::Value;

use crate::core::errors::{Result, TranslationError};
use crate::core::language::{from_provider_code, CANTONESE_ROMANIZED};
use crate::core::models::{Alternative, OutputSegment, TranslationResult, PROVIDER_NAME};

const SENTENCES: usize = 0;
const OUTPUT_DICT: usize = 1;
const DETECTED_LANG: usize = 2;
const SEGMENTS: usize = 5;
const SUGGESTED_TEXT: usize = 7;
const SUGGESTED_LANG: usize = 8;
const INPUT_DICT: [usize; 4] = [11, 12, 13, 14];

fn shape_error(message: impl Into<String>) -> TranslationError {
    TranslationError::ResponseParseFailure {
        message: message.into(),
    }
}

/// Whether a slot holds something worth reading
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn slot(root: &[Value], index: usize) -> Option<&Value> {
    root.get(index).filter(|v| is_present(v))
}

fn array_slot<'a>(root: &'a [Value], index: usize, what: &str) -> Result<Option<&'a Vec<Value>>> {
    match slot(root, index) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(shape_error(format!("{} (index {}) is not an array", what, index))),
    }
}

fn append(target: &mut Option<String>, fragment: &str) {
    match target {
        Some(existing) => existing.push_str(fragment),
        None => *target = Some(fragment.to_string()),
    }
}

fn alternative(entry: &Value) -> Alternative {
    Alternative {
        text: entry.get(0).and_then(Value::as_str).unwrap_or_default().to_string(),
        accuracy: entry.get(1).and_then(Value::as_f64),
    }
}

fn segment(entry: &Value) -> OutputSegment {
    let output_arr = entry
        .get(2)
        .filter(|v| is_present(v))
        .and_then(Value::as_array)
        .map(|alts| alts.iter().map(alternative).collect());

    OutputSegment::Detailed {
        input_text: entry.get(0).and_then(Value::as_str).unwrap_or_default().to_string(),
        output_arr,
    }
}

/// Build a [`TranslationResult`] from a parsed payload.
///
/// `output_lang` is the application's target code, used to suppress output
/// romanization for Cantonese.
pub fn extract(payload: &Value, output_lang: &str) -> Result<TranslationResult> {
    let root = payload
        .as_array()
        .ok_or_else(|| shape_error("payload is not an array"))?;

    let mut output_text = String::new();
    let mut input_roman = None;
    let mut output_roman = None;

    if let Some(rows) = array_slot(root, SENTENCES, "sentence table")? {
        for row in rows {
            match row.get(0).and_then(non_empty_str) {
                Some(text) => output_text.push_str(text),
                None => {
                    if let Some(roman) = row.get(2).and_then(non_empty_str) {
                        append(&mut output_roman, roman);
                    }
                    if let Some(roman) = row.get(3).and_then(non_empty_str) {
                        append(&mut input_roman, roman);
                    }
                }
            }
        }
    }

    if output_lang == CANTONESE_ROMANIZED {
        output_roman = None;
    }

    let output_segments = match array_slot(root, SEGMENTS, "segment table")? {
        Some(entries) => entries.iter().map(segment).collect(),
        None => vec![OutputSegment::Plain(output_text.clone())],
    };

    let detected_input_lang = root
        .get(DETECTED_LANG)
        .and_then(non_empty_str)
        .map(|code| from_provider_code(code).to_string())
        .ok_or_else(|| shape_error("missing detected language (index 2)"))?;

    let input_dict = INPUT_DICT
        .iter()
        .any(|&i| slot(root, i).is_some())
        .then(|| {
            INPUT_DICT
                .iter()
                .map(|&i| root.get(i).cloned().unwrap_or(Value::Null))
                .collect()
        });

    let suggested_input_lang = slot(root, SUGGESTED_LANG)
        .and_then(|v| v.get(0))
        .and_then(|v| v.get(0))
        .and_then(non_empty_str)
        .map(|code| from_provider_code(code).to_string());

    let suggested_input_text = slot(root, SUGGESTED_TEXT)
        .and_then(|v| v.get(1))
        .and_then(non_empty_str)
        .map(str::to_string);

    Ok(TranslationResult {
        output_text,
        input_roman,
        output_roman,
        output_segments,
        detected_input_lang,
        input_dict,
        output_dict: slot(root, OUTPUT_DICT).cloned(),
        suggested_input_lang,
        suggested_input_text,
        provider: PROVIDER_NAME.to_string(),
    })
}
