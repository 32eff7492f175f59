//! Response body repair
//!
//! The provider answers with a JSON-like array that leaves empty slots blank
//! (`[1,,2,]`). This module fills those slots with `null` so a standard JSON
//! parser accepts the body.

use serde_json::Value;

use crate::core::errors::{Result, TranslationError};

/// Rewrite `body` into valid JSON by inserting `null` for missing elements.
///
/// Quoted strings that directly follow a `,` or `[` are copied untouched,
/// including any delimiters they contain. A backslash escapes the character
/// after it, so `\"` stays inside the string while `\\"` closes it.
pub fn repair(body: &str) -> String {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len() + body.len() / 4);
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c != b',' && c != b'[' {
            let next = next_delimiter(bytes, i);
            out.push_str(&body[i..next]);
            i = next;
            continue;
        }

        match bytes.get(i + 1) {
            Some(b',') | Some(b']') => {
                out.push(c as char);
                out.push_str("null");
                i += 1;
            }
            Some(b'"') => {
                let end = string_end(bytes, i + 2);
                out.push_str(&body[i..end]);
                i = end;
            }
            _ => {
                out.push(c as char);
                i += 1;
            }
        }
    }

    out
}

/// Index of the next `,` or `[` at or after `from`, or the end of input
fn next_delimiter(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b',' || b == b'[')
        .map_or(bytes.len(), |p| from + p)
}

/// Index just past the closing quote of a string whose content starts at
/// `from`; the end of input when the string is unterminated.
fn string_end(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// Repair and parse a provider body into a generic JSON value.
pub fn parse_body(body: &str) -> Result<Value> {
    let repaired = repair(body);
    serde_json::from_str(&repaired).map_err(|e| TranslationError::ResponseParseFailure {
        message: format!("repaired body is not valid JSON: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_elements_become_null() {
        assert_eq!(repair(r#"[1,,"a,b",]"#), r#"[1,null,"a,b",null]"#);
        assert_eq!(parse_body(r#"[1,,"a,b",]"#).unwrap(), json!([1, null, "a,b", null]));
    }

    #[test]
    fn test_leading_and_consecutive_gaps() {
        assert_eq!(repair("[,,1]"), "[null,null,1]");
        assert_eq!(parse_body("[[,2],,,3]").unwrap(), json!([[null, 2], null, null, 3]));
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let body = r#"["say \"hi\", then [go]",]"#;
        assert_eq!(repair(body), r#"["say \"hi\", then [go]",null]"#);
        assert_eq!(parse_body(body).unwrap(), json!(["say \"hi\", then [go]", null]));
    }

    #[test]
    fn test_escaped_backslash_closes_string() {
        let body = r#"["C:\\",,"x"]"#;
        assert_eq!(parse_body(body).unwrap(), json!(["C:\\", null, "x"]));
    }

    #[test]
    fn test_escaped_quote_before_closing_quote() {
        let body = r#"["\"",]"#;
        assert_eq!(parse_body(body).unwrap(), json!(["\"", null]));
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let body = "[[[\"你好，世界\",\"Hello, world\",,,1]],,\"en\"]";
        assert_eq!(
            parse_body(body).unwrap(),
            json!([[["你好，世界", "Hello, world", null, null, 1]], null, "en"])
        );
    }

    #[test]
    fn test_newlines_between_elements() {
        let body = "[[[\"a\",\"b\"]\n]\n,,\"fr\"]";
        assert_eq!(parse_body(body).unwrap(), json!([[["a", "b"]], null, "fr"]));
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        assert!(matches!(
            parse_body("<html>rate limited</html>"),
            Err(TranslationError::ResponseParseFailure { .. })
        ));
        assert!(parse_body(r#"["unterminated"#).is_err());
    }
}
