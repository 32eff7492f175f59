//! Splitting long input into request-sized chunks
//!
//! The provider rejects queries whose percent-encoded text is too long, so
//! long input is cut at a word boundary into a head that fits in one request
//! and a tail that is split again as needed.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left unescaped when encoding a URI component
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Upper bound on the encoded length of one chunk
pub const MAX_ENCODED_LEN: usize = 1000;

/// Growth step, in characters, of the head window
const WINDOW_STEP: usize = 100;

/// Length of `text` once percent-encoded as a URI component
pub fn encoded_len(text: &str) -> usize {
    utf8_percent_encode(text, COMPONENT).map(str::len).sum()
}

/// Whether `text` can be sent without splitting
pub fn fits_single_request(text: &str) -> bool {
    encoded_len(text) < MAX_ENCODED_LEN
}

/// A text cut in two; the separating whitespace, if any, belongs to neither side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

/// Byte offset just past the first `chars` characters of `text`
fn prefix_end(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

/// Byte offset of the last character of `text[..end]`
fn back_one(text: &str, end: usize) -> usize {
    text[..end].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Cut `text` into a head that fits in one request and the remaining tail.
///
/// The head window grows in steps of 100 characters while its encoded length
/// stays within [`MAX_ENCODED_LEN`], then backs off to the last whitespace in
/// the window. Without whitespace the window itself is the head. Both sides
/// are non-empty for any text of two or more characters.
pub fn split(text: &str) -> Split<'_> {
    let char_count = text.chars().count();

    let mut window = prefix_end(text, WINDOW_STEP);
    let mut chars = 2 * WINDOW_STEP;
    while chars < char_count {
        let end = prefix_end(text, chars);
        if encoded_len(&text[..end]) > MAX_ENCODED_LEN {
            break;
        }
        window = end;
        chars += WINDOW_STEP;
    }

    // Wide characters can push even the first window over the limit.
    while window > 0 && encoded_len(&text[..window]) > MAX_ENCODED_LEN {
        window = back_one(text, window);
    }
    if window == text.len() {
        window = back_one(text, window);
    }

    let head = &text[..window];
    match head
        .char_indices()
        .rev()
        .find(|&(i, c)| i > 0 && c.is_whitespace())
    {
        Some((i, c)) => Split {
            left: &text[..i],
            right: &text[i + c.len_utf8()..],
        },
        None => Split {
            left: head,
            right: &text[window..],
        },
    }
}
