//! Request token generation
//!
//! The provider rejects requests whose `tk` parameter does not match a hash of
//! the query text keyed by a two-part seed (`TKK`) published on its web page.

use async_trait::async_trait;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Source of the per-request `tk` value
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    /// Token for exactly this text
    async fn generate(&self, text: &str) -> Result<String>;
}

/// Two-part hash seed, written `high.low`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tkk {
    high: i64,
    low: i64,
}

impl Tkk {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || TranslationError::TokenGenerationFailure {
            message: format!("invalid TKK seed: {:?}", raw),
        };

        let (high, low) = raw.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            high: high.parse().map_err(|_| invalid())?,
            low: low.parse().map_err(|_| invalid())?,
        })
    }
}

/// Applies a sequence of three-byte shift/mix ops to `a` with 32-bit wrapping.
///
/// Each op is `[mix, dir, amount]`: mix `+` adds and anything else xors, dir
/// `+` is a logical right shift and anything else a left shift, and amount is
/// a digit or a lowercase letter (`a` = 10).
fn mix(mut a: i64, ops: &[u8]) -> i64 {
    for op in ops.chunks_exact(3) {
        let amount = match op[2] {
            c @ b'a'..=b'z' => u32::from(c - 87),
            c => u32::from(c - b'0'),
        };
        let d = if op[1] == b'+' {
            i64::from((a as u32) >> amount)
        } else {
            i64::from((a as i32).wrapping_shl(amount))
        };
        a = if op[0] == b'+' {
            i64::from((a + d) as i32)
        } else {
            i64::from((a as i32) ^ (d as i32))
        };
    }
    a
}

/// Token generator keyed by a fixed seed
#[derive(Debug, Clone)]
pub struct TkkTokenGenerator {
    tkk: Tkk,
}

impl TkkTokenGenerator {
    pub fn new(tkk: Tkk) -> Self {
        Self { tkk }
    }

    pub fn from_seed(raw: &str) -> Result<Self> {
        Ok(Self::new(Tkk::parse(raw)?))
    }

    /// Hash `text` (as UTF-8 bytes) into the `a.b` token form
    pub fn token(&self, text: &str) -> String {
        let mut a = self.tkk.high;
        for &byte in text.as_bytes() {
            a += i64::from(byte);
            a = mix(a, b"+-a^+6");
        }
        a = mix(a, b"+-3^+b+-f");
        a = i64::from((a as i32) ^ (self.tkk.low as i32));
        if a < 0 {
            a = (a & 0x7fff_ffff) + 0x8000_0000;
        }
        a %= 1_000_000;

        format!("{}.{}", a, (a as i32) ^ (self.tkk.high as i32))
    }
}

#[async_trait]
impl TokenGenerator for TkkTokenGenerator {
    async fn generate(&self, text: &str) -> Result<String> {
        let token = self.token(text);
        debug!("Generated token {} for {} bytes", token, text.len());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tkk_parse() {
        assert_eq!(
            Tkk::parse("448487.932609646").unwrap(),
            Tkk { high: 448487, low: 932609646 }
        );
        assert!(Tkk::parse("448487").is_err());
        assert!(Tkk::parse("a.b").is_err());
    }

    #[test]
    fn test_mix_wraps_to_32_bits() {
        // 1 << 10 then xor with itself shifted right by 6
        assert_eq!(mix(1, b"+-a^+6"), 1025 ^ (1025 >> 6));
        assert_eq!(mix(0x7fff_ffff, b"+-1"), i64::from(0x7fff_ffffi32.wrapping_add(-2)));
    }

    #[test]
    fn test_token_shape() {
        let generator = TkkTokenGenerator::from_seed("448487.932609646").unwrap();
        let token = generator.token("Hello");

        let (first, second) = token.split_once('.').unwrap();
        let first: i32 = first.parse().unwrap();
        let second: i32 = second.parse().unwrap();
        assert!((0..1_000_000).contains(&first));
        assert_eq!(second, first ^ 448487);
    }

    #[tokio::test]
    async fn test_token_depends_on_text() {
        let generator = TkkTokenGenerator::from_seed("448487.932609646").unwrap();

        let a = generator.generate("Hello").await.unwrap();
        let b = generator.generate("Hello").await.unwrap();
        let c = generator.generate("Hello world").await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
