//! Short code generation and validation utilities.
//!
//! Codes are [`CODE_LENGTH`] symbols drawn uniformly from [`ALPHABET`] using
//! the operating system CSPRNG, so that one user's code cannot be guessed
//! from another's.

use crate::error::AppError;
use serde_json::json;
use thiserror::Error;

/// 26 lowercase + 26 uppercase + 10 digits.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Codes that would be shadowed by fixed routes and are never allocated.
pub const RESERVED_CODES: &[&str] = &["health", "stats", "shorten"];

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or
/// above it are discarded so that `byte % 62` stays uniform.
const REJECTION_LIMIT: u8 = (256 - 256 % ALPHABET.len()) as u8;

/// The entropy source could not be read.
#[derive(Debug, Error)]
#[error("random source unavailable: {0}")]
pub struct RandomSourceError(#[from] getrandom::Error);

impl From<RandomSourceError> for AppError {
    fn from(e: RandomSourceError) -> Self {
        tracing::error!(operation = "code_generator.generate", error = %e, "failed to generate short code");
        AppError::internal("Server error", json!({}))
    }
}

/// Source of candidate short codes.
///
/// Implementations are pure generators; uniqueness is the store's concern.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync + 'static {
    fn generate(&self) -> Result<String, RandomSourceError>;
}

/// [`CodeGenerator`] backed by the operating system random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, RandomSourceError> {
        generate_code()
    }
}

/// Generates a random short code of [`CODE_LENGTH`] symbols.
///
/// # Errors
///
/// Returns [`RandomSourceError`] if the operating system random source fails.
/// There is no fallback to a weaker generator.
pub fn generate_code() -> Result<String, RandomSourceError> {
    let mut code = String::with_capacity(CODE_LENGTH);
    // Expected rejections are ~3%, so one refill is almost always enough.
    let mut buffer = [0u8; CODE_LENGTH * 2];

    while code.len() < CODE_LENGTH {
        getrandom::fill(&mut buffer)?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_LIMIT) {
            if code.len() == CODE_LENGTH {
                break;
            }
            code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
        }
    }

    Ok(code)
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code().unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_uses_alphabet() {
        for _ in 0..200 {
            let code = generate_code().unwrap();
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code().unwrap()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_covers_alphabet() {
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.extend(generate_code().unwrap().bytes());
        }
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn test_rejection_limit() {
        assert_eq!(REJECTION_LIMIT, 248);
        assert_eq!(usize::from(REJECTION_LIMIT) % ALPHABET.len(), 0);
    }

    #[test]
    fn test_random_generator_trait() {
        let generator = RandomCodeGenerator::new();
        let code = generator.generate().unwrap();
        assert!(is_valid_code(&code));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("aB3xY9"));
        assert!(is_valid_code("000000"));
        assert!(!is_valid_code("abc12"));
        assert!(!is_valid_code("abc1234"));
        assert!(!is_valid_code("abc-12"));
        assert!(!is_valid_code("ab c12"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("ábc123"));
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved_code("health"));
        assert!(is_reserved_code("stats"));
        assert!(!is_reserved_code("Health"));
        assert!(!is_reserved_code("abc123"));
    }
}
