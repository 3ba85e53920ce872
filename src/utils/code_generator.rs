//! Short code generation and validation utilities.
//!
//! Codes are drawn uniformly, with replacement, from a configured alphabet.
//! The generator knows nothing about stored codes; uniqueness is the job of
//! [`crate::application::services::LinkService`].

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphabet used when `SHORT_CODE_ALPHABET` is not set.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Code length used when `SHORT_CODE_LENGTH` is not set.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Longest short code accepted on the resolve path.
pub const MAX_SHORT_CODE_LENGTH: usize = 64;

/// Top-level path segments owned by other routes.
///
/// With an empty `SHORT_PATH_PREFIX` codes live at `/{code}`, so handing out
/// one of these would store a link that can never be followed.
pub const RESERVED_CODES: &[&str] = &["shorten", "health", "static", "go"];

/// Reasons a generator configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeGeneratorError {
    #[error("short code alphabet must not be empty")]
    EmptyAlphabet,

    #[error("short code alphabet contains '{0}' more than once")]
    DuplicateCharacter(char),

    #[error("short code alphabet may only contain ASCII letters, digits, '-' and '_', got '{0}'")]
    UnsupportedCharacter(char),

    #[error("short code length must be between 1 and {MAX_SHORT_CODE_LENGTH}, got {0}")]
    InvalidLength(usize),
}

/// Produces random short codes of a fixed length from a fixed alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeGenerator {
    /// Builds a generator after checking the alphabet and length.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGeneratorError`] if the alphabet is empty, repeats a
    /// character, contains a character that is not URL-path safe, or if the
    /// length is zero or longer than [`MAX_SHORT_CODE_LENGTH`].
    pub fn new(alphabet: &str, length: usize) -> Result<Self, CodeGeneratorError> {
        if length == 0 || length > MAX_SHORT_CODE_LENGTH {
            return Err(CodeGeneratorError::InvalidLength(length));
        }

        let mut chars: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !is_code_char(c) {
                return Err(CodeGeneratorError::UnsupportedCharacter(c));
            }
            if chars.contains(&c) {
                return Err(CodeGeneratorError::DuplicateCharacter(c));
            }
            chars.push(c);
        }

        if chars.is_empty() {
            return Err(CodeGeneratorError::EmptyAlphabet);
        }

        Ok(Self {
            alphabet: chars,
            length,
        })
    }

    /// Generates one candidate code.
    pub fn generate(&self) -> String {
        generate_code(&self.alphabet, self.length)
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct codes this generator can produce, if it fits in a `u128`.
    pub fn code_space(&self) -> Option<u128> {
        (self.alphabet.len() as u128).checked_pow(self.length as u32)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// Draws `length` characters uniformly at random from `alphabet`.
///
/// Uses the thread-local generator from [`rand::rng`].
///
/// # Panics
///
/// Panics if `alphabet` is empty. [`CodeGenerator::new`] rules that out.
pub fn generate_code(alphabet: &[char], length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

/// Validates a short code taken from a request path before it is looked up.
///
/// # Rules
///
/// - Must not be empty
/// - At most [`MAX_SHORT_CODE_LENGTH`] characters
/// - Only ASCII letters, digits, `-` and `_`
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
pub fn validate_short_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() {
        return Err(AppError::bad_request(
            "Short code must not be empty",
            json!({}),
        ));
    }

    if code.len() > MAX_SHORT_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Short code is too long",
            json!({ "provided_length": code.len(), "max_length": MAX_SHORT_CODE_LENGTH }),
        ));
    }

    if !code.chars().all(is_code_char) {
        return Err(AppError::bad_request(
            "Short code can only contain letters, digits, hyphens and underscores",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

/// Whether `code` collides with a top-level route segment.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
