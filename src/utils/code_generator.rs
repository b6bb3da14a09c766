//! Short code generation.
//!
//! Codes are random bytes from the operating system CSPRNG encoded as URL-safe
//! base64 without padding.

use std::sync::LazyLock;

use base64::Engine as _;
use regex::Regex;

/// Length of a generated short code in characters.
pub const CODE_LENGTH: usize = 8;

/// Random bytes before base64 encoding. Six bytes encode to exactly eight characters.
const CODE_LENGTH_BYTES: usize = CODE_LENGTH / 4 * 3;

/// Shape of a generated code.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9_-]{{{CODE_LENGTH}}}$")).expect("code regex is valid")
});

/// Failure of the operating system random source.
#[derive(Debug, thiserror::Error)]
#[error("random source unavailable: {0}")]
pub struct EntropyError(pub(crate) String);

/// Generates a random 8-character short code.
///
/// The alphabet is `A-Z`, `a-z`, `0-9`, `-` and `_`. No uniqueness is
/// guaranteed here; callers that care must check the store.
///
/// # Errors
///
/// Returns [`EntropyError`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 8);
/// ```
pub fn generate_code() -> Result<String, EntropyError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| EntropyError(e.to_string()))?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `code` could have been produced by [`generate_code`].
pub fn is_well_formed_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}
