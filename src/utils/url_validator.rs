//! Validation of URLs submitted for shortening.

use url::Url;

/// Schemes accepted as redirect targets: the WHATWG special schemes that
/// carry a network host.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss"];

/// Returns true if `input` is an absolute URL with a recognized network
/// scheme and a non-empty host.
///
/// The input is checked as given: it is not trimmed and the accepted string
/// is what gets stored. Rejected inputs include relative references, bare
/// hostnames, `mailto:`/`javascript:`/`data:` URLs and anything the `url`
/// crate cannot parse.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/path"));
/// assert!(!is_valid_url("not-a-url"));
/// assert!(!is_valid_url("javascript:alert(1)"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    if input.is_empty() || input.trim() != input {
        return false;
    }

    let Ok(url) = Url::parse(input) else {
        return false;
    };

    ALLOWED_SCHEMES.contains(&url.scheme())
        && !url.cannot_be_a_base()
        && url.host_str().is_some_and(|host| !host.is_empty())
}
