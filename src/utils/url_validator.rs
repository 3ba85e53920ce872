//! Long URL validation.
//!
//! A candidate is accepted only if it passes two independent checks:
//!
//! 1. It parses as an absolute URL with a scheme and a host ([`url::Url`]).
//! 2. It matches a conservative web-URL pattern.
//!
//! The parser is lenient (it happily accepts `http://example..com` or
//! `htp://example.com`); the pattern rejects those.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `http`/`https`, dot-separated host labels, an alphabetic top-level label of
/// 2-63 characters, then optional port, path, query and fragment.
static WEB_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:[\w-]+\.)+[a-zA-Z]{2,63}(?::\d{1,5})?(?:/[^\s?#]*)?(?:\?[^\s#]*)?(?:#\S*)?$",
    )
    .unwrap()
});

/// Returns whether `candidate` is acceptable as a long URL.
///
/// Pure predicate: no normalization is applied and the input is stored
/// verbatim when accepted.
///
/// # Examples
///
/// ```
/// use golink::utils::url_validator::is_valid_long_url;
///
/// assert!(is_valid_long_url("https://sub.example.com/path?q=1"));
/// assert!(!is_valid_long_url("http://example..com"));
/// ```
pub fn is_valid_long_url(candidate: &str) -> bool {
    parses_as_absolute_url(candidate) && WEB_URL_REGEX.is_match(candidate)
}

fn parses_as_absolute_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => !url.cannot_be_a_base() && url.has_host(),
        Err(_) => false,
    }
}
