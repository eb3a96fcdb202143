//! Wait-time hint extraction
//!
//! Rate-limit rejections embed a wait time in the error body in a handful
//! of server-observed shapes (`{"wait": 30}`, `retry_after: 30`, prose
//! "wait 30 seconds"). The pipeline never sleeps on these; the extracted
//! value rides along on the error for the caller to act on.

use once_cell::sync::Lazy;
use regex::Regex;

static HINT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)подожди(?:те)?\s*(\d+)",
        r#"(?i)wait["']?\s*:?\s*(\d+)"#,
        r#"(?i)retry[_-]?after["']?\s*:?\s*(\d+)"#,
        r#"(?i)timeout["']?\s*:\s*(\d+)"#,
        r"(?i)(\d+)\s*секунд",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Extract a wait time in seconds from an error body, if one is embedded.
#[must_use]
pub fn wait_hint(body: &str) -> Option<u64> {
    HINT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(body)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}
