//! Input sanitization and secure DTO construction
//!
//! Sanitization degrades hostile input to a safe form instead of rejecting
//! it; schema and shape validation stay with the caller.

mod dto;

pub use dto::{DEFAULT_SENSITIVE_FIELDS, create_secure_dto, strip_rows};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Pre-compiled scrub patterns. These are static known-good patterns; a
// compile failure is a code error caught by the tests below.

/// Inline script blocks, case-insensitive, spanning newlines
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").unwrap());

/// Any remaining markup tag (or dangling open bracket)
static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").unwrap());

/// `javascript:` scheme references
static JS_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:").unwrap());

/// Inline event-handler attribute assignments (`onclick=`, `onload=`, ...)
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bon\w+\s*=").unwrap());

fn scrub_once(input: &str) -> String {
    let out = SCRIPT_BLOCK.replace_all(input, "");
    let out = MARKUP_TAG.replace_all(&out, "");
    let out = JS_SCHEME.replace_all(&out, "");
    let out = EVENT_HANDLER.replace_all(&out, "");
    out.into_owned()
}

fn scrub(input: &str) -> String {
    // Run to a fixpoint: removal can splice new matches together
    // ("jjavascript:avascript:"), and the transform must be idempotent.
    let mut current = input.to_string();
    loop {
        let next = scrub_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Recursively sanitize every string leaf of a value.
///
/// Strips script blocks, markup tags, `javascript:` scheme references, and
/// inline event-handler assignments. Non-string leaves pass through
/// unchanged and the value's shape is preserved. Idempotent: sanitizing
/// sanitized output yields the same output. Never fails.
pub fn sanitize_input(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(scrub(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_input).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sanitize_input(value)))
                .collect(),
        ),
        other => other,
    }
}
