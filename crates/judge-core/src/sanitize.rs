//! Pure text transforms applied to captured compiler/runtime output.
//!
//! The three functions here are deliberately small and independent so each
//! can be unit tested in isolation; the order they're composed in by the
//! engine (`strip_backtrace` before `clean_error` before `clean_str`) is
//! significant and documented at the call sites.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::messages;

static HOST_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(?:tmp|sandbox)/\S*\.rs").expect("static regex is valid"));

static BACKTRACE_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+:\s").expect("static regex is valid"));

/// Strips `\r`, trims trailing `\n`, and normalizes an empty result to
/// `None`.
pub fn clean_str(value: Option<&str>) -> Option<String> {
    let value = value?;
    let cleaned = value.replace('\r', "");
    let cleaned = cleaned.trim_end_matches('\n');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Rewrites host paths to `main.rs` and classifies known failure signatures
/// into a canonical message. Passes unrecognized text through unchanged.
pub fn clean_error(value: Option<&str>) -> Option<String> {
    let value = value?;
    let rewritten = HOST_PATH.replace_all(value, "main.rs");

    let classified = if rewritten.contains("panicked at") {
        messages::PANIC.to_string()
    } else if rewritten.contains("error[E") {
        messages::COMPILE_FAILURE.to_string()
    } else if rewritten.contains("Terminated") {
        messages::TIMEOUT.to_string()
    } else if rewritten.contains("the monitored command dumped core") {
        messages::MISSING_STDIN.to_string()
    } else {
        rewritten.into_owned()
    };

    if classified.is_empty() {
        None
    } else {
        Some(classified)
    }
}

/// Removes a trailing `stack backtrace:` section and any `note:` line
/// mentioning `RUST_BACKTRACE`.
pub fn strip_backtrace(value: &str) -> String {
    let mut out = Vec::new();
    let mut skipping = false;

    for line in value.lines() {
        if !skipping && line.trim_start().eq_ignore_ascii_case("stack backtrace:") {
            skipping = true;
            continue;
        }

        if skipping {
            if line.trim().is_empty() || BACKTRACE_FRAME.is_match(line) {
                continue;
            }
            skipping = false;
        }

        if line.starts_with("note:") && line.contains("RUST_BACKTRACE") {
            continue;
        }

        out.push(line);
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_cr_and_trailing_newlines() {
        assert_eq!(clean_str(Some("a\r\nb\n\n")), Some("a\nb".to_string()));
    }

    #[test]
    fn clean_str_empty_becomes_none() {
        assert_eq!(clean_str(Some("")), None);
        assert_eq!(clean_str(Some("\n\n")), None);
        assert_eq!(clean_str(None), None);
    }

    #[test]
    fn clean_str_is_idempotent() {
        let once = clean_str(Some("a\r\nb\n\n"));
        let twice = clean_str(once.as_deref());
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_error_rewrites_sandbox_paths() {
        let input = "/sandbox/sandbox_proj_abc123/src/main.rs: error: oops";
        let out = clean_error(Some(input)).unwrap();
        assert!(!out.contains("/sandbox/"));
    }

    #[test]
    fn clean_error_classifies_compile_error() {
        let out = clean_error(Some("error[E0308]: mismatched types")).unwrap();
        assert_eq!(out, messages::COMPILE_FAILURE);
    }

    #[test]
    fn clean_error_classifies_panic() {
        let out = clean_error(Some("thread 'main' panicked at 'oops', src/main.rs:1")).unwrap();
        assert_eq!(out, messages::PANIC);
    }

    #[test]
    fn clean_error_classifies_timeout() {
        let out = clean_error(Some("Terminated")).unwrap();
        assert_eq!(out, messages::TIMEOUT);
    }

    #[test]
    fn clean_error_classifies_missing_stdin() {
        let out = clean_error(Some("the monitored command dumped core")).unwrap();
        assert_eq!(out, messages::MISSING_STDIN);
    }

    #[test]
    fn clean_error_passes_through_unrecognized_text() {
        let out = clean_error(Some("some other message")).unwrap();
        assert_eq!(out, "some other message");
    }

    #[test]
    fn strip_backtrace_removes_frames_and_header() {
        let input = "thread 'main' panicked at 'x', src/main.rs:1\nstack backtrace:\n   0: core::panic\n   1: main::run\n\nnote: run with `RUST_BACKTRACE=1` for a backtrace";
        let out = strip_backtrace(input);
        assert_eq!(out, "thread 'main' panicked at 'x', src/main.rs:1");
    }

    #[test]
    fn strip_backtrace_is_idempotent() {
        let input = "a\nstack backtrace:\n   0: x";
        let once = strip_backtrace(input);
        let twice = strip_backtrace(&once);
        assert_eq!(once, twice);
    }
}
