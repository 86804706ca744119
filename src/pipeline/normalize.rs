//! Text normalisation: deterministic cleanup of assembled OCR output.
//!
//! ## Rule Order
//!
//! 1. Collapse every run of whitespace (including the page-separator
//!    newlines) into a single space
//! 2. When a script filter is active, drop every character that is neither
//!    whitespace nor inside the script's Unicode range
//! 3. Trim leading and trailing whitespace
//!
//! Filtering runs after collapsing, so removing a token that sat between
//! two spaces leaves a double space behind (`"আমি 42 ভালো"` becomes
//! `"আমি  ভালো"`). Word splitting is unaffected; the whole-document output
//! keeps those spaces as they are.

use crate::config::ScriptRange;
use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all normalisation rules to the assembled full text.
pub fn normalize_text(input: &str, script: Option<ScriptRange>) -> String {
    let s = collapse_whitespace(input);
    let s = match script {
        Some(range) => filter_script(&s, range),
        None => s,
    };
    s.trim().to_string()
}

// ── Rule 1: Collapse whitespace ──────────────────────────────────────────────

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replace every maximal whitespace run with one ASCII space.
pub fn collapse_whitespace(input: &str) -> String {
    RE_WHITESPACE.replace_all(input, " ").into_owned()
}

// ── Rule 2: Restrict to one script ───────────────────────────────────────────

/// Keep whitespace and characters inside `range`; drop everything else.
pub fn filter_script(input: &str, range: ScriptRange) -> String {
    input
        .chars()
        .filter(|&c| c.is_whitespace() || range.contains(c))
        .collect()
}

/// Split normalised text into whitespace-delimited words.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BENGALI_RANGE;

    #[test]
    fn collapses_page_separators_and_tabs() {
        assert_eq!(collapse_whitespace("আমি\nভালো\t\t আছি\n"), "আমি ভালো আছি ");
    }

    #[test]
    fn collapse_is_idempotent() {
        let samples = [
            "  a \n\n b\t\tc  ",
            "আমি\u{00A0}\u{2003}ভালো",
            "",
            "\n\n\n",
            "no-space",
        ];
        for s in samples {
            let once = collapse_whitespace(s);
            assert_eq!(collapse_whitespace(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn unicode_whitespace_is_collapsed() {
        assert_eq!(collapse_whitespace("ক\u{00A0}\u{2003}খ"), "ক খ");
    }

    #[test]
    fn filter_keeps_only_bengali_and_whitespace() {
        let out = normalize_text("Page 1: আমি, ভালো! (আছি)\n", Some(BENGALI_RANGE));
        assert!(out
            .chars()
            .all(|c| c.is_whitespace() || BENGALI_RANGE.contains(c)));
        assert_eq!(words(&out), vec!["আমি", "ভালো", "আছি"]);
    }

    #[test]
    fn filter_leaves_double_space_where_a_token_was_removed() {
        assert_eq!(
            normalize_text("আমি 42 ভালো", Some(BENGALI_RANGE)),
            "আমি  ভালো"
        );
    }

    #[test]
    fn bengali_danda_and_digits_survive_filter() {
        // U+0964 (danda) is in the Devanagari block and is dropped;
        // Bengali digits U+09E6.. are inside the Bengali block.
        assert_eq!(normalize_text("১২৩ আমি।", Some(BENGALI_RANGE)), "১২৩ আমি");
    }

    #[test]
    fn no_filter_preserves_every_character() {
        let out = normalize_text("  Page 1:\n\nআমি, ভালো!  \n", None);
        assert_eq!(out, "Page 1: আমি, ভালো!");
    }

    #[test]
    fn trims_leading_and_trailing() {
        assert_eq!(normalize_text("\n\n আমি \n", Some(BENGALI_RANGE)), "আমি");
        assert_eq!(normalize_text("\n\n \n", None), "");
    }

    #[test]
    fn example_document_normalises_to_single_line() {
        let full = "আমি\nভালো\nআছি\n";
        assert_eq!(normalize_text(full, Some(BENGALI_RANGE)), "আমি ভালো আছি");
    }
}
