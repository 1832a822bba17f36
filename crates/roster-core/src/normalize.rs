//! Treatment text normalization.
//!
//! Cells carry free text like `도수5(평가) 9시30분 FES 치료먼저`; after a
//! cell's remainder has gone through substitution rules it is cleaned here
//! into a bare treatment code. An empty result, or the equipment-only code,
//! means the cell names no billable treatment.

use std::sync::LazyLock;

use regex::Regex;

/// Code left behind by equipment-only slots; treated as "no treatment".
pub const EQUIPMENT_ONLY_CODE: &str = "FES";

/// Fixed ordering phrases stripped wherever they occur.
const ORDERING_PHRASES: [&str; 2] = ["치료먼저", "기구먼저"];

/// One parenthesized span with no nested parentheses inside.
static PAREN_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("invalid paren span regex"));

/// Time announcements such as `9시` or `10시30분도착`: a 1-2 digit hour,
/// the hour marker, and any attached non-whitespace tail.
static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}시\S*").expect("invalid time token regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Cleans a treatment string down to its code.
///
/// Steps, in order: parenthesized spans are removed innermost-first until
/// none remain (unbalanced parentheses are left in place), exclude keywords
/// are deleted as literal substrings in supplied order, time-announcement
/// tokens and the fixed ordering phrases are stripped, and whitespace is
/// collapsed and trimmed.
///
/// The result may be empty; callers treat an empty string and
/// [`EQUIPMENT_ONLY_CODE`] as "no treatment". Re-running `clean` on its own
/// output changes nothing.
pub fn clean(text: &str, exclude_keywords: &[String]) -> String {
    let mut text = strip_paren_spans(text);
    for keyword in exclude_keywords {
        if !keyword.is_empty() {
            text = text.replace(keyword.as_str(), "");
        }
    }
    let text = TIME_TOKEN.replace_all(&text, "");
    let mut text = text.into_owned();
    for phrase in ORDERING_PHRASES {
        text = text.replace(phrase, "");
    }
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Removes parenthesized spans, innermost first, until a fixpoint.
///
/// A single pass of the span regex leaves the outer shell of nested input
/// like `(a(b)c)` behind, so passes repeat until nothing changes.
fn strip_paren_spans(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = PAREN_SPAN.replace_all(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}
