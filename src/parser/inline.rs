//! Inline emphasis formatting.
//!
//! `**bold**` spans are taken first; `*italic*` is then matched only in the
//! text between bold spans. Emphasis never nests, and there is no escape
//! for a literal asterisk. Unmatched markers stay in the text as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::TextRun;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic pattern"));

/// Split a line of text into styled runs.
///
/// # Example
/// ```
/// use pagemark::parser::format_inline;
/// use pagemark::model::TextRun;
///
/// let runs = format_inline("a **b** c");
/// assert_eq!(runs, vec![TextRun::new("a "), TextRun::bold("b"), TextRun::new(" c")]);
/// ```
pub fn format_inline(text: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_italic_runs(&text[last..whole.start()], &mut runs);
        runs.push(TextRun::bold(inner.as_str()));
        last = whole.end();
    }
    push_italic_runs(&text[last..], &mut runs);

    runs
}

fn push_italic_runs(segment: &str, runs: &mut Vec<TextRun>) {
    let mut last = 0;

    for caps in ITALIC.captures_iter(segment) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&segment[last..whole.start()], runs);
        runs.push(TextRun::italic(inner.as_str()));
        last = whole.end();
    }
    push_plain(&segment[last..], runs);
}

fn push_plain(text: &str, runs: &mut Vec<TextRun>) {
    if !text.is_empty() {
        runs.push(TextRun::new(text));
    }
}
