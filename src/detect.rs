//! Input format detection.
//!
//! A document is treated as markdown as soon as any emphasis or heading
//! sigil appears anywhere in it; only text with no sigils at all goes
//! through heuristic structure detection.

use crate::model::SourceFormat;

/// Substrings that mark a document as markdown.
const MARKDOWN_SIGILS: [&str; 4] = ["#", "**", "*", "- "];

/// Check if the text contains any markdown sigil.
///
/// # Example
/// ```
/// use pagemark::detect::has_markdown_sigils;
///
/// assert!(has_markdown_sigils("## Setup"));
/// assert!(!has_markdown_sigils("Setup Guide"));
/// ```
pub fn has_markdown_sigils(text: &str) -> bool {
    MARKDOWN_SIGILS.iter().any(|sigil| text.contains(sigil))
}

/// Pick the line grammar for a document.
pub fn detect_format(text: &str) -> SourceFormat {
    if has_markdown_sigils(text) {
        SourceFormat::Markdown
    } else {
        SourceFormat::PlainText
    }
}
