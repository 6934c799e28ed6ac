//! Input normalization applied before line splitting.

use std::borrow::Cow;

use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Options for input cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Drop a leading byte-order mark
    pub strip_bom: bool,

    /// Convert `\r\n` and lone `\r` to `\n`
    pub normalize_line_endings: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,
}

impl CleanupOptions {
    /// All steps enabled.
    pub fn standard() -> Self {
        Self {
            strip_bom: true,
            normalize_line_endings: true,
            normalize_unicode: true,
        }
    }

    /// All steps disabled.
    pub fn none() -> Self {
        Self {
            strip_bom: false,
            normalize_line_endings: false,
            normalize_unicode: false,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Normalize input text. Borrows when nothing needs to change.
pub fn clean_input<'a>(text: &'a str, options: &CleanupOptions) -> Cow<'a, str> {
    let text = if options.strip_bom {
        text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text)
    } else {
        text
    };
    let mut result = Cow::Borrowed(text);

    if options.normalize_line_endings && result.contains('\r') {
        result = Cow::Owned(result.replace("\r\n", "\n").replace('\r', "\n"));
    }

    if options.normalize_unicode && is_nfc_quick(result.chars()) != IsNormalized::Yes {
        result = Cow::Owned(result.nfc().collect());
    }

    result
}
