//! Parsing options and configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cleanup::CleanupOptions;
use crate::detect::detect_format;
use crate::error::{Error, Result};
use crate::model::SourceFormat;

/// Default page line budget.
pub const DEFAULT_PAGE_CAPACITY: u32 = 30;

/// Page-break preferences, read-only during a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBreakOptions {
    /// Break before every title after the first block
    pub section_breaks: bool,

    /// Break before every section header except the first
    pub subsection_breaks: bool,

    /// Weighted lines that fit on one page. Long documents read better
    /// with a larger budget such as 50.
    pub page_capacity: u32,
}

impl PageBreakOptions {
    /// Create page-break options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable breaks before titles.
    pub fn with_section_breaks(mut self, enabled: bool) -> Self {
        self.section_breaks = enabled;
        self
    }

    /// Enable or disable breaks before section headers.
    pub fn with_subsection_breaks(mut self, enabled: bool) -> Self {
        self.subsection_breaks = enabled;
        self
    }

    /// Set the page line budget (at least 1).
    pub fn with_page_capacity(mut self, lines: u32) -> Self {
        self.page_capacity = lines.max(1);
        self
    }

    /// Check that the options describe a usable page.
    pub fn validate(&self) -> Result<()> {
        if self.page_capacity == 0 {
            return Err(Error::InvalidOption(
                "page capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Page capacity as a line count.
    pub fn capacity(&self) -> f32 {
        self.page_capacity.max(1) as f32
    }
}

impl Default for PageBreakOptions {
    fn default() -> Self {
        Self {
            section_breaks: true,
            subsection_breaks: true,
            page_capacity: DEFAULT_PAGE_CAPACITY,
        }
    }
}

/// Which line grammar to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Markdown if any sigil appears, plain text otherwise
    #[default]
    Auto,
    /// Explicit sigils
    Markdown,
    /// Heuristic detection
    PlainText,
}

impl ParseMode {
    /// Resolve to a concrete format for the given text.
    pub fn resolve(self, text: &str) -> SourceFormat {
        match self {
            ParseMode::Auto => detect_format(text),
            ParseMode::Markdown => SourceFormat::Markdown,
            ParseMode::PlainText => SourceFormat::PlainText,
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseMode::Auto => "auto",
            ParseMode::Markdown => "markdown",
            ParseMode::PlainText => "plain",
        };
        f.write_str(name)
    }
}

impl FromStr for ParseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ParseMode::Auto),
            "markdown" | "md" => Ok(ParseMode::Markdown),
            "plain" | "text" | "plain_text" => Ok(ParseMode::PlainText),
            other => Err(Error::InvalidOption(format!("unknown parse mode '{}'", other))),
        }
    }
}

/// Options for parsing documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Line grammar selection
    pub mode: ParseMode,

    /// Page-break preferences
    pub page_breaks: PageBreakOptions,

    /// Whether to insert break markers at all
    pub paginate: bool,

    /// Recognize `1. ` lines as numbered items in markdown mode
    pub markdown_ordered_lists: bool,

    /// Input normalization before splitting into lines
    pub cleanup: CleanupOptions,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse mode.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Force markdown grammar.
    pub fn markdown(mut self) -> Self {
        self.mode = ParseMode::Markdown;
        self
    }

    /// Force heuristic plain-text grammar.
    pub fn plain_text(mut self) -> Self {
        self.mode = ParseMode::PlainText;
        self
    }

    /// Set page-break preferences.
    pub fn with_page_breaks(mut self, page_breaks: PageBreakOptions) -> Self {
        self.page_breaks = page_breaks;
        self
    }

    /// Enable or disable break insertion.
    pub fn with_pagination(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }

    /// Disable break insertion.
    pub fn unpaginated(mut self) -> Self {
        self.paginate = false;
        self
    }

    /// Enable or disable numbered items in markdown mode.
    pub fn with_markdown_ordered_lists(mut self, enabled: bool) -> Self {
        self.markdown_ordered_lists = enabled;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Auto,
            page_breaks: PageBreakOptions::default(),
            paginate: true,
            markdown_ordered_lists: true,
            cleanup: CleanupOptions::standard(),
        }
    }
}
