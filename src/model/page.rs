//! Page-level types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Block, BreakKind};
use crate::error::Error;

/// Blocks that share one printed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Marker that started this page, if any
    pub opened_by: Option<BreakKind>,

    /// Content blocks on the page
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32, opened_by: Option<BreakKind>) -> Self {
        Self {
            number,
            opened_by,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| !b.is_spacer())
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Named paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 8.5 x 11 inches
    #[default]
    Letter,
    /// 210 x 297 mm
    A4,
    /// 8.5 x 14 inches
    Legal,
    /// 11 x 17 inches
    Tabloid,
}

impl PageSize {
    /// All supported sizes.
    pub const ALL: [PageSize; 4] = [
        PageSize::Letter,
        PageSize::A4,
        PageSize::Legal,
        PageSize::Tabloid,
    ];

    /// Page dimensions in points (1 point = 1/72 inch) as (width, height).
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),   // 8.5 * 72, 11 * 72
            PageSize::A4 => (595.0, 842.0),       // 210mm * 2.834, 297mm * 2.834
            PageSize::Legal => (612.0, 1008.0),   // 8.5 * 72, 14 * 72
            PageSize::Tabloid => (792.0, 1224.0), // 11 * 72, 17 * 72
        }
    }

    /// Page dimensions as CSS lengths (width, height).
    pub fn css_dimensions(self) -> (&'static str, &'static str) {
        match self {
            PageSize::Letter => ("8.5in", "11in"),
            PageSize::A4 => ("210mm", "297mm"),
            PageSize::Legal => ("8.5in", "14in"),
            PageSize::Tabloid => ("11in", "17in"),
        }
    }

    /// Size name as accepted by print dialogs.
    pub fn print_name(self) -> &'static str {
        match self {
            PageSize::Letter => "Letter",
            PageSize::A4 => "A4",
            PageSize::Legal => "Legal",
            PageSize::Tabloid => "Tabloid",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.print_name())
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            "legal" => Ok(PageSize::Legal),
            "tabloid" => Ok(PageSize::Tabloid),
            other => Err(Error::InvalidOption(format!("unknown page size '{}'", other))),
        }
    }
}
