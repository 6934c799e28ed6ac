//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::PageSize;

/// Options for rendering a block stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Paper size for the print stylesheet
    pub page_size: PageSize,

    /// Wrap HTML output in a complete document
    pub standalone: bool,

    /// Emit a stylesheet in standalone HTML output
    pub include_styles: bool,

    /// Number pages in the output
    pub show_page_numbers: bool,

    /// Document title for standalone HTML (defaults to the first heading)
    pub title: Option<String>,

    /// Typography and margins for the print stylesheet
    pub style: PrintStyle,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Enable or disable standalone document output.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Enable or disable the stylesheet.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Enable or disable page numbers.
    pub fn with_page_numbers(mut self, show: bool) -> Self {
        self.show_page_numbers = show;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the print style.
    pub fn with_style(mut self, style: PrintStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            standalone: false,
            include_styles: true,
            show_page_numbers: false,
            title: None,
            style: PrintStyle::default(),
            collect_stats: false,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left
    #[default]
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
    /// Justified
    Justify,
}

impl TextAlign {
    /// CSS `text-align` value.
    pub fn css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css())
    }
}

impl FromStr for TextAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            other => Err(Error::InvalidOption(format!("unknown alignment '{}'", other))),
        }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(inches: f32) -> Self {
        let inches = inches.max(0.0);
        Self {
            top: inches,
            right: inches,
            bottom: inches,
            left: inches,
        }
    }

    /// CSS `margin` shorthand.
    pub fn css(&self) -> String {
        format!(
            "{}in {}in {}in {}in",
            self.top, self.right, self.bottom, self.left
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Typography for standalone HTML output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintStyle {
    /// Font family for titles
    pub title_font: String,
    /// Font family for section and subsection headers
    pub header_font: String,
    /// Font family for body text
    pub body_font: String,

    /// Title size in pixels
    pub title_size: u32,
    /// Section header size in pixels (subsections are 4px smaller)
    pub header_size: u32,
    /// Body text size in pixels
    pub body_size: u32,

    /// Title color
    pub title_color: String,
    /// Header color
    pub header_color: String,
    /// Body text color
    pub body_color: String,
    /// Title underline color
    pub accent_color: String,

    /// Title alignment
    pub title_align: TextAlign,
    /// Header alignment
    pub header_align: TextAlign,
    /// Body alignment
    pub body_align: TextAlign,

    /// Line height multiplier
    pub line_spacing: f32,

    /// Page margins
    pub margins: Margins,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            title_font: "Inter".to_string(),
            header_font: "Inter".to_string(),
            body_font: "Inter".to_string(),
            title_size: 32,
            header_size: 24,
            body_size: 14,
            title_color: "#1e293b".to_string(),
            header_color: "#1e293b".to_string(),
            body_color: "#1e293b".to_string(),
            accent_color: "#3b82f6".to_string(),
            title_align: TextAlign::Left,
            header_align: TextAlign::Left,
            body_align: TextAlign::Left,
            line_spacing: 1.5,
            margins: Margins::default(),
        }
    }
}
