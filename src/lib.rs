//! # pagemark
//!
//! Structure detection and heuristic pagination for markdown-ish text.
//!
//! This library classifies each line of a document as a title, header,
//! list item or paragraph, groups list items into lists, and inserts page
//! break markers using weighted line counts so that content roughly fills
//! fixed-size printed pages.
//!
//! ## Quick Start
//!
//! ```
//! use pagemark::{parse_markdown, PageBreakOptions, BreakKind};
//!
//! let stream = parse_markdown("# Report\n## Summary\nAll good.", &PageBreakOptions::default());
//! assert_eq!(stream.markers()[0], BreakKind::Initial);
//!
//! let html = pagemark::render::to_html(&stream, &Default::default()).unwrap();
//! assert!(html.contains("<h1>Report</h1>"));
//! ```
//!
//! ## Features
//!
//! - **Two grammars**: explicit `#`/`-` sigils, or heuristics for plain text
//! - **Pagination**: header-aware breaks plus an overflow safety valve
//! - **Streaming**: lazy parsing one line at a time
//! - **Output formats**: HTML with print stylesheet, plain text, JSON

pub mod cleanup;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use cleanup::CleanupOptions;
pub use detect::detect_format;
pub use error::{Error, Result};
pub use model::{
    Block, BlockKind, BlockStream, BreakKind, ContentBlock, ListBlock, ListItem, ListKind, Page,
    PageSize, SourceFormat, StreamItem, TextRun, TextStyle,
};
pub use parser::{DocumentParser, PageBreakOptions, PaginatedBlocks, ParseMode, ParseOptions};
pub use render::{JsonFormat, RenderOptions, StreamStats};

use std::io::Read;
use std::path::Path;

/// Parse text with the markdown grammar and paginate it.
///
/// # Example
///
/// ```
/// use pagemark::{parse_markdown, PageBreakOptions};
///
/// let stream = parse_markdown("- a\n- b", &PageBreakOptions::default());
/// assert_eq!(stream.blocks().count(), 1);
/// ```
pub fn parse_markdown(text: &str, options: &PageBreakOptions) -> BlockStream {
    let options = ParseOptions::new().markdown().with_page_breaks(*options);
    DocumentParser::new(options).parse(text)
}

/// Parse text with the heuristic plain-text grammar and paginate it.
pub fn parse_plain_text(text: &str, options: &PageBreakOptions) -> BlockStream {
    let options = ParseOptions::new().plain_text().with_page_breaks(*options);
    DocumentParser::new(options).parse(text)
}

/// Parse text with full control over the grammar and pagination.
///
/// # Example
///
/// ```
/// use pagemark::{parse, ParseOptions, SourceFormat};
///
/// let stream = parse("Project Plan\nWe start in May.", &ParseOptions::default());
/// assert_eq!(stream.format, SourceFormat::PlainText);
/// ```
pub fn parse(text: &str, options: &ParseOptions) -> BlockStream {
    DocumentParser::new(options.clone()).parse(text)
}

/// Classify and assemble text without inserting break markers.
pub fn parse_unpaginated(text: &str, mode: ParseMode) -> BlockStream {
    let options = ParseOptions::new().with_mode(mode);
    DocumentParser::new(options).parse_unpaginated(text)
}

/// Read and parse a UTF-8 text file.
///
/// # Example
///
/// ```no_run
/// use pagemark::{parse_file, ParseOptions};
///
/// let stream = parse_file("notes.md", &ParseOptions::default()).unwrap();
/// println!("Pages: {}", stream.pages().len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<BlockStream> {
    let path = path.as_ref();
    log::debug!("Reading {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Ok(parse(&text, options))
}

/// Read and parse UTF-8 text from a reader.
pub fn parse_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<BlockStream> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse(&text, options))
}

/// Convert text to an HTML fragment with default options.
///
/// # Example
///
/// ```
/// let html = pagemark::to_html("## Setup\n- **fast**").unwrap();
/// assert!(html.contains("<li><strong>fast</strong></li>"));
/// ```
pub fn to_html(text: &str) -> Result<String> {
    let stream = parse(text, &ParseOptions::default());
    render::to_html(&stream, &RenderOptions::default())
}

/// Convert text to paginated plain text with default options.
pub fn to_text(text: &str) -> Result<String> {
    let stream = parse(text, &ParseOptions::default());
    render::to_text(&stream, &RenderOptions::default())
}

/// Convert text to the JSON form of its block stream.
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    let stream = parse(text, &ParseOptions::default());
    render::to_json(&stream, format)
}

/// Builder for parsing and rendering documents.
///
/// # Example
///
/// ```
/// use pagemark::{Pagemark, PageSize};
///
/// let html = Pagemark::new()
///     .markdown()
///     .with_section_breaks(false)
///     .with_page_capacity(50)
///     .with_page_size(PageSize::A4)
///     .standalone()
///     .parse("# Title\nBody")
///     .to_html()?;
/// assert!(html.contains("size: A4;"));
/// # Ok::<(), pagemark::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pagemark {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Pagemark {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the markdown grammar.
    pub fn markdown(mut self) -> Self {
        self.parse_options = self.parse_options.markdown();
        self
    }

    /// Force the heuristic plain-text grammar.
    pub fn plain_text(mut self) -> Self {
        self.parse_options = self.parse_options.plain_text();
        self
    }

    /// Set the grammar selection.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.parse_options = self.parse_options.with_mode(mode);
        self
    }

    /// Enable or disable breaks before titles.
    pub fn with_section_breaks(mut self, enabled: bool) -> Self {
        let breaks = self.parse_options.page_breaks.with_section_breaks(enabled);
        self.parse_options = self.parse_options.with_page_breaks(breaks);
        self
    }

    /// Enable or disable breaks before section headers.
    pub fn with_subsection_breaks(mut self, enabled: bool) -> Self {
        let breaks = self.parse_options.page_breaks.with_subsection_breaks(enabled);
        self.parse_options = self.parse_options.with_page_breaks(breaks);
        self
    }

    /// Set the page line budget.
    pub fn with_page_capacity(mut self, lines: u32) -> Self {
        let breaks = self.parse_options.page_breaks.with_page_capacity(lines);
        self.parse_options = self.parse_options.with_page_breaks(breaks);
        self
    }

    /// Do not insert break markers.
    pub fn unpaginated(mut self) -> Self {
        self.parse_options = self.parse_options.unpaginated();
        self
    }

    /// Set the paper size for rendering.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(size);
        self
    }

    /// Render HTML as a complete document.
    pub fn standalone(mut self) -> Self {
        self.render_options = self.render_options.with_standalone(true);
        self
    }

    /// Number pages in rendered output.
    pub fn with_page_numbers(mut self) -> Self {
        self.render_options = self.render_options.with_page_numbers(true);
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Parse text and return a result wrapper.
    pub fn parse(self, text: &str) -> PagemarkResult {
        let stream = DocumentParser::new(self.parse_options).parse(text);
        PagemarkResult {
            stream,
            render_options: self.render_options,
        }
    }

    /// Read and parse a file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<PagemarkResult> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.parse(&text))
    }
}

/// Result of parsing a document.
#[derive(Debug, Clone)]
pub struct PagemarkResult {
    /// The parsed stream
    pub stream: BlockStream,
    /// Render options to use
    render_options: RenderOptions,
}

impl PagemarkResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.stream, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.stream, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.stream, format)
    }

    /// Get statistics for the stream.
    pub fn stats(&self) -> StreamStats {
        StreamStats::from_stream(&self.stream)
    }

    /// Split the stream into pages.
    pub fn pages(&self) -> Vec<Page> {
        self.stream.pages()
    }

    /// Get plain text without structure.
    pub fn plain_text(&self) -> String {
        self.stream.plain_text()
    }

    /// Get the stream.
    pub fn stream(&self) -> &BlockStream {
        &self.stream
    }
}
