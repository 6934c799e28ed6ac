//! The paginated block stream handed to renderers.

use serde::{Deserialize, Serialize};

use super::{Block, Page};

/// Why a page break was inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    /// Opens the document body on a fresh page
    Initial,
    /// Before a title
    SectionBreak,
    /// Before a section or subsection header
    SubsectionBreak,
    /// The page line budget ran out
    Overflow,
}

impl BreakKind {
    /// CSS classes used for the break element in HTML output.
    pub fn css_class(self) -> &'static str {
        match self {
            BreakKind::Initial => "page-break initial-page",
            BreakKind::SectionBreak => "page-break section-break",
            BreakKind::SubsectionBreak => "page-break subsection-break",
            BreakKind::Overflow => "page-break",
        }
    }
}

/// Which line grammar produced a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Explicit `#`/`-` sigils
    #[default]
    Markdown,
    /// Heuristic structure detection
    PlainText,
}

/// One element of a block stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamItem {
    /// A hard page boundary
    Break(BreakKind),
    /// A content block
    Block(Block),
}

impl StreamItem {
    /// Get the break kind if this item is a marker.
    pub fn as_break(&self) -> Option<BreakKind> {
        match self {
            StreamItem::Break(kind) => Some(*kind),
            StreamItem::Block(_) => None,
        }
    }

    /// Get the block if this item is content.
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            StreamItem::Block(block) => Some(block),
            StreamItem::Break(_) => None,
        }
    }
}

/// Ordered blocks and break markers for one parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStream {
    /// Grammar used to classify lines
    pub format: SourceFormat,

    /// Whether break markers were inserted
    pub paginated: bool,

    /// Blocks and markers in document order
    pub items: Vec<StreamItem>,
}

impl BlockStream {
    /// Create an empty stream.
    pub fn new(format: SourceFormat, paginated: bool) -> Self {
        Self {
            format,
            paginated,
            items: Vec::new(),
        }
    }

    /// Create a stream from collected items.
    pub fn from_items(format: SourceFormat, paginated: bool, items: Vec<StreamItem>) -> Self {
        Self {
            format,
            paginated,
            items,
        }
    }

    /// Append an item.
    pub fn push(&mut self, item: StreamItem) {
        self.items.push(item);
    }

    /// Number of items, markers included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stream has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether break markers were inserted.
    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    /// Iterate over all items.
    pub fn iter(&self) -> std::slice::Iter<'_, StreamItem> {
        self.items.iter()
    }

    /// Iterate over content blocks, skipping markers.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.items.iter().filter_map(StreamItem::as_block)
    }

    /// Break markers in order.
    pub fn markers(&self) -> Vec<BreakKind> {
        self.items.iter().filter_map(StreamItem::as_break).collect()
    }

    /// Count markers of one kind.
    pub fn break_count(&self, kind: BreakKind) -> usize {
        self.markers().into_iter().filter(|k| *k == kind).count()
    }

    /// Check if any block carries visible text.
    pub fn has_content(&self) -> bool {
        self.blocks().any(Block::has_text)
    }

    /// Split the stream into pages at break markers.
    ///
    /// Blocks before the first marker (only in unpaginated streams) land on
    /// page 1. Pages without blocks are not produced.
    pub fn pages(&self) -> Vec<Page> {
        let mut pages = Vec::new();
        let mut current = Page::new(1, None);

        for item in &self.items {
            match item {
                StreamItem::Break(kind) => {
                    if current.is_empty() {
                        current.opened_by = Some(*kind);
                    } else {
                        let next = Page::new(current.number + 1, Some(*kind));
                        pages.push(std::mem::replace(&mut current, next));
                    }
                }
                StreamItem::Block(block) => current.add_block(block.clone()),
            }
        }

        if !current.is_empty() {
            pages.push(current);
        }
        pages
    }

    /// Get plain text content of the whole stream.
    pub fn plain_text(&self) -> String {
        self.blocks()
            .filter(|b| !b.is_spacer())
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a BlockStream {
    type Item = &'a StreamItem;
    type IntoIter = std::slice::Iter<'a, StreamItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
