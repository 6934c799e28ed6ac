//! Block-level types produced by classification and assembly.

use serde::{Deserialize, Serialize};

use super::{plain_text, TextRun};

/// Structural role assigned to a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Document title (one per plain-text document)
    Title,
    /// Section header
    SectionHeader,
    /// Subsection header
    SubsectionHeader,
    /// Bulleted list entry
    BulletItem,
    /// Numbered list entry
    NumberedItem,
    /// Body text
    Paragraph,
    /// Empty line
    Blank,
}

impl BlockKind {
    /// Check if this kind is one of the three heading tiers.
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            BlockKind::Title | BlockKind::SectionHeader | BlockKind::SubsectionHeader
        )
    }

    /// Check if this kind is a list entry.
    pub fn is_list_item(self) -> bool {
        self.list_kind().is_some()
    }

    /// Get the list a line of this kind belongs to.
    pub fn list_kind(self) -> Option<ListKind> {
        match self {
            BlockKind::BulletItem => Some(ListKind::Bullet),
            BlockKind::NumberedItem => Some(ListKind::Numbered),
            _ => None,
        }
    }

    /// Heading level (1-3) for heading kinds.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Title => Some(1),
            BlockKind::SectionHeader => Some(2),
            BlockKind::SubsectionHeader => Some(3),
            _ => None,
        }
    }
}

/// A heading or paragraph with inline-formatted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block kind (never a list item or blank)
    pub kind: BlockKind,

    /// Inline-formatted text
    pub content: Vec<TextRun>,

    /// Zero-based index of the source line
    pub source_line: usize,
}

impl ContentBlock {
    /// Create a new content block.
    pub fn new(kind: BlockKind, content: Vec<TextRun>, source_line: usize) -> Self {
        Self {
            kind,
            content,
            source_line,
        }
    }

    /// Get the text without emphasis.
    pub fn text(&self) -> String {
        plain_text(&self.content)
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        self.kind.is_heading()
    }
}

/// List flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Unordered list
    Bullet,
    /// Ordered list
    Numbered,
}

impl ListKind {
    /// Line kind that feeds this list.
    pub fn item_kind(self) -> BlockKind {
        match self {
            ListKind::Bullet => BlockKind::BulletItem,
            ListKind::Numbered => BlockKind::NumberedItem,
        }
    }
}

/// A single list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Inline-formatted text
    pub content: Vec<TextRun>,

    /// Zero-based index of the source line
    pub source_line: usize,
}

impl ListItem {
    /// Create a new list item.
    pub fn new(content: Vec<TextRun>, source_line: usize) -> Self {
        Self {
            content,
            source_line,
        }
    }

    /// Get the text without emphasis.
    pub fn text(&self) -> String {
        plain_text(&self.content)
    }
}

/// A run of consecutive list entries of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Bulleted or numbered
    pub kind: ListKind,

    /// Entries in source order
    pub items: Vec<ListItem>,

    /// Ordinal of the first entry. Greater than 1 when a numbered list
    /// continues after a page break.
    pub start: usize,
}

impl ListBlock {
    /// Create an empty list.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            start: 1,
        }
    }

    /// Create an empty list whose first entry has the given ordinal.
    pub fn starting_at(kind: ListKind, start: usize) -> Self {
        Self {
            kind,
            items: Vec::new(),
            start,
        }
    }

    /// Append an entry.
    pub fn push(&mut self, item: ListItem) {
        self.items.push(item);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get each entry's text without emphasis.
    pub fn item_texts(&self) -> Vec<String> {
        self.items.iter().map(ListItem::text).collect()
    }
}

/// An assembled block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading or paragraph
    Content(ContentBlock),

    /// A bulleted or numbered list
    List(ListBlock),

    /// A blank source line. Collapsed spacers take page space but render
    /// nothing, so runs of blank lines do not stack vertical gaps.
    Spacer {
        /// Zero-based index of the source line
        source_line: usize,
        /// Whether the spacer is suppressed in rendered output
        collapsed: bool,
    },
}

impl Block {
    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Content(c) if c.is_heading())
    }

    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Block::List(_))
    }

    /// Check if this block is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Block::Spacer { .. })
    }

    /// Check if the block carries visible text.
    pub fn has_text(&self) -> bool {
        match self {
            Block::Content(c) => !c.text().trim().is_empty(),
            Block::List(list) => list.items.iter().any(|i| !i.text().trim().is_empty()),
            Block::Spacer { .. } => false,
        }
    }

    /// Get the plain text of the block (list entries joined by newlines).
    pub fn plain_text(&self) -> String {
        match self {
            Block::Content(c) => c.text(),
            Block::List(list) => list.item_texts().join("\n"),
            Block::Spacer { .. } => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_tiers() {
        assert!(BlockKind::Title.is_heading());
        assert!(BlockKind::SubsectionHeader.is_heading());
        assert!(!BlockKind::Paragraph.is_heading());
        assert_eq!(BlockKind::SectionHeader.heading_level(), Some(2));
        assert_eq!(BlockKind::NumberedItem.list_kind(), Some(ListKind::Numbered));
        assert_eq!(BlockKind::Blank.list_kind(), None);
    }

    #[test]
    fn test_list_block() {
        let mut list = ListBlock::new(ListKind::Bullet);
        assert!(list.is_empty());
        list.push(ListItem::new(vec![TextRun::new("a")], 0));
        list.push(ListItem::new(vec![TextRun::bold("b")], 1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.item_texts(), vec!["a", "b"]);
        assert_eq!(list.start, 1);
    }

    #[test]
    fn test_block_has_text() {
        let spacer = Block::Spacer {
            source_line: 0,
            collapsed: false,
        };
        assert!(!spacer.has_text());

        let para = Block::Content(ContentBlock::new(
            BlockKind::Paragraph,
            vec![TextRun::new("Body")],
            1,
        ));
        assert!(para.has_text());
        assert!(!para.is_heading());
    }
}
