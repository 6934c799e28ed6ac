//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, BlockKind, BlockStream, BreakKind, StreamItem};

/// Result of rendering a stream, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, text, etc.)
    pub content: String,

    /// Stream statistics
    pub stats: StreamStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: StreamStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: StreamStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts collected from a block stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStats {
    /// Pages holding at least one block
    pub page_count: u32,

    /// Title blocks
    pub title_count: u32,

    /// Section header blocks
    pub section_count: u32,

    /// Subsection header blocks
    pub subsection_count: u32,

    /// Paragraph blocks
    pub paragraph_count: u32,

    /// List blocks (a list split across pages counts once per page)
    pub list_count: u32,

    /// List entries
    pub list_item_count: u32,

    /// Blank-line spacers
    pub spacer_count: u32,

    /// Initial markers
    pub initial_breaks: u32,

    /// Markers before titles
    pub section_breaks: u32,

    /// Markers before section and subsection headers
    pub subsection_breaks: u32,

    /// Markers from page overflow
    pub overflow_breaks: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl StreamStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a stream.
    pub fn from_stream(stream: &BlockStream) -> Self {
        let mut stats = Self::new();
        stats.page_count = stream.pages().len() as u32;

        for item in stream {
            match item {
                StreamItem::Break(kind) => stats.add_break(*kind),
                StreamItem::Block(block) => stats.add_block(block),
            }
        }
        stats
    }

    /// Count one break marker.
    pub fn add_break(&mut self, kind: BreakKind) {
        match kind {
            BreakKind::Initial => self.initial_breaks += 1,
            BreakKind::SectionBreak => self.section_breaks += 1,
            BreakKind::SubsectionBreak => self.subsection_breaks += 1,
            BreakKind::Overflow => self.overflow_breaks += 1,
        }
    }

    /// Count one block and its text.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Content(content) => {
                match content.kind {
                    BlockKind::Title => self.title_count += 1,
                    BlockKind::SectionHeader => self.section_count += 1,
                    BlockKind::SubsectionHeader => self.subsection_count += 1,
                    _ => self.paragraph_count += 1,
                }
                self.count_text(&content.text());
            }
            Block::List(list) => {
                self.list_count += 1;
                self.list_item_count += list.len() as u32;
                for item in &list.items {
                    self.count_text(&item.text());
                }
            }
            Block::Spacer { .. } => self.spacer_count += 1,
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total heading blocks.
    pub fn heading_count(&self) -> u32 {
        self.title_count + self.section_count + self.subsection_count
    }

    /// Total break markers.
    pub fn break_count(&self) -> u32 {
        self.initial_breaks + self.section_breaks + self.subsection_breaks + self.overflow_breaks
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &StreamStats) {
        self.page_count += other.page_count;
        self.title_count += other.title_count;
        self.section_count += other.section_count;
        self.subsection_count += other.subsection_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.spacer_count += other.spacer_count;
        self.initial_breaks += other.initial_breaks;
        self.section_breaks += other.section_breaks;
        self.subsection_breaks += other.subsection_breaks;
        self.overflow_breaks += other.overflow_breaks;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, ListBlock, ListItem, ListKind, SourceFormat, TextRun};

    #[test]
    fn test_stream_stats_count_text() {
        let mut stats = StreamStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_stream() {
        let mut list = ListBlock::new(ListKind::Bullet);
        list.push(ListItem::new(vec![TextRun::new("one")], 2));
        list.push(ListItem::new(vec![TextRun::new("two")], 3));

        let stream = BlockStream::from_items(
            SourceFormat::Markdown,
            true,
            vec![
                StreamItem::Break(BreakKind::Initial),
                StreamItem::Block(Block::Content(ContentBlock::new(
                    BlockKind::Title,
                    vec![TextRun::new("Big Title")],
                    0,
                ))),
                StreamItem::Block(Block::Spacer {
                    source_line: 1,
                    collapsed: true,
                }),
                StreamItem::Break(BreakKind::Overflow),
                StreamItem::Block(Block::List(list)),
            ],
        );

        let stats = StreamStats::from_stream(&stream);
        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.title_count, 1);
        assert_eq!(stats.heading_count(), 1);
        assert_eq!(stats.list_count, 1);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.spacer_count, 1);
        assert_eq!(stats.break_count(), 2);
        assert_eq!(stats.overflow_breaks, 1);
        assert_eq!(stats.word_count, 4);
    }

    #[test]
    fn test_stream_stats_merge() {
        let mut stats1 = StreamStats {
            paragraph_count: 5,
            overflow_breaks: 2,
            ..Default::default()
        };
        let stats2 = StreamStats {
            paragraph_count: 3,
            overflow_breaks: 1,
            title_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.overflow_breaks, 3);
        assert_eq!(stats1.title_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("<p>Hello</p>".to_string());
        assert_eq!(result.content_len(), 12);
        assert_eq!(result.stats.paragraph_count, 0);
    }
}
