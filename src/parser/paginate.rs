//! Page-break insertion.
//!
//! Pagination is a fold over assembled blocks. [`PaginationState::step`]
//! takes one block and returns the next state together with the items to
//! emit: any break marker followed by the block itself. Lists are charged
//! per item and are split when a page fills up in the middle of one.
//!
//! An overflow is recorded when the page fills but its marker is only
//! written before the next visible block. A document therefore never ends
//! with a marker or an empty page, and a header break that falls on the
//! same boundary replaces the overflow instead of adding a second marker.

use super::options::PageBreakOptions;
use crate::model::{Block, BlockKind, BreakKind, ListBlock, StreamItem};

/// Page lines taken by a title.
pub const TITLE_COST: f32 = 3.0;

/// Page lines taken by a section or subsection header.
pub const HEADER_COST: f32 = 2.0;

/// Page lines taken by one list item.
pub const LIST_ITEM_COST: f32 = 1.0;

/// Page lines taken by a paragraph.
pub const PARAGRAPH_COST: f32 = 1.0;

/// Page lines taken by a blank line.
pub const BLANK_COST: f32 = 0.5;

/// Weighted page cost of one line of the given kind.
pub fn line_cost(kind: BlockKind) -> f32 {
    match kind {
        BlockKind::Title => TITLE_COST,
        BlockKind::SectionHeader | BlockKind::SubsectionHeader => HEADER_COST,
        BlockKind::BulletItem | BlockKind::NumberedItem => LIST_ITEM_COST,
        BlockKind::Paragraph => PARAGRAPH_COST,
        BlockKind::Blank => BLANK_COST,
    }
}

/// Weighted page cost of an assembled block.
pub fn block_cost(block: &Block) -> f32 {
    match block {
        Block::Content(content) => line_cost(content.kind),
        Block::List(list) => list.len() as f32 * LIST_ITEM_COST,
        Block::Spacer { .. } => BLANK_COST,
    }
}

/// Paginator state carried between blocks of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaginationState {
    /// Weighted lines used on the current page
    pub lines_on_current_page: f32,

    /// Set at the first section header. Never reset.
    pub first_section_header_seen: bool,

    /// Whether a visible block has been emitted
    pub any_block_emitted: bool,

    /// The page filled up and the next block starts a new one
    pub overflow_pending: bool,

    /// No visible block since the last marker
    pub fresh_page: bool,

    /// Whether the initial marker has been emitted
    pub started: bool,
}

impl PaginationState {
    /// Create the state for a new document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance over one block.
    pub fn step(mut self, block: Block, options: &PageBreakOptions) -> (Self, Vec<StreamItem>) {
        let mut out = Vec::new();

        match block {
            Block::List(list) => self.step_list(list, options, &mut out),
            // A pending overflow waits for the next visible block.
            block @ Block::Spacer { .. } if self.started => {
                self.charge(block_cost(&block), false, options);
                out.push(StreamItem::Block(block));
            }
            block => {
                let wanted = self.header_break(&block, options);
                self.open(wanted, &mut out);
                self.charge(block_cost(&block), !block.is_spacer(), options);
                out.push(StreamItem::Block(block));
            }
        }

        (self, out)
    }

    fn step_list(&mut self, list: ListBlock, options: &PageBreakOptions, out: &mut Vec<StreamItem>) {
        let ListBlock { kind, items, start } = list;
        let mut chunk = ListBlock::starting_at(kind, start);
        let mut ordinal = start;

        for item in items {
            if !self.started || self.overflow_pending {
                if !chunk.is_empty() {
                    let full = std::mem::replace(&mut chunk, ListBlock::starting_at(kind, ordinal));
                    out.push(StreamItem::Block(Block::List(full)));
                } else {
                    chunk.start = ordinal;
                }
                self.open(None, out);
            }
            chunk.push(item);
            ordinal += 1;
            self.charge(LIST_ITEM_COST, true, options);
        }

        if !chunk.is_empty() {
            out.push(StreamItem::Block(Block::List(chunk)));
        }
    }

    /// Break demanded by the block's own kind, updating the header latch.
    fn header_break(&mut self, block: &Block, options: &PageBreakOptions) -> Option<BreakKind> {
        let Block::Content(content) = block else {
            return None;
        };
        let near_bottom = self.lines_on_current_page > options.capacity() - HEADER_COST;

        match content.kind {
            BlockKind::Title => {
                (self.any_block_emitted && options.section_breaks).then_some(BreakKind::SectionBreak)
            }
            BlockKind::SectionHeader => {
                let preferred = options.subsection_breaks && self.first_section_header_seen;
                self.first_section_header_seen = true;
                (near_bottom || preferred).then_some(BreakKind::SubsectionBreak)
            }
            BlockKind::SubsectionHeader => near_bottom.then_some(BreakKind::SubsectionBreak),
            _ => None,
        }
    }

    /// Emit the marker, if any, that must precede the next block.
    fn open(&mut self, wanted: Option<BreakKind>, out: &mut Vec<StreamItem>) {
        if !self.started {
            self.started = true;
            self.start_page(BreakKind::Initial, out);
            return;
        }

        let pending = self.overflow_pending.then_some(BreakKind::Overflow);
        let Some(kind) = wanted.or(pending) else {
            return;
        };

        if self.fresh_page {
            log::debug!("{:?} coalesced with previous marker", kind);
            self.lines_on_current_page = 0.0;
            self.overflow_pending = false;
        } else {
            self.start_page(kind, out);
        }
    }

    fn start_page(&mut self, kind: BreakKind, out: &mut Vec<StreamItem>) {
        log::debug!(
            "{:?} after {:.1} lines",
            kind,
            self.lines_on_current_page
        );
        out.push(StreamItem::Break(kind));
        self.lines_on_current_page = 0.0;
        self.overflow_pending = false;
        self.fresh_page = true;
    }

    fn charge(&mut self, cost: f32, visible: bool, options: &PageBreakOptions) {
        if visible {
            self.any_block_emitted = true;
            self.fresh_page = false;
        }
        self.lines_on_current_page += cost;
        if self.lines_on_current_page >= options.capacity() {
            self.overflow_pending = true;
            self.lines_on_current_page = 0.0;
        }
    }
}

/// Incremental paginator for one document.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PaginationState,
    options: PageBreakOptions,
}

impl Paginator {
    /// Create a paginator.
    pub fn new(options: PageBreakOptions) -> Self {
        Self {
            state: PaginationState::new(),
            options,
        }
    }

    /// Paginate the next block.
    pub fn push(&mut self, block: Block) -> Vec<StreamItem> {
        let (state, items) = self.state.step(block, &self.options);
        self.state = state;
        items
    }

    /// Current state.
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Options in use.
    pub fn options(&self) -> &PageBreakOptions {
        &self.options
    }
}

/// Paginate a complete block sequence.
pub fn paginate(
    blocks: impl IntoIterator<Item = Block>,
    options: &PageBreakOptions,
) -> Vec<StreamItem> {
    blocks
        .into_iter()
        .fold(
            (PaginationState::new(), Vec::new()),
            |(state, mut out), block| {
                let (next, items) = state.step(block, options);
                out.extend(items);
                (next, out)
            },
        )
        .1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, ListItem, ListKind, TextRun};

    fn content(kind: BlockKind, text: &str) -> Block {
        Block::Content(ContentBlock::new(kind, vec![TextRun::new(text)], 0))
    }

    fn para() -> Block {
        content(BlockKind::Paragraph, "text")
    }

    fn bullets(count: usize) -> Block {
        let mut list = ListBlock::new(ListKind::Bullet);
        for i in 0..count {
            list.push(ListItem::new(vec![TextRun::new(format!("item {}", i))], i));
        }
        Block::List(list)
    }

    fn markers(items: &[StreamItem]) -> Vec<BreakKind> {
        items.iter().filter_map(StreamItem::as_break).collect()
    }

    #[test]
    fn test_initial_marker_first() {
        let (state, items) = PaginationState::new().step(para(), &PageBreakOptions::default());
        assert_eq!(items[0], StreamItem::Break(BreakKind::Initial));
        assert_eq!(items.len(), 2);
        assert!(state.started);
        assert_eq!(state.lines_on_current_page, PARAGRAPH_COST);
    }

    #[test]
    fn test_first_title_has_no_section_break() {
        let options = PageBreakOptions::default();
        let items = paginate(
            vec![content(BlockKind::Title, "One"), para(), content(BlockKind::Title, "Two")],
            &options,
        );
        assert_eq!(markers(&items), vec![BreakKind::Initial, BreakKind::SectionBreak]);
    }

    #[test]
    fn test_section_breaks_disabled() {
        let options = PageBreakOptions::default().with_section_breaks(false);
        let items = paginate(
            vec![content(BlockKind::Title, "One"), para(), content(BlockKind::Title, "Two")],
            &options,
        );
        assert_eq!(markers(&items), vec![BreakKind::Initial]);
    }

    #[test]
    fn test_first_section_header_shares_page() {
        let options = PageBreakOptions::default();
        let state = PaginationState {
            started: true,
            any_block_emitted: true,
            lines_on_current_page: 3.0,
            ..Default::default()
        };

        let (state, items) = state.step(content(BlockKind::SectionHeader, "A"), &options);
        assert!(markers(&items).is_empty());
        assert!(state.first_section_header_seen);

        let (_, items) = state.step(content(BlockKind::SectionHeader, "B"), &options);
        assert_eq!(markers(&items), vec![BreakKind::SubsectionBreak]);
    }

    #[test]
    fn test_section_header_near_bottom_breaks_without_preference() {
        let options = PageBreakOptions::default().with_subsection_breaks(false);
        let state = PaginationState {
            started: true,
            any_block_emitted: true,
            lines_on_current_page: 28.5,
            ..Default::default()
        };
        let (state, items) = state.step(content(BlockKind::SectionHeader, "A"), &options);
        assert_eq!(markers(&items), vec![BreakKind::SubsectionBreak]);
        assert_eq!(state.lines_on_current_page, HEADER_COST);
        assert!(state.first_section_header_seen);
    }

    #[test]
    fn test_subsection_header_overflow_rule_only() {
        let options = PageBreakOptions::default();
        let state = PaginationState {
            started: true,
            any_block_emitted: true,
            first_section_header_seen: true,
            lines_on_current_page: 10.0,
            ..Default::default()
        };
        let (_, items) = state.step(content(BlockKind::SubsectionHeader, "a"), &options);
        assert!(markers(&items).is_empty());

        let state = PaginationState {
            lines_on_current_page: 28.5,
            ..state
        };
        let (_, items) = state.step(content(BlockKind::SubsectionHeader, "b"), &options);
        assert_eq!(markers(&items), vec![BreakKind::SubsectionBreak]);
    }

    #[test]
    fn test_overflow_is_lazy() {
        let options = PageBreakOptions::default().with_page_capacity(3);
        let items = paginate(vec![para(), para(), para()], &options);
        assert_eq!(markers(&items), vec![BreakKind::Initial]);

        let items = paginate(vec![para(), para(), para(), para()], &options);
        assert_eq!(markers(&items), vec![BreakKind::Initial, BreakKind::Overflow]);
        assert_eq!(items.last().and_then(StreamItem::as_break), None);
    }

    #[test]
    fn test_overflow_count_bounded() {
        let options = PageBreakOptions::default();
        let items = paginate((0..40).map(|_| para()), &options);
        let overflows = markers(&items)
            .into_iter()
            .filter(|k| *k == BreakKind::Overflow)
            .count();
        assert_eq!(overflows, 1);
    }

    #[test]
    fn test_header_break_replaces_pending_overflow() {
        let options = PageBreakOptions::default().with_page_capacity(4);
        let items = paginate(
            vec![
                content(BlockKind::SectionHeader, "A"),
                para(),
                para(),
                content(BlockKind::SectionHeader, "B"),
            ],
            &options,
        );
        assert_eq!(
            markers(&items),
            vec![BreakKind::Initial, BreakKind::SubsectionBreak]
        );
    }

    #[test]
    fn test_list_split_across_pages() {
        let options = PageBreakOptions::default().with_page_capacity(3);
        let items = paginate(vec![bullets(5)], &options);

        assert_eq!(markers(&items), vec![BreakKind::Initial, BreakKind::Overflow]);
        let lists: Vec<_> = items
            .iter()
            .filter_map(|i| match i {
                StreamItem::Block(Block::List(list)) => Some((list.start, list.len())),
                _ => None,
            })
            .collect();
        assert_eq!(lists, vec![(1, 3), (4, 2)]);
    }

    #[test]
    fn test_spacers_do_not_open_pages() {
        let options = PageBreakOptions::default().with_page_capacity(1);
        let spacer = || Block::Spacer {
            source_line: 0,
            collapsed: true,
        };
        let items = paginate(vec![spacer(), spacer(), spacer(), spacer()], &options);
        assert_eq!(markers(&items), vec![BreakKind::Initial]);
    }

    #[test]
    fn test_spacer_leaves_overflow_pending() {
        let options = PageBreakOptions::default().with_page_capacity(1);
        let spacer = Block::Spacer {
            source_line: 1,
            collapsed: true,
        };

        let (state, _) = PaginationState::new().step(content(BlockKind::Paragraph, "p"), &options);
        assert!(state.overflow_pending);

        let (state, items) = state.step(spacer, &options);
        assert!(markers(&items).is_empty());
        assert!(state.overflow_pending);

        let (_, items) = state.step(content(BlockKind::Paragraph, "q"), &options);
        assert_eq!(markers(&items), vec![BreakKind::Overflow]);
    }

    #[test]
    fn test_block_cost() {
        assert_eq!(block_cost(&content(BlockKind::Title, "t")), TITLE_COST);
        assert_eq!(block_cost(&bullets(4)), 4.0);
        assert_eq!(line_cost(BlockKind::Blank), BLANK_COST);
    }
}
