//! Document parser that fuses classification, assembly and pagination.

use std::borrow::Cow;
use std::collections::VecDeque;

use super::assemble::BlockAssembler;
use super::classify::{LineClassifier, LineCursor, RuleSet};
use super::options::ParseOptions;
use super::paginate::Paginator;
use crate::cleanup::clean_input;
use crate::model::{Block, BlockStream, SourceFormat, StreamItem};

/// Document parser.
///
/// The parser holds only read-only options; every call starts from fresh
/// classifier and pagination state, so parsing the same text twice yields
/// the same stream.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    options: ParseOptions,
}

impl DocumentParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Lazily parse `text`, one source line at a time.
    pub fn stream<'a>(&self, text: &'a str) -> PaginatedBlocks<'a> {
        PaginatedBlocks::new(text, &self.options)
    }

    /// Parse `text` into a block stream.
    ///
    /// If pagination leaves no visible content for input that is not
    /// whitespace-only, the unpaginated parse of the same input is returned
    /// instead.
    pub fn parse(&self, text: &str) -> BlockStream {
        let blocks = self.stream(text);
        let format = blocks.format();
        let paginated = blocks.is_paginated();
        let stream = BlockStream::from_items(format, paginated, blocks.collect());

        if paginated && !stream.has_content() && !text.trim().is_empty() {
            log::warn!(
                "Paginated parse of {} bytes produced no content, falling back to unpaginated parse",
                text.len()
            );
            return self.parse_unpaginated(text);
        }

        log::debug!(
            "Parsed {} items ({} markers) as {:?}",
            stream.len(),
            stream.markers().len(),
            format
        );
        stream
    }

    /// Parse `text` without inserting break markers.
    pub fn parse_unpaginated(&self, text: &str) -> BlockStream {
        let options = self.options.clone().unpaginated();
        let blocks = PaginatedBlocks::new(text, &options);
        let format = blocks.format();
        BlockStream::from_items(format, false, blocks.collect())
    }
}

/// Lazy iterator over the stream items of one document.
///
/// Lines are classified and assembled on demand. Items come out in the
/// same order as [`DocumentParser::parse`] produces them, except that the
/// empty-output fallback is not applied.
#[derive(Debug)]
pub struct PaginatedBlocks<'a> {
    text: Cow<'a, str>,
    cursor: LineCursor,
    classifier: LineClassifier,
    assembler: Option<BlockAssembler>,
    paginator: Option<Paginator>,
    pending: VecDeque<StreamItem>,
}

impl<'a> PaginatedBlocks<'a> {
    /// Prepare to parse `text`.
    pub fn new(text: &'a str, options: &ParseOptions) -> Self {
        let text = clean_input(text, &options.cleanup);
        let format = options.mode.resolve(&text);
        let rules = match format {
            SourceFormat::Markdown => RuleSet::markdown(options.markdown_ordered_lists),
            SourceFormat::PlainText => RuleSet::plain_text(),
        };
        let cursor = LineCursor::new(&text);

        Self {
            text,
            cursor,
            classifier: LineClassifier::new(rules),
            assembler: Some(BlockAssembler::new()),
            paginator: options.paginate.then(|| Paginator::new(options.page_breaks)),
            pending: VecDeque::new(),
        }
    }

    /// Grammar used for this document.
    pub fn format(&self) -> SourceFormat {
        self.classifier.format()
    }

    /// Whether break markers are inserted.
    pub fn is_paginated(&self) -> bool {
        self.paginator.is_some()
    }

    /// Collect the remaining items into a block stream.
    pub fn into_stream(self) -> BlockStream {
        let format = self.format();
        let paginated = self.is_paginated();
        BlockStream::from_items(format, paginated, self.collect())
    }

    fn enqueue(&mut self, blocks: Vec<Block>) {
        for block in blocks {
            match self.paginator.as_mut() {
                Some(paginator) => self.pending.extend(paginator.push(block)),
                None => self.pending.push_back(StreamItem::Block(block)),
            }
        }
    }
}

impl Iterator for PaginatedBlocks<'_> {
    type Item = StreamItem;

    fn next(&mut self) -> Option<StreamItem> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }

            let mut blocks = Vec::new();
            match self.cursor.next_line(&self.text) {
                Some(line) => {
                    let classified = self.classifier.classify(&line);
                    self.assembler.as_mut()?.push(classified, &mut blocks);
                }
                None => self.assembler.take()?.finish(&mut blocks),
            }
            self.enqueue(blocks);
        }
    }
}
