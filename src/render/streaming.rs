//! Streaming HTML renderer.
//!
//! The streaming renderer consumes stream items lazily and yields rendering
//! events one at a time. Paired with [`crate::parser::PaginatedBlocks`] no
//! complete block stream is ever held in memory.
//!
//! # Example
//!
//! ```
//! use pagemark::parser::DocumentParser;
//! use pagemark::render::{RenderEvent, RenderOptions, StreamingRenderer};
//!
//! let parser = DocumentParser::default();
//! let renderer = StreamingRenderer::new(parser.stream("# Notes\nBody"), RenderOptions::default());
//!
//! for event in renderer {
//!     if let RenderEvent::PageStart { number, .. } = event {
//!         println!("page {}", number);
//!     }
//! }
//! ```

use std::collections::VecDeque;

use crate::model::{BreakKind, StreamItem};

use super::html::{block_html, break_html};
use super::RenderOptions;

/// Events emitted during streaming rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// A new page is starting.
    PageStart {
        /// 1-indexed page number
        number: u32,
        /// Marker that opened the page, if any
        opened_by: Option<BreakKind>,
    },

    /// A piece of rendered HTML.
    Block(String),

    /// A page has finished rendering.
    PageEnd {
        /// 1-indexed page number
        number: u32,
    },

    /// Document rendering has completed.
    DocumentEnd,
}

impl RenderEvent {
    /// Check if this is a content-bearing event.
    pub fn has_content(&self) -> bool {
        matches!(self, RenderEvent::Block(_))
    }

    /// Get the content if this is a content event.
    pub fn content(&self) -> Option<&str> {
        match self {
            RenderEvent::Block(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is a page boundary event.
    pub fn is_page_boundary(&self) -> bool {
        matches!(
            self,
            RenderEvent::PageStart { .. } | RenderEvent::PageEnd { .. }
        )
    }
}

/// Streaming renderer that yields rendering events as an iterator.
pub struct StreamingRenderer<I> {
    items: I,
    options: RenderOptions,
    page: Option<u32>,
    pending: VecDeque<RenderEvent>,
    done: bool,
}

impl<I: Iterator<Item = StreamItem>> StreamingRenderer<I> {
    /// Create a new streaming renderer.
    pub fn new(items: I, options: RenderOptions) -> Self {
        Self {
            items,
            options,
            page: None,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Check if rendering is complete.
    pub fn is_done(&self) -> bool {
        self.done && self.pending.is_empty()
    }

    /// Get the current page number, 0 before the first page.
    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    fn start_page(&mut self, opened_by: Option<BreakKind>) -> u32 {
        if let Some(number) = self.page {
            self.pending.push_back(RenderEvent::PageEnd { number });
        }
        let number = self.page.map_or(1, |n| n + 1);
        self.page = Some(number);
        self.pending
            .push_back(RenderEvent::PageStart { number, opened_by });
        number
    }

    fn advance(&mut self) {
        match self.items.next() {
            Some(StreamItem::Break(kind)) => {
                let number = self.start_page(Some(kind));
                let page = self.options.show_page_numbers.then_some(number);
                self.pending
                    .push_back(RenderEvent::Block(break_html(kind, page)));
            }
            Some(StreamItem::Block(block)) => {
                if self.page.is_none() {
                    self.start_page(None);
                }
                let html = block_html(&block);
                if !html.is_empty() {
                    self.pending.push_back(RenderEvent::Block(html));
                }
            }
            None => {
                if let Some(number) = self.page {
                    self.pending.push_back(RenderEvent::PageEnd { number });
                }
                self.pending.push_back(RenderEvent::DocumentEnd);
                self.done = true;
            }
        }
    }
}

impl<I: Iterator<Item = StreamItem>> Iterator for StreamingRenderer<I> {
    type Item = RenderEvent;

    fn next(&mut self) -> Option<RenderEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.done {
                return None;
            }
            self.advance();
        }
    }
}

/// Concatenate the HTML of all content events.
pub fn collect_content(events: impl IntoIterator<Item = RenderEvent>) -> String {
    events
        .into_iter()
        .filter_map(|event| match event {
            RenderEvent::Block(html) => Some(html),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DocumentParser;
    use crate::render::to_html;

    #[test]
    fn test_events_for_two_pages() {
        let parser = DocumentParser::default();
        let events: Vec<_> =
            StreamingRenderer::new(parser.stream("# One\n# Two"), RenderOptions::default())
                .collect();

        let boundaries: Vec<_> = events
            .iter()
            .filter(|e| e.is_page_boundary())
            .cloned()
            .collect();
        assert_eq!(
            boundaries,
            vec![
                RenderEvent::PageStart {
                    number: 1,
                    opened_by: Some(BreakKind::Initial)
                },
                RenderEvent::PageEnd { number: 1 },
                RenderEvent::PageStart {
                    number: 2,
                    opened_by: Some(BreakKind::SectionBreak)
                },
                RenderEvent::PageEnd { number: 2 },
            ]
        );
        assert_eq!(events.last(), Some(&RenderEvent::DocumentEnd));
    }

    #[test]
    fn test_matches_eager_renderer() {
        let parser = DocumentParser::default();
        let text = "# Title\n## A\n- x\n- y\n\nSome *text*\n## B\n1. first\n2. second";
        let options = RenderOptions::default();

        let streamed = collect_content(StreamingRenderer::new(parser.stream(text), options.clone()));
        let eager = to_html(&parser.parse(text), &options).unwrap();
        assert_eq!(streamed, eager);
    }

    #[test]
    fn test_empty_input() {
        let mut renderer = StreamingRenderer::new(std::iter::empty(), RenderOptions::default());
        assert_eq!(renderer.next(), Some(RenderEvent::DocumentEnd));
        assert_eq!(renderer.next(), None);
        assert!(renderer.is_done());
    }
}
