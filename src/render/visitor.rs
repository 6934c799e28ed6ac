//! Visitor pattern for customizing HTML rendering.
//!
//! A visitor sees every heading, paragraph, list and break marker before
//! the renderer writes it, and may replace or skip the element.
//!
//! # Example
//!
//! ```
//! use pagemark::render::visitor::{DocumentVisitor, VisitorAction};
//! use pagemark::model::ContentBlock;
//!
//! struct NoTitles;
//!
//! impl DocumentVisitor for NoTitles {
//!     fn visit_heading(&mut self, _heading: &ContentBlock, level: u8) -> VisitorAction {
//!         if level == 1 {
//!             VisitorAction::Skip
//!         } else {
//!             VisitorAction::Continue
//!         }
//!     }
//! }
//! ```

use super::html::escape_html;
use crate::model::{BreakKind, ContentBlock, ListBlock, ListItem, ListKind};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting stream elements during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor: Send + Sync {
    /// Called before rendering a title, section or subsection header.
    ///
    /// # Arguments
    /// * `heading` - The heading block
    /// * `level` - Heading level (1-3)
    fn visit_heading(&mut self, heading: &ContentBlock, level: u8) -> VisitorAction {
        let _ = (heading, level);
        VisitorAction::Continue
    }

    /// Called before rendering a paragraph.
    fn visit_paragraph(&mut self, para: &ContentBlock) -> VisitorAction {
        let _ = para;
        VisitorAction::Continue
    }

    /// Called before rendering a whole list.
    fn visit_list(&mut self, list: &ListBlock) -> VisitorAction {
        let _ = list;
        VisitorAction::Continue
    }

    /// Called before rendering one list entry.
    ///
    /// # Arguments
    /// * `item` - The entry
    /// * `ordinal` - 1-based position, continuing across page splits
    /// * `kind` - Bulleted or numbered
    fn visit_list_item(
        &mut self,
        item: &ListItem,
        ordinal: usize,
        kind: ListKind,
    ) -> VisitorAction {
        let _ = (item, ordinal, kind);
        VisitorAction::Continue
    }

    /// Called before rendering a visible spacer.
    fn visit_spacer(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Called before rendering a break marker.
    fn visit_page_break(&mut self, kind: BreakKind) -> VisitorAction {
        let _ = kind;
        VisitorAction::Continue
    }

    /// Called at the start of a new page.
    ///
    /// # Arguments
    /// * `page_number` - The 1-indexed page number
    fn on_page_start(&mut self, page_number: u32) {
        let _ = page_number;
    }

    /// Called at the end of a page.
    fn on_page_end(&mut self, page_number: u32) {
        let _ = page_number;
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that drops break markers, for continuous on-screen output.
#[derive(Debug, Clone, Default)]
pub struct SkipBreaksVisitor;

impl DocumentVisitor for SkipBreaksVisitor {
    fn visit_page_break(&mut self, _kind: BreakKind) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that limits heading depth.
#[derive(Debug, Clone)]
pub struct MaxHeadingDepthVisitor {
    max_level: u8,
}

impl MaxHeadingDepthVisitor {
    /// Create a visitor that limits headings to the specified max level.
    pub fn new(max_level: u8) -> Self {
        Self {
            max_level: max_level.clamp(1, 3),
        }
    }
}

impl DocumentVisitor for MaxHeadingDepthVisitor {
    fn visit_heading(&mut self, heading: &ContentBlock, level: u8) -> VisitorAction {
        if level <= self.max_level {
            return VisitorAction::Continue;
        }
        let level = self.max_level;
        VisitorAction::Replace(format!(
            "<h{}>{}</h{}>\n",
            level,
            escape_html(&heading.text()),
            level
        ))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut visit: impl FnMut(&mut dyn DocumentVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_heading(&mut self, heading: &ContentBlock, level: u8) -> VisitorAction {
        self.first_action(|v| v.visit_heading(heading, level))
    }

    fn visit_paragraph(&mut self, para: &ContentBlock) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(para))
    }

    fn visit_list(&mut self, list: &ListBlock) -> VisitorAction {
        self.first_action(|v| v.visit_list(list))
    }

    fn visit_list_item(
        &mut self,
        item: &ListItem,
        ordinal: usize,
        kind: ListKind,
    ) -> VisitorAction {
        self.first_action(|v| v.visit_list_item(item, ordinal, kind))
    }

    fn visit_spacer(&mut self) -> VisitorAction {
        self.first_action(|v| v.visit_spacer())
    }

    fn visit_page_break(&mut self, kind: BreakKind) -> VisitorAction {
        self.first_action(|v| v.visit_page_break(kind))
    }

    fn on_page_start(&mut self, page_number: u32) {
        for visitor in &mut self.visitors {
            visitor.on_page_start(page_number);
        }
    }

    fn on_page_end(&mut self, page_number: u32) {
        for visitor in &mut self.visitors {
            visitor.on_page_end(page_number);
        }
    }
}
