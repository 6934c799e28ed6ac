//! Document model types.
//!
//! This module defines the transient representation produced by one parse:
//! inline runs, assembled blocks, break markers and the stream that orders
//! them. Nothing here outlives a parse call except what the caller keeps.

mod block;
mod inline;
mod page;
mod stream;

pub use block::{Block, BlockKind, ContentBlock, ListBlock, ListItem, ListKind};
pub use inline::{plain_text, TextRun, TextStyle};
pub use page::{Page, PageSize};
pub use stream::{BlockStream, BreakKind, SourceFormat, StreamItem};
