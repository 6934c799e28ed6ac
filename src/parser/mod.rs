//! Structure detection and pagination.
//!
//! Text flows through [`LineClassifier`] (one kind per line),
//! [`BlockAssembler`] (lists grouped, everything else single blocks) and
//! [`Paginator`] (break markers). [`DocumentParser`] runs all three.

mod assemble;
mod classify;
mod document_parser;
mod inline;
mod options;
mod paginate;

pub use assemble::{assemble, BlockAssembler};
pub use classify::{
    split_lines, ClassifiedLine, ClassifierState, Gate, LineClassifier, RawLine, Rule, RuleSet,
};
pub use document_parser::{DocumentParser, PaginatedBlocks};
pub use inline::format_inline;
pub use options::{PageBreakOptions, ParseMode, ParseOptions, DEFAULT_PAGE_CAPACITY};
pub use paginate::{
    block_cost, line_cost, paginate, PaginationState, Paginator, BLANK_COST, HEADER_COST,
    LIST_ITEM_COST, PARAGRAPH_COST, TITLE_COST,
};
