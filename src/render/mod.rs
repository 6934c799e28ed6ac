//! Rendering module for converting block streams to output formats.

mod html;
mod json;
mod options;
mod result;
pub mod streaming;
mod text;
pub mod visitor;

pub use html::{
    block_html, break_html, escape_html, render_runs, to_html, to_html_with_stats, HtmlRenderer,
};
pub use json::{to_json, JsonFormat};
pub use options::{Margins, PrintStyle, RenderOptions, TextAlign};
pub use result::{RenderResult, StreamStats};
pub use streaming::{collect_content, RenderEvent, StreamingRenderer};
pub use text::{to_text, PAGE_SEPARATOR};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, MaxHeadingDepthVisitor, SkipBreaksVisitor,
    VisitorAction,
};
