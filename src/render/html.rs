//! HTML rendering for block streams.
//!
//! Break markers become empty `<div class="page-break ...">` elements that
//! the print stylesheet turns into hard page boundaries.

use std::borrow::Cow;

use crate::error::Result;
use crate::model::{
    Block, BlockStream, BreakKind, ContentBlock, ListBlock, ListItem, ListKind, StreamItem, TextRun,
};

use super::visitor::{DefaultVisitor, DocumentVisitor, VisitorAction};
use super::{PrintStyle, RenderOptions, RenderResult, StreamStats};

/// Convert a block stream to HTML.
pub fn to_html(stream: &BlockStream, options: &RenderOptions) -> Result<String> {
    HtmlRenderer::new(options.clone()).render(stream)
}

/// Convert a block stream to HTML with statistics.
pub fn to_html_with_stats(stream: &BlockStream, options: &RenderOptions) -> Result<RenderResult> {
    HtmlRenderer::new(options.clone()).render_with_stats(stream)
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Render inline runs as HTML.
pub fn render_runs(runs: &[TextRun]) -> String {
    let mut output = String::new();
    for run in runs {
        let text = escape_html(&run.text);
        if run.style.bold {
            output.push_str("<strong>");
            output.push_str(&text);
            output.push_str("</strong>");
        } else if run.style.italic {
            output.push_str("<em>");
            output.push_str(&text);
            output.push_str("</em>");
        } else {
            output.push_str(&text);
        }
    }
    output
}

/// Markup for a break marker, optionally tagged with the page it opens.
pub fn break_html(kind: BreakKind, page: Option<u32>) -> String {
    match page {
        Some(number) => format!(
            "<div class=\"{}\" data-page=\"{}\"></div>\n",
            kind.css_class(),
            number
        ),
        None => format!("<div class=\"{}\"></div>\n", kind.css_class()),
    }
}

/// Markup for a single block with no visitor applied.
pub fn block_html(block: &Block) -> String {
    match block {
        Block::Content(content) => match content.kind.heading_level() {
            Some(level) => heading_html(content, level),
            None => paragraph_html(content),
        },
        Block::List(list) => {
            let mut output = list_open_tag(list);
            for item in &list.items {
                output.push_str(&list_item_html(item));
            }
            output.push_str(list_close_tag(list));
            output
        }
        Block::Spacer { collapsed: true, .. } => String::new(),
        Block::Spacer { collapsed: false, .. } => "<br>\n".to_string(),
    }
}

fn heading_html(heading: &ContentBlock, level: u8) -> String {
    format!("<h{}>{}</h{}>\n", level, render_runs(&heading.content), level)
}

fn paragraph_html(para: &ContentBlock) -> String {
    format!("<p>{}</p>\n", render_runs(&para.content))
}

fn list_open_tag(list: &ListBlock) -> String {
    match list.kind {
        ListKind::Bullet => "<ul>\n".to_string(),
        ListKind::Numbered if list.start != 1 => format!("<ol start=\"{}\">\n", list.start),
        ListKind::Numbered => "<ol>\n".to_string(),
    }
}

fn list_close_tag(list: &ListBlock) -> &'static str {
    match list.kind {
        ListKind::Bullet => "</ul>\n",
        ListKind::Numbered => "</ol>\n",
    }
}

fn list_item_html(item: &ListItem) -> String {
    format!("<li>{}</li>\n", render_runs(&item.content))
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Box<dyn DocumentVisitor>,
    page: Option<u32>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: Box::new(DefaultVisitor),
            page: None,
        }
    }

    /// Use a visitor to customize output.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Box::new(visitor);
        self
    }

    /// Render a block stream to HTML.
    pub fn render(mut self, stream: &BlockStream) -> Result<String> {
        let body = self.render_body(stream);
        if !self.options.standalone {
            return Ok(body);
        }
        Ok(self.wrap_document(stream, &body))
    }

    /// Render a block stream to HTML with statistics.
    pub fn render_with_stats(self, stream: &BlockStream) -> Result<RenderResult> {
        let stats = StreamStats::from_stream(stream);
        let content = self.render(stream)?;
        Ok(RenderResult::new(content, stats))
    }

    fn render_body(&mut self, stream: &BlockStream) -> String {
        let mut output = String::new();

        for item in stream {
            match item {
                StreamItem::Break(kind) => self.render_break(&mut output, *kind),
                StreamItem::Block(block) => {
                    if self.page.is_none() {
                        self.start_page(1);
                    }
                    self.render_block(&mut output, block);
                }
            }
        }

        if let Some(number) = self.page {
            self.visitor.on_page_end(number);
        }
        output
    }

    fn start_page(&mut self, number: u32) {
        if let Some(previous) = self.page {
            self.visitor.on_page_end(previous);
        }
        self.page = Some(number);
        self.visitor.on_page_start(number);
    }

    fn render_break(&mut self, output: &mut String, kind: BreakKind) {
        let number = self.page.map_or(1, |n| n + 1);
        self.start_page(number);

        match self.visitor.visit_page_break(kind) {
            VisitorAction::Skip => {}
            VisitorAction::Replace(replacement) => output.push_str(&replacement),
            VisitorAction::Continue => {
                let page = self.options.show_page_numbers.then_some(number);
                output.push_str(&break_html(kind, page));
            }
        }
    }

    fn render_block(&mut self, output: &mut String, block: &Block) {
        match block {
            Block::Content(content) => match content.kind.heading_level() {
                Some(level) => self.render_heading(output, content, level),
                None => self.render_paragraph(output, content),
            },
            Block::List(list) => self.render_list(output, list),
            Block::Spacer { collapsed, .. } => {
                if *collapsed {
                    return;
                }
                match self.visitor.visit_spacer() {
                    VisitorAction::Skip => {}
                    VisitorAction::Replace(replacement) => output.push_str(&replacement),
                    VisitorAction::Continue => output.push_str("<br>\n"),
                }
            }
        }
    }

    fn render_heading(&mut self, output: &mut String, heading: &ContentBlock, level: u8) {
        match self.visitor.visit_heading(heading, level) {
            VisitorAction::Skip => {}
            VisitorAction::Replace(replacement) => output.push_str(&replacement),
            VisitorAction::Continue => output.push_str(&heading_html(heading, level)),
        }
    }

    fn render_paragraph(&mut self, output: &mut String, para: &ContentBlock) {
        match self.visitor.visit_paragraph(para) {
            VisitorAction::Skip => {}
            VisitorAction::Replace(replacement) => output.push_str(&replacement),
            VisitorAction::Continue => output.push_str(&paragraph_html(para)),
        }
    }

    fn render_list(&mut self, output: &mut String, list: &ListBlock) {
        match self.visitor.visit_list(list) {
            VisitorAction::Skip => return,
            VisitorAction::Replace(replacement) => {
                output.push_str(&replacement);
                return;
            }
            VisitorAction::Continue => {}
        }

        output.push_str(&list_open_tag(list));
        for (offset, item) in list.items.iter().enumerate() {
            match self.visitor.visit_list_item(item, list.start + offset, list.kind) {
                VisitorAction::Skip => {}
                VisitorAction::Replace(replacement) => output.push_str(&replacement),
                VisitorAction::Continue => output.push_str(&list_item_html(item)),
            }
        }
        output.push_str(list_close_tag(list));
    }

    fn wrap_document(&self, stream: &BlockStream, body: &str) -> String {
        let title = self
            .options
            .title
            .clone()
            .or_else(|| {
                stream
                    .blocks()
                    .find(|b| b.is_heading())
                    .map(Block::plain_text)
            })
            .unwrap_or_else(|| "Document".to_string());

        let mut output = String::new();
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("<meta charset=\"utf-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
        if self.options.include_styles {
            output.push_str("<style>\n");
            output.push_str(&self.stylesheet());
            output.push_str("</style>\n");
        }
        output.push_str("</head>\n<body>\n<div class=\"document-content\">\n");
        output.push_str(body);
        output.push_str("</div>\n</body>\n</html>\n");
        output
    }

    /// Print stylesheet for the configured page size and style.
    pub fn stylesheet(&self) -> String {
        let style: &PrintStyle = &self.options.style;
        let size = self.options.page_size;
        let (width, height) = size.css_dimensions();

        let mut css = String::new();
        css.push_str(&format!(
            "@page {{\n    size: {};\n    margin: {};\n",
            size.print_name(),
            style.margins.css()
        ));
        if self.options.show_page_numbers {
            css.push_str("    @bottom-center {\n        content: counter(page);\n    }\n");
        }
        css.push_str("}\n");

        css.push_str(&format!(
            "body {{\n    margin: 0;\n    padding: 0;\n    font-family: {}, sans-serif;\n    \
             font-size: {}px;\n    line-height: {};\n    color: {};\n    background: white;\n}}\n",
            style.body_font, style.body_size, style.line_spacing, style.body_color
        ));
        css.push_str(&format!(
            ".document-content {{\n    width: 100%;\n    max-width: {};\n    min-height: {};\n}}\n",
            width, height
        ));
        css.push_str(&format!(
            "h1 {{\n    font-family: {}, sans-serif;\n    font-size: {}px;\n    color: {};\n    \
             margin: 0 0 0.5em 0;\n    text-align: {};\n    border-bottom: 2px solid {};\n    \
             padding-bottom: 0.2em;\n}}\n",
            style.title_font,
            style.title_size,
            style.title_color,
            style.title_align.css(),
            style.accent_color
        ));
        css.push_str(&format!(
            "h2 {{\n    font-family: {}, sans-serif;\n    font-size: {}px;\n    color: {};\n    \
             margin: 1.5em 0 0.5em 0;\n    text-align: {};\n}}\n",
            style.header_font,
            style.header_size,
            style.header_color,
            style.header_align.css()
        ));
        css.push_str(&format!(
            "h3 {{\n    font-family: {}, sans-serif;\n    font-size: {}px;\n    color: {};\n    \
             margin: 1.2em 0 0.3em 0;\n    text-align: {};\n}}\n",
            style.header_font,
            style.header_size.saturating_sub(4),
            style.header_color,
            style.header_align.css()
        ));
        css.push_str(&format!(
            "p {{\n    margin: 0 0 1em 0;\n    text-align: {};\n}}\n",
            style.body_align.css()
        ));
        css.push_str("ul, ol {\n    margin: 0 0 1em 0;\n    padding-left: 1.5em;\n}\n");
        css.push_str("li {\n    margin: 0.3em 0;\n}\n");
        css.push_str(".page-break {\n    page-break-before: always;\n    break-before: page;\n}\n");
        css.push_str(
            "@media print {\n    body {\n        -webkit-print-color-adjust: exact;\n        \
             print-color-adjust: exact;\n    }\n}\n",
        );
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageSize, SourceFormat};

    fn stream(items: Vec<StreamItem>) -> BlockStream {
        BlockStream::from_items(SourceFormat::Markdown, true, items)
    }

    fn content(kind: crate::model::BlockKind, runs: Vec<TextRun>) -> StreamItem {
        StreamItem::Block(Block::Content(ContentBlock::new(kind, runs, 0)))
    }

    #[test]
    fn test_escape_html() {
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_render_runs() {
        let runs = vec![
            TextRun::bold("Bold"),
            TextRun::new(" and "),
            TextRun::italic("<soft>"),
        ];
        assert_eq!(
            render_runs(&runs),
            "<strong>Bold</strong> and <em>&lt;soft&gt;</em>"
        );
    }

    #[test]
    fn test_render_fragment() {
        use crate::model::BlockKind;

        let s = stream(vec![
            StreamItem::Break(BreakKind::Initial),
            content(BlockKind::Title, vec![TextRun::new("Title")]),
            content(BlockKind::Paragraph, vec![TextRun::new("Body")]),
            StreamItem::Break(BreakKind::SubsectionBreak),
            content(BlockKind::SectionHeader, vec![TextRun::new("Next")]),
        ]);
        let html = to_html(&s, &RenderOptions::default()).unwrap();
        assert_eq!(
            html,
            "<div class=\"page-break initial-page\"></div>\n\
             <h1>Title</h1>\n\
             <p>Body</p>\n\
             <div class=\"page-break subsection-break\"></div>\n\
             <h2>Next</h2>\n"
        );
    }

    #[test]
    fn test_numbered_list_start() {
        let mut list = ListBlock::starting_at(ListKind::Numbered, 4);
        list.push(ListItem::new(vec![TextRun::new("four")], 0));
        let s = stream(vec![StreamItem::Block(Block::List(list))]);

        let html = to_html(&s, &RenderOptions::default()).unwrap();
        assert_eq!(html, "<ol start=\"4\">\n<li>four</li>\n</ol>\n");
    }

    #[test]
    fn test_spacers() {
        let s = stream(vec![
            StreamItem::Block(Block::Spacer {
                source_line: 0,
                collapsed: true,
            }),
            StreamItem::Block(Block::Spacer {
                source_line: 1,
                collapsed: false,
            }),
        ]);
        assert_eq!(to_html(&s, &RenderOptions::default()).unwrap(), "<br>\n");
    }

    #[test]
    fn test_page_numbers() {
        let s = stream(vec![
            StreamItem::Break(BreakKind::Initial),
            StreamItem::Break(BreakKind::Overflow),
        ]);
        let options = RenderOptions::default().with_page_numbers(true);
        let html = to_html(&s, &options).unwrap();
        assert!(html.contains("data-page=\"1\""));
        assert!(html.contains("data-page=\"2\""));
    }

    #[test]
    fn test_standalone_document() {
        use crate::model::BlockKind;

        let s = stream(vec![
            StreamItem::Break(BreakKind::Initial),
            content(BlockKind::Title, vec![TextRun::new("Q&A")]),
        ]);
        let options = RenderOptions::default()
            .with_standalone(true)
            .with_page_size(PageSize::A4);
        let html = to_html(&s, &options).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Q&amp;A</title>"));
        assert!(html.contains("size: A4;"));
        assert!(html.contains("page-break-before: always;"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_standalone_without_styles() {
        let options = RenderOptions::default()
            .with_standalone(true)
            .with_styles(false)
            .with_title("Plain");
        let html = to_html(&stream(Vec::new()), &options).unwrap();
        assert!(!html.contains("<style>"));
        assert!(html.contains("<title>Plain</title>"));
    }
}
