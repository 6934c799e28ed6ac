//! Integration tests for the visitor pattern.

use std::sync::{Arc, Mutex};

use pagemark::model::{BlockKind, BreakKind, ContentBlock, ListItem, ListKind, TextRun};
use pagemark::render::visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, MaxHeadingDepthVisitor, SkipBreaksVisitor,
    VisitorAction,
};
use pagemark::render::HtmlRenderer;
use pagemark::{parse_markdown, PageBreakOptions, RenderOptions};

/// Custom visitor that records what it sees.
#[derive(Clone, Default)]
struct RecordingVisitor {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingVisitor {
    fn record(&self, event: String) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DocumentVisitor for RecordingVisitor {
    fn visit_heading(&mut self, heading: &ContentBlock, level: u8) -> VisitorAction {
        self.record(format!("h{} {}", level, heading.text()));
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, para: &ContentBlock) -> VisitorAction {
        self.record(format!("p {}", para.text()));
        VisitorAction::Continue
    }

    fn visit_list_item(
        &mut self,
        item: &ListItem,
        ordinal: usize,
        kind: ListKind,
    ) -> VisitorAction {
        self.record(format!("li {:?} {} {}", kind, ordinal, item.text()));
        VisitorAction::Continue
    }

    fn visit_page_break(&mut self, kind: BreakKind) -> VisitorAction {
        self.record(format!("break {:?}", kind));
        VisitorAction::Continue
    }

    fn on_page_start(&mut self, page_number: u32) {
        self.record(format!("start {}", page_number));
    }

    fn on_page_end(&mut self, page_number: u32) {
        self.record(format!("end {}", page_number));
    }
}

fn heading(text: &str, kind: BlockKind) -> ContentBlock {
    ContentBlock::new(kind, vec![TextRun::new(text)], 0)
}

#[test]
fn test_default_visitor_all_continue() {
    let mut visitor = DefaultVisitor::new();
    let para = heading("Body", BlockKind::Paragraph);
    let item = ListItem::new(vec![TextRun::new("one")], 0);

    assert_eq!(visitor.visit_paragraph(&para), VisitorAction::Continue);
    assert_eq!(
        visitor.visit_heading(&heading("Title", BlockKind::Title), 1),
        VisitorAction::Continue
    );
    assert_eq!(
        visitor.visit_list_item(&item, 1, ListKind::Bullet),
        VisitorAction::Continue
    );
    assert_eq!(visitor.visit_spacer(), VisitorAction::Continue);
    assert_eq!(
        visitor.visit_page_break(BreakKind::Overflow),
        VisitorAction::Continue
    );
}

#[test]
fn test_skip_breaks_visitor() {
    let stream = parse_markdown("# One\n# Two", &PageBreakOptions::default());
    let html = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(SkipBreaksVisitor)
        .render(&stream)
        .unwrap();

    assert_eq!(html, "<h1>One</h1>\n<h1>Two</h1>\n");
}

#[test]
fn test_max_heading_depth_visitor() {
    let mut visitor = MaxHeadingDepthVisitor::new(2);

    let action = visitor.visit_heading(&heading("Title", BlockKind::Title), 1);
    assert_eq!(action, VisitorAction::Continue);

    let action = visitor.visit_heading(&heading("Deep", BlockKind::SubsectionHeader), 3);
    assert!(action.is_replace());
    assert_eq!(action.replacement(), Some("<h2>Deep</h2>\n"));
}

#[test]
fn test_composite_visitor_chaining() {
    let mut composite = CompositeVisitor::new()
        .with_visitor(SkipBreaksVisitor)
        .with_visitor(MaxHeadingDepthVisitor::new(1))
        .with_visitor(DefaultVisitor);

    // First matching action wins
    assert!(composite.visit_page_break(BreakKind::Initial).should_skip());

    // Heading goes to second visitor
    let action = composite.visit_heading(&heading("Part", BlockKind::SectionHeader), 2);
    assert_eq!(action.replacement(), Some("<h1>Part</h1>\n"));

    // Paragraph continues through all
    let action = composite.visit_paragraph(&heading("Body", BlockKind::Paragraph));
    assert_eq!(action, VisitorAction::Continue);
}

#[test]
fn test_visitor_action_methods() {
    let continue_action = VisitorAction::Continue;
    assert!(!continue_action.should_skip());
    assert!(!continue_action.is_replace());
    assert!(continue_action.replacement().is_none());

    let skip_action = VisitorAction::Skip;
    assert!(skip_action.should_skip());
    assert!(!skip_action.is_replace());

    let replace_action = VisitorAction::Replace("replaced".to_string());
    assert!(replace_action.is_replace());
    assert_eq!(replace_action.replacement(), Some("replaced"));
}

#[test]
fn test_recording_visitor_sees_pages() {
    let visitor = RecordingVisitor::default();
    let options = PageBreakOptions::new().with_page_capacity(5);
    let stream = parse_markdown("# T\n1. a\n2. b\n3. c", &options);

    HtmlRenderer::new(RenderOptions::default())
        .with_visitor(visitor.clone())
        .render(&stream)
        .unwrap();

    assert_eq!(
        visitor.events(),
        vec![
            "start 1",
            "break Initial",
            "h1 T",
            "li Numbered 1 a",
            "li Numbered 2 b",
            "end 1",
            "start 2",
            "break Overflow",
            "li Numbered 3 c",
            "end 2",
        ]
    );
}

#[test]
fn test_replacing_visitor_output() {
    struct Shout;

    impl DocumentVisitor for Shout {
        fn visit_paragraph(&mut self, para: &ContentBlock) -> VisitorAction {
            VisitorAction::Replace(format!("<p>{}</p>\n", para.text().to_uppercase()))
        }
    }

    let stream = parse_markdown("quiet words", &PageBreakOptions::default());
    let html = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(Shout)
        .render(&stream)
        .unwrap();

    assert!(html.ends_with("<p>QUIET WORDS</p>\n"));
}
