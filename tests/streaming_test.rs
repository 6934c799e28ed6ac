//! Integration tests for lazy parsing and the streaming renderer.

use pagemark::parser::DocumentParser;
use pagemark::render::streaming::{collect_content, RenderEvent, StreamingRenderer};
use pagemark::render::{to_html, RenderOptions};
use pagemark::{BreakKind, PageBreakOptions, ParseOptions, StreamItem};

const SAMPLE: &str = "# Introduction\nThis is the introduction.\n\
                      # Chapter 1\nChapter content goes here.\n\
                      # Conclusion\nConclusion text.";

#[test]
fn test_streaming_renderer_basic() {
    let parser = DocumentParser::default();
    let events: Vec<_> =
        StreamingRenderer::new(parser.stream(SAMPLE), RenderOptions::default()).collect();

    assert!(matches!(
        events.first(),
        Some(RenderEvent::PageStart { number: 1, .. })
    ));
    assert!(matches!(events.last(), Some(RenderEvent::DocumentEnd)));
}

#[test]
fn test_streaming_renderer_page_events() {
    let parser = DocumentParser::default();
    let events: Vec<_> =
        StreamingRenderer::new(parser.stream(SAMPLE), RenderOptions::default()).collect();

    let page_starts: Vec<Option<BreakKind>> = events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::PageStart { opened_by, .. } => Some(*opened_by),
            _ => None,
        })
        .collect();
    let page_ends = events
        .iter()
        .filter(|e| matches!(e, RenderEvent::PageEnd { .. }))
        .count();

    assert_eq!(
        page_starts,
        vec![
            Some(BreakKind::Initial),
            Some(BreakKind::SectionBreak),
            Some(BreakKind::SectionBreak),
        ]
    );
    assert_eq!(page_ends, 3);
}

#[test]
fn test_streaming_renderer_content() {
    let parser = DocumentParser::default();
    let content = collect_content(StreamingRenderer::new(
        parser.stream(SAMPLE),
        RenderOptions::default(),
    ));

    assert!(content.contains("<h1>Introduction</h1>"));
    assert!(content.contains("<h1>Chapter 1</h1>"));
    assert!(content.contains("<p>Conclusion text.</p>"));
}

#[test]
fn test_streaming_matches_eager() {
    let options = RenderOptions::default().with_page_numbers(true);
    let parser = DocumentParser::new(
        ParseOptions::new().with_page_breaks(PageBreakOptions::new().with_page_capacity(4)),
    );

    let streamed = collect_content(StreamingRenderer::new(parser.stream(SAMPLE), options.clone()));
    let eager = to_html(&parser.parse(SAMPLE), &options).unwrap();
    assert_eq!(streamed, eager);
}

#[test]
fn test_lazy_block_stream() {
    let text = (0..10_000)
        .map(|n| format!("Line {} of a very long document.", n))
        .collect::<Vec<_>>()
        .join("\n");
    let parser = DocumentParser::new(ParseOptions::new().markdown());

    let first: Vec<StreamItem> = parser.stream(&text).take(3).collect();
    assert_eq!(first[0], StreamItem::Break(BreakKind::Initial));
    assert_eq!(first.len(), 3);
}

#[test]
fn test_stream_collects_to_parse() {
    let parser = DocumentParser::default();
    let blocks = parser.stream(SAMPLE);
    assert!(blocks.is_paginated());

    assert_eq!(blocks.into_stream(), parser.parse(SAMPLE));
}
