//! Plain text rendering for block streams.

use crate::error::Result;
use crate::model::{Block, BlockKind, BlockStream, ListKind, Page};

use super::RenderOptions;

/// Separator written between pages.
pub const PAGE_SEPARATOR: &str = "\n\u{000C}\n";

/// Convert a block stream to plain text.
///
/// Pages are separated by a form feed. Titles are underlined with `=` and
/// section headers with `-`.
pub fn to_text(stream: &BlockStream, options: &RenderOptions) -> Result<String> {
    let pages: Vec<String> = stream
        .pages()
        .iter()
        .map(|page| render_page(page, options))
        .filter(|text| !text.is_empty())
        .collect();

    Ok(pages.join(PAGE_SEPARATOR))
}

fn render_page(page: &Page, options: &RenderOptions) -> String {
    let mut parts = Vec::new();

    for block in &page.blocks {
        match block {
            Block::Content(content) => {
                let text = content.text();
                let underline = match content.kind {
                    BlockKind::Title => Some('='),
                    BlockKind::SectionHeader => Some('-'),
                    _ => None,
                };
                match underline {
                    Some(c) => {
                        let rule: String = std::iter::repeat(c).take(text.chars().count()).collect();
                        parts.push(format!("{}\n{}", text, rule));
                    }
                    None => parts.push(text),
                }
            }
            Block::List(list) => {
                let lines: Vec<String> = list
                    .items
                    .iter()
                    .enumerate()
                    .map(|(offset, item)| match list.kind {
                        ListKind::Bullet => format!("• {}", item.text()),
                        ListKind::Numbered => format!("{}. {}", list.start + offset, item.text()),
                    })
                    .collect();
                parts.push(lines.join("\n"));
            }
            Block::Spacer { .. } => {}
        }
    }

    if parts.is_empty() {
        return String::new();
    }
    if options.show_page_numbers {
        parts.push(format!("[page {}]", page.number));
    }
    parts.join("\n\n")
}
