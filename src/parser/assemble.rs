//! Grouping classified lines into blocks.

use super::classify::ClassifiedLine;
use crate::model::{Block, BlockKind, ContentBlock, ListBlock, ListItem};

/// Merges consecutive list items into lists and emits everything else as
/// single blocks.
///
/// A list stays open while lines of its own item kind arrive. Any other
/// line closes it first, a switch between bullet and numbered included.
#[derive(Debug, Default)]
pub struct BlockAssembler {
    open_list: Option<ListBlock>,
    last_was_list: bool,
}

impl BlockAssembler {
    /// Create an assembler with no open list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a list is waiting for more items.
    pub fn has_open_list(&self) -> bool {
        self.open_list.is_some()
    }

    /// Feed the next line, appending any completed blocks to `out`.
    pub fn push(&mut self, line: ClassifiedLine, out: &mut Vec<Block>) {
        if let Some(kind) = line.kind.list_kind() {
            let continues = self.open_list.as_ref().is_some_and(|list| list.kind == kind);
            if !continues {
                self.close_list(out);
                self.open_list = Some(ListBlock::new(kind));
            }
            if let Some(list) = self.open_list.as_mut() {
                list.push(ListItem::new(line.content, line.source_line));
            }
            return;
        }

        self.close_list(out);

        let block = if line.kind == BlockKind::Blank {
            // Blank lines directly after a list keep their gap; anywhere
            // else the gap is already provided by the preceding block.
            Block::Spacer {
                source_line: line.source_line,
                collapsed: !self.last_was_list,
            }
        } else {
            Block::Content(ContentBlock::new(line.kind, line.content, line.source_line))
        };
        self.emit(block, out);
    }

    /// Flush the open list, if any.
    pub fn finish(mut self, out: &mut Vec<Block>) {
        self.close_list(out);
    }

    fn close_list(&mut self, out: &mut Vec<Block>) {
        if let Some(list) = self.open_list.take() {
            self.emit(Block::List(list), out);
        }
    }

    fn emit(&mut self, block: Block, out: &mut Vec<Block>) {
        self.last_was_list = block.is_list();
        out.push(block);
    }
}

/// Assemble a complete sequence of classified lines.
pub fn assemble(lines: impl IntoIterator<Item = ClassifiedLine>) -> Vec<Block> {
    let mut assembler = BlockAssembler::new();
    let mut blocks = Vec::new();
    for line in lines {
        assembler.push(line, &mut blocks);
    }
    assembler.finish(&mut blocks);
    blocks
}
