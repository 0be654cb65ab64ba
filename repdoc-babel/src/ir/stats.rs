//! Block counts for a document, reported after a conversion.

use super::nodes::{DocNode, Document};
use serde::Serialize;

/// Counts of the blocks a document will render as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub headings: usize,
    pub paragraphs: usize,
    pub list_items: usize,
    pub tables: usize,
    pub code_blocks: usize,
    pub placeholders: usize,
    pub breaks: usize,
}

impl DocumentStats {
    pub fn collect(doc: &Document) -> Self {
        let mut stats = DocumentStats::default();
        for node in &doc.children {
            match node {
                DocNode::Heading(_) => stats.headings += 1,
                DocNode::Paragraph(_) => stats.paragraphs += 1,
                DocNode::List(list) => stats.list_items += list.items.len(),
                DocNode::Table(_) => stats.tables += 1,
                DocNode::Verbatim(_) => stats.code_blocks += 1,
                DocNode::Placeholder(_) => stats.placeholders += 1,
                DocNode::Break => stats.breaks += 1,
            }
        }
        stats
    }

    /// Blocks that become exactly one paragraph in the output body.
    pub fn paragraph_blocks(&self) -> usize {
        self.headings
            + self.paragraphs
            + self.list_items
            + self.code_blocks
            + self.placeholders
            + self.breaks
    }
}
