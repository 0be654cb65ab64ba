//! Core data structures for the Intermediate Representation (IR).

use serde::Serialize;

/// A block-level node of a report document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DocNode {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    Table(Table),
    Verbatim(Verbatim),
    Placeholder(Placeholder),
    /// A thematic break, rendered as an empty paragraph.
    Break,
}

impl DocNode {
    /// Stable node type name, used by visualizations and logs.
    pub fn node_type(&self) -> &'static str {
        match self {
            DocNode::Heading(_) => "Heading",
            DocNode::Paragraph(_) => "Paragraph",
            DocNode::List(_) => "List",
            DocNode::Table(_) => "Table",
            DocNode::Verbatim(_) => "Verbatim",
            DocNode::Placeholder(_) => "Placeholder",
            DocNode::Break => "Break",
        }
    }
}

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub children: Vec<DocNode>,
}

impl Document {
    pub fn new(children: Vec<DocNode>) -> Self {
        Self { children }
    }

    /// Iterate over the headings of the document in order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.children.iter().filter_map(|node| match node {
            DocNode::Heading(h) => Some(h),
            _ => None,
        })
    }
}

/// Represents a heading with a specific level (1 based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: usize,
    pub content: Vec<InlineContent>,
}

/// Represents a paragraph of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<InlineContent>,
}

/// A contiguous run of list items of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Represents an item in a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub content: Vec<InlineContent>,
}

/// Represents a block of code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verbatim {
    pub language: Option<String>,
    pub content: String,
}

/// A marker paragraph telling the author where a figure or screenshot goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub text: String,
}

/// Represents a table with a single header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub header: TableRow,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Number of columns, taken from the header row.
    pub fn columns(&self) -> usize {
        self.header.cells.len()
    }
}

/// Represents a table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// Represents a table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub content: Vec<InlineContent>,
    pub align: TableCellAlignment,
}

impl TableCell {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            align: TableCellAlignment::None,
        }
    }
}

/// Alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableCellAlignment {
    Left,
    Center,
    Right,
    None,
}

/// Represents inline content, such as text, bold, italics, etc.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum InlineContent {
    Text(String),
    Bold(Vec<InlineContent>),
    Italic(Vec<InlineContent>),
    Code(String),
    Link { text: String, url: String },
}

impl InlineContent {
    pub fn text(value: impl Into<String>) -> Self {
        InlineContent::Text(value.into())
    }
}
