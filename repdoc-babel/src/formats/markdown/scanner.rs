//! Line scanner for the report markdown dialect.
//!
//! Every line is classified on its own ([`classify_line`]); the only state the
//! scanner carries across lines is the open code block and the table being
//! consumed. Lines are compared with trailing whitespace removed.
//!
//! Skip prefixes are checked before anything else, code block lines included.

use crate::common::inline::{parse_inline, strip_markup};
use crate::common::table::{is_table_row_candidate, parse_table, starts_table};
use crate::ir::nodes::{
    DocNode, Document, Heading, InlineContent, List, ListItem, Paragraph, Placeholder, Verbatim,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

static NUMBERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s").expect("numbered item regex is valid"));

/// Markers that turn a paragraph into an image placeholder.
pub const DEFAULT_PLACEHOLDER_MARKERS: &[&str] =
    &["📸", "Рисунок", "СКРИНШОТ", "[Здесь необходимо"];

pub const DEFAULT_MAX_HEADING_LEVEL: usize = 5;

const FENCE: &str = "```";
const BULLET_MARKERS: &[&str] = &["- ", "− "];

/// Maps a line prefix to a fixed heading.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeadingRule {
    /// Prefix the raw line must start with (including the `#` markers).
    pub prefix: String,
    /// Output heading level.
    pub level: usize,
    /// Replacement heading text. Defaults to the line without its `#` markers.
    #[serde(default)]
    pub text: Option<String>,
}

/// Knobs of the line classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRules {
    /// Lines starting with one of these prefixes are dropped, even inside code blocks.
    pub skip_prefixes: Vec<String>,
    /// Tried in order before the generic `#` heading rule.
    pub heading_rules: Vec<HeadingRule>,
    pub placeholder_markers: Vec<String>,
    pub max_heading_level: usize,
}

impl ScanRules {
    pub fn skips(&self, line: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && line.starts_with(prefix.as_str()))
    }
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            skip_prefixes: Vec::new(),
            heading_rules: Vec::new(),
            placeholder_markers: DEFAULT_PLACEHOLDER_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_heading_level: DEFAULT_MAX_HEADING_LEVEL,
        }
    }
}

/// What a single line is, seen in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Skipped,
    Fence { language: Option<&'a str> },
    Blank,
    /// A pipe row. Whether it opens a table depends on the next line.
    TableRow,
    Heading { level: usize, text: String },
    Break,
    Bullet(&'a str),
    Numbered(&'a str),
    Placeholder(String),
    Paragraph(&'a str),
}

impl LineKind<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Skipped => "skip",
            LineKind::Fence { .. } => "fence",
            LineKind::Blank => "blank",
            LineKind::TableRow => "table",
            LineKind::Heading { .. } => "heading",
            LineKind::Break => "break",
            LineKind::Bullet(_) => "bullet",
            LineKind::Numbered(_) => "numbered",
            LineKind::Placeholder(_) => "placeholder",
            LineKind::Paragraph(_) => "paragraph",
        }
    }
}

/// Classify a line outside of a code block.
pub fn classify_line<'a>(line: &'a str, rules: &ScanRules) -> LineKind<'a> {
    let line = line.trim_end();

    if rules.skips(line) {
        return LineKind::Skipped;
    }
    if let Some(info) = line.strip_prefix(FENCE) {
        let info = info.trim();
        return LineKind::Fence {
            language: (!info.is_empty()).then_some(info),
        };
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if is_table_row_candidate(line) {
        return LineKind::TableRow;
    }
    classify_content(line, rules)
}

/// Classify a non-blank line that is not part of a table.
pub fn classify_content<'a>(line: &'a str, rules: &ScanRules) -> LineKind<'a> {
    let line = line.trim_end();
    let trimmed = line.trim();

    for rule in &rules.heading_rules {
        if line.starts_with(rule.prefix.as_str()) {
            let text = match &rule.text {
                Some(text) => text.clone(),
                None => line.trim_start_matches('#').trim().to_string(),
            };
            return LineKind::Heading {
                level: rule.level.max(1),
                text,
            };
        }
    }

    if let Some(rest) = line.strip_prefix('#') {
        let after_hashes = rest.trim_start_matches('#');
        let text = after_hashes.trim();
        if text.is_empty() {
            return LineKind::Skipped;
        }
        let hashes = line.len() - after_hashes.len();
        return LineKind::Heading {
            level: hashes.min(rules.max_heading_level.max(1)),
            text: text.to_string(),
        };
    }

    if trimmed == "---" {
        return LineKind::Break;
    }

    for marker in BULLET_MARKERS {
        if let Some(text) = trimmed.strip_prefix(marker) {
            return LineKind::Bullet(text);
        }
    }

    if let Some(m) = NUMBERED_RE.find(line) {
        return LineKind::Numbered(&line[m.end()..]);
    }

    let visible = strip_markup(line);
    if rules
        .placeholder_markers
        .iter()
        .any(|marker| !marker.is_empty() && visible.contains(marker.as_str()))
    {
        return LineKind::Placeholder(visible);
    }

    LineKind::Paragraph(line)
}

/// The classification a line ended up with, after code and table context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTrace {
    /// 1-based line number.
    pub line: usize,
    pub kind: &'static str,
}

/// Scan a whole source into a document.
pub fn scan(source: &str, rules: &ScanRules) -> Document {
    Scanner::new(rules).run(source).0
}

/// Scan a source and report how every line was classified.
pub fn trace(source: &str, rules: &ScanRules) -> Vec<LineTrace> {
    Scanner::new(rules).run(source).1
}

struct OpenCode<'a> {
    language: Option<String>,
    lines: Vec<&'a str>,
    opened_at: usize,
}

struct Scanner<'r> {
    rules: &'r ScanRules,
    blocks: Vec<DocNode>,
    traces: Vec<LineTrace>,
}

impl<'r> Scanner<'r> {
    fn new(rules: &'r ScanRules) -> Self {
        Self {
            rules,
            blocks: Vec::new(),
            traces: Vec::new(),
        }
    }

    fn run(mut self, source: &str) -> (Document, Vec<LineTrace>) {
        let lines: Vec<&str> = source.split('\n').map(str::trim_end).collect();
        let mut code: Option<OpenCode> = None;
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if self.rules.skips(line) {
                self.record(i, "skip");
                i += 1;
                continue;
            }

            if let Some(open) = code.as_mut() {
                if line.starts_with(FENCE) {
                    self.record(i, "fence");
                    if let Some(open) = code.take() {
                        self.push_code(open);
                    }
                } else {
                    self.record(i, "code");
                    open.lines.push(line);
                }
                i += 1;
                continue;
            }

            let kind = classify_line(line, self.rules);
            match kind {
                LineKind::Skipped => self.record(i, "skip"),
                LineKind::Blank => self.record(i, "blank"),
                LineKind::Fence { language } => {
                    self.record(i, "fence");
                    code = Some(OpenCode {
                        language: language.map(str::to_string),
                        lines: Vec::new(),
                        opened_at: i + 1,
                    });
                }
                LineKind::TableRow if starts_table(&lines, i) => {
                    let (table, next) = parse_table(&lines, i);
                    for row in i..next {
                        self.record(row, "table");
                    }
                    debug!(line = i + 1, rows = table.rows.len(), "table");
                    self.blocks.push(DocNode::Table(table));
                    i = next;
                    continue;
                }
                LineKind::TableRow => {
                    let kind = classify_content(line, self.rules);
                    self.record(i, kind.label());
                    self.push_line(i, kind);
                }
                other => {
                    self.record(i, other.label());
                    self.push_line(i, other);
                }
            }
            i += 1;
        }

        if let Some(open) = code.take() {
            warn!(
                line = open.opened_at,
                "code block is never closed, keeping it up to the end of input"
            );
            self.push_code(open);
        }

        (Document::new(self.blocks), self.traces)
    }

    fn record(&mut self, index: usize, kind: &'static str) {
        self.traces.push(LineTrace {
            line: index + 1,
            kind,
        });
    }

    fn push_code(&mut self, open: OpenCode) {
        debug!(line = open.opened_at, lines = open.lines.len(), "code block");
        self.blocks.push(DocNode::Verbatim(Verbatim {
            language: open.language,
            content: open.lines.join("\n"),
        }));
    }

    fn push_line(&mut self, index: usize, kind: LineKind) {
        debug!(line = index + 1, kind = kind.label(), "block");
        let node = match kind {
            LineKind::Heading { level, text } => DocNode::Heading(Heading {
                level,
                content: vec![InlineContent::Text(text)],
            }),
            LineKind::Break => DocNode::Break,
            LineKind::Bullet(text) => return self.push_item(false, text),
            LineKind::Numbered(text) => return self.push_item(true, text),
            LineKind::Placeholder(text) => DocNode::Placeholder(Placeholder { text }),
            LineKind::Paragraph(text) => DocNode::Paragraph(Paragraph {
                content: parse_inline(text),
            }),
            LineKind::Skipped | LineKind::Blank | LineKind::Fence { .. } | LineKind::TableRow => {
                return
            }
        };
        self.blocks.push(node);
    }

    fn push_item(&mut self, ordered: bool, text: &str) {
        let item = ListItem {
            content: parse_inline(text),
        };
        if let Some(DocNode::List(list)) = self.blocks.last_mut() {
            if list.ordered == ordered {
                list.items.push(item);
                return;
            }
        }
        self.blocks.push(DocNode::List(List {
            ordered,
            items: vec![item],
        }));
    }
}
