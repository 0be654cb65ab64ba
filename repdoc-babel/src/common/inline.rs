//! Inline markup: bold, italic, links and code spans.
//!
//! Markup is removed in four passes over the whole line, in this order: bold,
//! italic, links, code. Each pass reads the output of the previous one, so a
//! `*` between backticks is still taken as emphasis and `` `/api/**` `` reads
//! as `/api/`. Instead of dropping the markers, every pass leaves a pair of
//! sentinels around what it matched; [`parse_inline`] folds those into spans.
//! Unmatched markers stay as literal text.

use crate::ir::nodes::InlineContent;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold regex is valid"));
static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("italic regex is valid"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex is valid"));
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").expect("code regex is valid"));

/// Span kinds, each with its own pair of Unicode noncharacters as sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Bold,
    Italic,
    Link,
    Code,
}

impl Mark {
    const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Link, Mark::Code];

    fn open(self) -> char {
        match self {
            Mark::Bold => '\u{FDD0}',
            Mark::Italic => '\u{FDD2}',
            Mark::Link => '\u{FDD4}',
            Mark::Code => '\u{FDD6}',
        }
    }

    fn close(self) -> char {
        match self {
            Mark::Bold => '\u{FDD1}',
            Mark::Italic => '\u{FDD3}',
            Mark::Link => '\u{FDD5}',
            Mark::Code => '\u{FDD7}',
        }
    }

    /// The mark a sentinel belongs to, and whether it opens the span.
    fn of(c: char) -> Option<(Mark, bool)> {
        Mark::ALL.iter().find_map(|&mark| {
            if c == mark.open() {
                Some((mark, true))
            } else if c == mark.close() {
                Some((mark, false))
            } else {
                None
            }
        })
    }

    fn wrap(self, body: &str) -> String {
        format!("{}{}{}", self.open(), body, self.close())
    }
}

fn is_sentinel(c: char) -> bool {
    Mark::of(c).is_some()
}

fn without_sentinels(text: &str) -> String {
    text.chars().filter(|c| !is_sentinel(*c)).collect()
}

/// Run the four passes. Link targets are taken out of the text, in order.
fn mark_up(text: &str) -> (String, Vec<String>) {
    let text = without_sentinels(text);
    let text = BOLD_RE
        .replace_all(&text, |caps: &Captures| Mark::Bold.wrap(&caps[1]))
        .into_owned();
    let text = ITALIC_RE
        .replace_all(&text, |caps: &Captures| Mark::Italic.wrap(&caps[1]))
        .into_owned();
    let mut urls = Vec::new();
    let text = LINK_RE
        .replace_all(&text, |caps: &Captures| {
            urls.push(without_sentinels(&caps[2]));
            Mark::Link.wrap(&caps[1])
        })
        .into_owned();
    let text = CODE_RE
        .replace_all(&text, |caps: &Captures| Mark::Code.wrap(&caps[1]))
        .into_owned();
    (text, urls)
}

struct Frame {
    mark: Option<Mark>,
    url: Option<String>,
    spans: Vec<InlineContent>,
}

impl Frame {
    fn new(mark: Option<Mark>, url: Option<String>) -> Self {
        Self {
            mark,
            url,
            spans: Vec::new(),
        }
    }
}

/// Parse a line of text into inline spans.
pub fn parse_inline(text: &str) -> Vec<InlineContent> {
    let (marked, urls) = mark_up(text);
    let mut urls = urls.into_iter();
    let mut stack = vec![Frame::new(None, None)];
    let mut run = String::new();

    for c in marked.chars() {
        let Some((mark, opens)) = Mark::of(c) else {
            run.push(c);
            continue;
        };
        flush_text(&mut stack, &mut run);
        if opens {
            let url = (mark == Mark::Link).then(|| urls.next().unwrap_or_default());
            stack.push(Frame::new(Some(mark), url));
        } else {
            close(&mut stack, mark);
        }
    }
    flush_text(&mut stack, &mut run);

    while stack.len() > 1 {
        finish_top(&mut stack);
    }
    stack.pop().map(|root| root.spans).unwrap_or_default()
}

fn flush_text(stack: &mut [Frame], run: &mut String) {
    if run.is_empty() {
        return;
    }
    if let Some(top) = stack.last_mut() {
        push_text(&mut top.spans, run);
    }
    run.clear();
}

/// Close the innermost open span of `mark`. Spans opened inside it and still
/// open are closed with it and reopened right after.
fn close(stack: &mut Vec<Frame>, mark: Mark) {
    let Some(at) = stack.iter().rposition(|frame| frame.mark == Some(mark)) else {
        return;
    };
    let mut reopen = Vec::new();
    while stack.len() > at + 1 {
        reopen.extend(finish_top(stack));
    }
    finish_top(stack);
    for (mark, url) in reopen.into_iter().rev() {
        stack.push(Frame::new(Some(mark), url));
    }
}

/// Pop the innermost span into its parent. The root frame is never popped.
fn finish_top(stack: &mut Vec<Frame>) -> Option<(Mark, Option<String>)> {
    if stack.len() < 2 {
        return None;
    }
    let Frame { mark, url, spans } = stack.pop()?;
    let mark = mark?;
    let node = match mark {
        Mark::Bold => (!spans.is_empty()).then(|| InlineContent::Bold(spans)),
        Mark::Italic => (!spans.is_empty()).then(|| InlineContent::Italic(spans)),
        Mark::Code => {
            let code = plain_text(&spans);
            (!code.is_empty()).then_some(InlineContent::Code(code))
        }
        Mark::Link => Some(InlineContent::Link {
            text: plain_text(&spans),
            url: url.clone().unwrap_or_default(),
        }),
    };
    if let (Some(node), Some(parent)) = (node, stack.last_mut()) {
        match node {
            InlineContent::Text(text) => push_text(&mut parent.spans, &text),
            other => parent.spans.push(other),
        }
    }
    Some((mark, url))
}

fn push_text(spans: &mut Vec<InlineContent>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineContent::Text(prev)) = spans.last_mut() {
        prev.push_str(text);
    } else {
        spans.push(InlineContent::Text(text.to_string()));
    }
}

/// The visible text of a list of spans, markup removed.
pub fn plain_text(spans: &[InlineContent]) -> String {
    let mut out = String::new();
    collect_plain(spans, &mut out);
    out
}

fn collect_plain(spans: &[InlineContent], out: &mut String) {
    for span in spans {
        match span {
            InlineContent::Text(text) | InlineContent::Code(text) => out.push_str(text),
            InlineContent::Bold(children) | InlineContent::Italic(children) => {
                collect_plain(children, out)
            }
            InlineContent::Link { text, .. } => out.push_str(text),
        }
    }
}

/// Remove inline markup from a line, keeping its visible text.
pub fn strip_markup(text: &str) -> String {
    without_sentinels(&mark_up(text).0)
}
