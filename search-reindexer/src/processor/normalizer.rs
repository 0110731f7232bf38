//! Markdown stripping for content previews.
//!
//! The rules run in a fixed order, since later rules rely on earlier ones having
//! removed their spans (inline code is stripped before emphasis, so
//! `` `**x**` `` disappears whole). A pass is repeated until the text stops
//! changing: removing one span can expose another (`[[a](b)](c)`), and
//! running to a fixpoint makes `normalize` idempotent.

use lazy_static::lazy_static;
use regex::Regex;

/// Default preview length, in characters.
pub const DEFAULT_PREVIEW_MAX_LEN: usize = 200;

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`\n]+`").unwrap();
    // The leading group keeps `![alt](url)` away from the link rule.
    static ref LINK: Regex = Regex::new(r"(^|[^!])\[([^\]]+)\]\(([^)]+)\)").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref HEADING: Regex = Regex::new(r"(?m)^[ \t]*#+\s+").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
}

/// Strip lightweight markdown from `raw`, collapse whitespace, and cut the
/// result to at most `max_len` characters.
///
/// The cut is hard: no ellipsis is appended. Malformed markup is left in
/// place, except that stray backticks and `![` openers are always removed.
///
/// # Example
///
/// ```
/// use search_reindexer::processor::normalize;
///
/// let preview = normalize("# Title\n**Bold** and [link](http://x)", 200);
/// assert_eq!(preview, "Title Bold and link");
/// ```
pub fn normalize(raw: &str, max_len: usize) -> String {
    let mut text = strip_pass(raw);
    loop {
        let next = strip_pass(&text);
        if next == text {
            break;
        }
        text = next;
    }

    truncate(&text, max_len)
}

/// One application of every rule, in order.
fn strip_pass(input: &str) -> String {
    let text = FENCED_CODE.replace_all(input, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "${1}${2}");
    let text = IMAGE.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");

    // Unmatched markers left behind by malformed input
    let text = text.replace('`', "").replace("![", "[");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}
