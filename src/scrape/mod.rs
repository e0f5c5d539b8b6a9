//! Reading word lists and comments off Wordnik's HTML pages, for the things its API won't give us.
//!
//! There's no DOM here: pages are scanned for tag blocks with a few case-insensitive regexes,
//! and nesting is only tracked for the element being extracted.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod comments;
pub mod list;

static OPEN_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<([a-z][a-z0-9]*)\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap());
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    // Attribute pairs: key="value" or key='value' (no backreferences in Rust regex)
    Regex::new(r#"(?i)([a-zA-Z_:\-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static HTML_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// One element of a page: its opening tag and the HTML between that and its matching close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    pub open_tag: &'a str,
    pub inner: &'a str,
    pub outer: &'a str,
}

impl<'a> Element<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr(self.open_tag, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
    }
}

fn attr<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    ATTR_RE.captures_iter(open_tag).find_map(|c| {
        if !c.get(1)?.as_str().eq_ignore_ascii_case(name) {
            return None;
        }
        c.get(2).or_else(|| c.get(3)).map(|m| m.as_str())
    })
}

/// Every `<tag>` element in `html`, in document order (nested ones included).
pub(crate) fn elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    OPEN_TAG_RE
        .captures_iter(html)
        .filter(|c| c.get(1).is_some_and(|n| n.as_str().eq_ignore_ascii_case(tag)))
        .filter_map(|c| c.get(0))
        .map(|open| element_at(html, tag, open.start(), open.end()))
        .collect()
}

pub(crate) fn element_by_id<'a>(html: &'a str, id: &str) -> Option<Element<'a>> {
    OPEN_TAG_RE.captures_iter(html).find_map(|c| {
        let open = c.get(0)?;
        let tag = c.get(1)?.as_str();
        (attr(open.as_str(), "id") == Some(id)).then(|| element_at(html, tag, open.start(), open.end()))
    })
}

fn element_at<'a>(html: &'a str, tag: &str, start: usize, open_end: usize) -> Element<'a> {
    let open_tag = &html[start..open_end];
    if open_tag.ends_with("/>") {
        return Element {
            open_tag,
            inner: "",
            outer: open_tag,
        };
    }
    let (inner_end, close_end) = matching_close(html, tag, open_end);
    Element {
        open_tag,
        inner: &html[open_end..inner_end],
        outer: &html[start..close_end],
    }
}

/// Find where the element opened just before `from` closes, counting nested elements of the
/// same name. Unclosed elements run to the end of the document.
fn matching_close(html: &str, tag: &str, from: usize) -> (usize, usize) {
    let Ok(re) = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag))) else {
        return (html.len(), html.len());
    };
    let mut depth = 1usize;
    for c in re.captures_iter(&html[from..]) {
        let (Some(whole), Some(slash)) = (c.get(0), c.get(1)) else {
            continue;
        };
        if !slash.as_str().is_empty() {
            depth -= 1;
            if depth == 0 {
                return (from + whole.start(), from + whole.end());
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    (html.len(), html.len())
}

/// The first piece of non-blank text in `html`, decoded.
pub(crate) fn first_text(html: &str) -> Option<String> {
    let html = HTML_COMMENT_RE.replace_all(html, "");
    ANY_TAG_RE
        .split(&html)
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(decode_entities)
}

pub(crate) fn remove_html_comments(html: &str) -> String {
    HTML_COMMENT_RE.replace_all(html, "").into_owned()
}

pub(crate) fn decode_entities(s: &str) -> String {
    static ENTITY_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());
    ENTITY_RE
        .replace_all(s, |c: &regex::Captures| {
            let name = &c[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => name
                    .strip_prefix("#x")
                    .or_else(|| name.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| c[0].to_string(), String::from)
        })
        .into_owned()
}

/// Case-insensitive, stable sort.
pub fn sort_words(words: &mut [String]) {
    words.sort_by_cached_key(|w| w.to_lowercase());
}
