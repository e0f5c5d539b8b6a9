use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::{
    scrape::{element_by_id, elements, remove_html_comments},
    web::{WORDNIK_BASE, fetch_html, word_page_url},
};

static ROOT_RELATIVE_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhref\s*=\s*(["'])/([^/])"#).unwrap());

/// Fetch the comments on `word`, keeping only those by `user` when given.
pub fn scrape_word_comments(word: &str, user: Option<&str>) -> anyhow::Result<Vec<String>> {
    let html = fetch_html(&word_page_url(word))?;
    let comments = parse_comments(&html, user);
    info!(%word, count = comments.len(), "scraped comments");
    Ok(comments)
}

/// The body HTML of each comment on a word page.
///
/// Report links and HTML comments are dropped, and links relative to the site root are made
/// absolute so the markup still works once it's taken off Wordnik. A page without a comment
/// section simply has no comments.
pub fn parse_comments(html: &str, user: Option<&str>) -> Vec<String> {
    let Some(section) = element_by_id(html, "commentsOnWord") else {
        debug!("no comment section on page");
        return Vec::new();
    };
    elements(section.inner, "li")
        .into_iter()
        .filter(|li| li.has_class("comment"))
        .filter(|li| user.is_none_or(|user| written_by(li.inner, user)))
        .filter_map(|li| {
            elements(li.inner, "div")
                .into_iter()
                .find(|div| div.has_class("body"))
        })
        .map(|body| clean_body(body.inner))
        .collect()
}

fn written_by(comment: &str, user: &str) -> bool {
    let profile = format!("/users/{}", user.to_lowercase());
    elements(comment, "span")
        .into_iter()
        .find(|span| span.has_class("author"))
        .and_then(|span| elements(span.inner, "a").into_iter().find_map(|a| a.attr("href")))
        .is_some_and(|href| href.to_lowercase() == profile)
}

fn clean_body(body: &str) -> String {
    let original = remove_html_comments(body);
    let mut body = original.clone();
    for report in elements(&original, "a")
        .into_iter()
        .filter(|a| a.has_class("report_comment"))
    {
        body = body.replacen(report.outer, "", 1);
    }
    ROOT_RELATIVE_HREF_RE
        .replace_all(&body, format!("href=${{1}}{WORDNIK_BASE}/${{2}}").as_str())
        .trim()
        .to_string()
}
