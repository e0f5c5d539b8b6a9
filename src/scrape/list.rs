use std::{fs, path::Path};

use anyhow::{Context, anyhow};
use tracing::{debug, info};

use crate::{
    scrape::{element_by_id, elements, first_text, remove_html_comments},
    web::{fetch_html, list_page_url},
};

/// Fetch the public page of a Wordnik list and return its words in page order.
///
/// Works for anybody's list; the API only hands out your own.
pub fn scrape_list(permalink: &str) -> anyhow::Result<Vec<String>> {
    let url = list_page_url(permalink);
    let html = fetch_html(&url)?;
    let words = parse_list_page(&html).with_context(|| format!("reading list {url}"))?;
    info!(%permalink, count = words.len(), "scraped list");
    Ok(words)
}

/// Pull the words out of a list page.
///
/// ```html
/// <ul id="sortable_wordlist">
///   <li class="word"><a href="/words/thinhead">thinhead</a>
///     <span class="details">was added by <a href="/users/hernesheir">hernesheir</a></span>
///   </li>
///   ...
/// ```
///
/// Entries marked `hidden` are skipped.
pub fn parse_list_page(html: &str) -> anyhow::Result<Vec<String>> {
    let html = remove_html_comments(html);
    let list = element_by_id(&html, "sortable_wordlist")
        .ok_or_else(|| anyhow!("no word list found on page"))?;
    let words = elements(list.inner, "li")
        .into_iter()
        .filter(|li| li.has_class("word"))
        .filter(|li| {
            let hidden = li.has_class("hidden");
            if hidden {
                debug!(entry = li.inner, "skipping hidden list entry");
            }
            !hidden
        })
        .filter_map(|li| first_text(li.inner))
        .collect();
    Ok(words)
}

/// Save one word per line.
pub fn write_words(path: &Path, words: &[String]) -> anyhow::Result<()> {
    fs::write(path, words.join("\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), count = words.len(), "saved words");
    Ok(())
}
