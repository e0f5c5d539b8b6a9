use std::time::Duration;

use anyhow::Context;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

pub const WORDNIK_BASE: &str = "https://www.wordnik.com";

pub const USER_AGENT: &str = concat!("cit/", env!("CARGO_PKG_VERSION"), " (+https://www.wordnik.com)");

// Everything but unreserved characters, so a slug stays a single path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn agent() -> ureq::Agent {
    let cfg = ureq::Agent::config_builder()
        .timeout_connect(Some(Duration::from_secs(5)))
        .timeout_global(Some(Duration::from_secs(15)))
        .build();
    ureq::Agent::new_with_config(cfg)
}

pub fn fetch_html(url: &str) -> anyhow::Result<String> {
    debug!(%url, "fetching page");
    agent()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .with_context(|| format!("failed request for URL {url}"))?
        .into_body()
        .read_to_string()
        .context("read body")
}

pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

/// The Wordnik page for `word`, where its comments live.
pub fn word_page_url(word: &str) -> String {
    format!("{WORDNIK_BASE}/words/{}", encode_segment(word))
}

pub fn list_page_url(permalink: &str) -> String {
    format!("{WORDNIK_BASE}/lists/{}", encode_segment(permalink))
}

/// Asking the Wayback Machine to take a snapshot is just a matter of visiting this URL.
pub fn archive_save_url(url: &str) -> String {
    format!("https://web.archive.org/save/{url}")
}
