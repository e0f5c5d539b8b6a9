use anyhow::{Context, anyhow};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
    config::WordnikConfig,
    web::{USER_AGENT, agent, encode_segment},
};

const API_BASE: &str = "https://api.wordnik.com/v4";

/// An authenticated connection to the Wordnik API.
///
/// Lists can only be read and written by their owner, so every call carries the token from
/// logging in as that user.
pub struct Client {
    agent: ureq::Agent,
    api_key: String,
    token: String,
}

impl Client {
    pub fn login(config: &WordnikConfig) -> anyhow::Result<Self> {
        let agent = agent();
        let url = authenticate_url(&config.username);
        debug!(username = %config.username, "authenticating with Wordnik");
        let body = agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .query("api_key", &config.api_key)
            .query("password", &config.password)
            .call()
            .with_context(|| format!("failed to log in to Wordnik as {}", config.username))?
            .into_body()
            .read_to_string()
            .context("read body")?;
        let token = parse_token(&body)?;
        Ok(Client {
            agent,
            api_key: config.api_key.clone(),
            token,
        })
    }

    pub fn add_words_to_list(&self, permalink: &str, words: &[&str]) -> anyhow::Result<()> {
        let url = list_words_url(permalink);
        self.agent
            .post(url.as_str())
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .header("auth_token", self.token.as_str())
            .query("api_key", &self.api_key)
            .send(words_payload(words).as_str())
            .with_context(|| format!("failed to add {} word(s) to list {permalink}", words.len()))?;
        info!(%permalink, ?words, "added to list");
        Ok(())
    }

    pub fn list_words(&self, permalink: &str) -> anyhow::Result<Vec<String>> {
        let url = list_words_url(permalink);
        let body = self
            .agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .header("auth_token", self.token.as_str())
            .query("api_key", &self.api_key)
            .query("limit", "5000")
            .call()
            .with_context(|| format!("failed to download list {permalink}"))?
            .into_body()
            .read_to_string()
            .context("read body")?;
        parse_words(&body)
    }
}

fn authenticate_url(username: &str) -> String {
    format!("{API_BASE}/account.json/authenticate/{}", encode_segment(username))
}

fn list_words_url(permalink: &str) -> String {
    format!("{API_BASE}/wordList.json/{}/words", encode_segment(permalink))
}

fn words_payload(words: &[&str]) -> String {
    Value::Array(words.iter().map(|w| json!({ "word": w })).collect()).to_string()
}

fn parse_token(body: &str) -> anyhow::Result<String> {
    let v: Value = serde_json::from_str(body).context("authentication response is not JSON")?;
    v.get("token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no token in authentication response"))
}

fn parse_words(body: &str) -> anyhow::Result<Vec<String>> {
    let v: Value = serde_json::from_str(body).context("word list response is not JSON")?;
    let entries = v
        .as_array()
        .ok_or_else(|| anyhow!("word list response is not an array"))?;
    Ok(entries
        .iter()
        .filter_map(|e| e.get("word").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}
