use std::{fmt, path::PathBuf, str::FromStr};

use clap::{ArgAction, Args, Parser, Subcommand};
use percent_encoding::percent_decode_str;

use crate::config::CredentialArgs;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log more (-v for progress, -vv for resolution details)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Make a citation for Wordnik, copy it, and optionally add the word to a list
    Cite(CiteArgs),
    /// Download a Wordnik list to a text file
    List {
        #[arg(value_name = "PERMALINK")]
        list: Permalink,
        /// Save to this file [default: <PERMALINK>.txt]
        #[arg(short, long)]
        outfile: Option<PathBuf>,
        /// Use the API instead of scraping (only works for your own lists)
        #[arg(long)]
        api: bool,
        #[command(flatten)]
        credentials: CredentialArgs,
    },
    /// Download comments on a word, or on every word of a list
    Comments {
        /// Word, e.g. "spinning rust"
        #[arg(short, long, conflicts_with = "list", required_unless_present = "list")]
        word: Option<String>,
        /// List permalink or URL, e.g. new-to-me--2015
        #[arg(short, long)]
        list: Option<Permalink>,
        /// Only comments by this user
        #[arg(short, long)]
        user: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct CiteArgs {
    /// Word to cite, emboldened wherever it appears in the quote
    pub word: String,
    /// Part of speech, e.g. n. adj.
    #[arg(short, long, default_value = "n.")]
    pub pos: String,
    /// A definition
    #[arg(long)]
    pub defn: Option<String>,
    /// Quotation snippet
    #[arg(short, long)]
    pub quote: Option<String>,
    /// Quotation source [default: guessed from the URL]
    #[arg(short, long)]
    pub source: Option<String>,
    /// Set the source in roman rather than italic
    #[arg(long)]
    pub source_roman: bool,
    /// Quotation date [default: from the URL, or today]
    #[arg(short, long)]
    pub date: Option<String>,
    /// Quotation link
    #[arg(short, long)]
    pub url: Option<String>,
    /// Permalink of the Wordnik list to add the word to
    #[arg(short, long, env = "WORDNIK_LIST")]
    pub list: Option<Permalink>,
    /// Answer yes to every question
    #[arg(short, long)]
    pub yes: bool,
    /// Don't copy the citation to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The slug naming a Wordnik list, as in `https://www.wordnik.com/lists/<permalink>`.
///
/// Either the bare permalink or the whole list URL is accepted.
pub struct Permalink(String);

impl Permalink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Permalink {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // Is this a list URL?
        let slug = match s.split_once("wordnik.com/lists/") {
            Some((_, rest)) => {
                let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
                percent_decode_str(&rest[..end])
                    .decode_utf8()
                    .map_err(|e| e.to_string())?
                    .into_owned()
            }
            // No? Must be the permalink itself then!
            None => s.to_string(),
        };

        if slug.is_empty() {
            return Err(format!("no list permalink in {s:?}"));
        }
        Ok(Permalink(slug))
    }
}
