use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::{
    citation::{self, CitationFields, date::TemporalResolver},
    cli::{CiteArgs, Permalink},
    config::CredentialArgs,
    desktop::{confirm, copy_to_clipboard, open_in_browser},
    scrape::{comments::scrape_word_comments, list, sort_words},
    web::{archive_save_url, word_page_url},
    wordnik::Client,
};

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal()
}

fn status(ok: bool, message: &str) {
    let mark = match (ok, use_color()) {
        (true, true) => "✓".green().to_string(),
        (false, true) => "✗".red().to_string(),
        (true, false) => "✓".to_string(),
        (false, false) => "✗".to_string(),
    };
    eprintln!("{mark} {message}");
}

fn open_or_warn(url: &str) {
    if let Err(e) = open_in_browser(url) {
        warn!(error = %e, %url, "could not open browser");
    }
}

fn ask(assume_yes: bool, question: &str) -> anyhow::Result<bool> {
    if assume_yes {
        eprintln!("{question} yes");
        return Ok(true);
    }
    Ok(confirm(io::stdin().lock(), io::stderr(), question, Some(false))?)
}

/// Print a citation, put it on the clipboard, then offer to add the word to a list and to
/// archive the cited page.
///
/// Wordnik has no API for posting comments, so the word's page is opened for the citation to be
/// pasted in by hand.
pub fn cite(args: CiteArgs) -> anyhow::Result<()> {
    let fields = CitationFields::new(args.word)?
        .with_part_of_speech(Some(args.pos))
        .with_definition(args.defn)
        .with_quote(args.quote)
        .with_source(args.source, args.source_roman)
        .with_date(args.date)
        .with_url(args.url);

    let text = citation::cite(&fields, &TemporalResolver::from_local_clock())?;
    println!("{text}\n");

    if !args.no_clipboard {
        match copy_to_clipboard(&text.to_string()) {
            Ok(()) => status(true, "Copied to clipboard"),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                status(false, &format!("Not copied to clipboard: {e}"));
            }
        }
    }

    let word = fields.word();
    if let Some(list) = &args.list {
        if ask(args.yes, &format!("Add '{word}' to {list} on Wordnik?"))? {
            let config = args.credentials.require()?;
            Client::login(&config)?.add_words_to_list(list.as_str(), &[word])?;
            status(true, &format!("Added '{word}' to {list}"));

            let page = word_page_url(word);
            println!("{page}");
            open_or_warn(&page);
        } else {
            eprintln!("Not posting");
        }
    }

    if let Some(url) = fields.url() {
        if ask(args.yes, &format!("Save '{url}' to Internet Archive?"))? {
            let save = archive_save_url(url);
            println!("{save}");
            open_or_warn(&save);
            info!(%url, "requested snapshot");
        } else {
            eprintln!("Not saving");
        }
    }

    Ok(())
}

/// Fetch a list's words, sorted case-insensitively, print them and save them one per line.
pub fn list(
    permalink: Permalink,
    outfile: Option<PathBuf>,
    api: bool,
    credentials: CredentialArgs,
) -> anyhow::Result<()> {
    let mut words = if api {
        let config = credentials.require()?;
        Client::login(&config)?.list_words(permalink.as_str())?
    } else {
        list::scrape_list(permalink.as_str())?
    };
    sort_words(&mut words);

    println!("{}", words.join("\n"));
    let outfile = outfile.unwrap_or_else(|| PathBuf::from(format!("{permalink}.txt")));
    list::write_words(&outfile, &words)?;
    status(
        true,
        &format!("{} words saved to {}", words.len(), outfile.display()),
    );
    Ok(())
}

/// Print the comments on one word, or on each word of a list, optionally only those by `user`.
pub fn comments(
    word: Option<String>,
    permalink: Option<Permalink>,
    user: Option<String>,
) -> anyhow::Result<()> {
    let user = user.as_deref();
    let Some(permalink) = permalink else {
        let word = word.context("give a word or a list")?;
        for comment in scrape_word_comments(&word, user)? {
            println!("{comment}");
        }
        return Ok(());
    };

    let mut words = list::scrape_list(permalink.as_str())?;
    sort_words(&mut words);

    let bar = ProgressBar::new(words.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    let (mut succeeded, mut failed) = (0usize, 0usize);
    for word in &words {
        bar.set_message(word.clone());
        match scrape_word_comments(word, user) {
            Ok(found) => {
                succeeded += 1;
                bar.suspend(|| found.iter().for_each(|c| println!("{c}")));
            }
            Err(e) => {
                failed += 1;
                bar.suspend(|| status(false, &format!("{word}: {e:#}")));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let (ok, err) = if use_color() {
        (
            format!("✓ {succeeded}").green().to_string(),
            format!("✗ {failed}").red().to_string(),
        )
    } else {
        (format!("✓ {succeeded}"), format!("✗ {failed}"))
    };
    eprintln!("{ok}  {err}");
    Ok(())
}
