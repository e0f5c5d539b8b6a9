use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

mod citation;
mod cli;
mod commands;
mod config;
mod desktop;
mod scrape;
mod web;
mod wordnik;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = match args.verbose {
        0 => "cit=warn",
        1 => "cit=info",
        _ => "cit=debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Cite(cite) => commands::cite(cite),
        Command::List {
            list,
            outfile,
            api,
            credentials,
        } => commands::list(list, outfile, api, credentials),
        Command::Comments { word, list, user } => commands::comments(word, list, user),
    }
}
