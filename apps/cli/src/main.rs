//! vaultsite CLI — build a static research wiki.
//!
//! Fetches top-cited papers from OpenAlex into markdown pages and renders the
//! `[[wikilink]]` graph of a local note vault as an interactive viewer.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::run(cli))
}
