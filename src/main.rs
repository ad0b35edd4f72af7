//! Cardwright - decorate authored content blocks into styled HTML sections.

#![allow(dead_code)]

mod block;
mod cli;
mod config;
mod dom;
mod logger;
mod page;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Render(args) => cli::render::render(args, &config),
        Commands::Build(_) => cli::build::build_site(&config, false).map(|_| ()),
        Commands::Blocks { json } => cli::blocks::list_blocks(*json),
    }
}
