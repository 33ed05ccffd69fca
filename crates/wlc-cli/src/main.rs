//! wholelife CLI - whole-life-cost analysis for building components

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{analyze, attribute, compare, distribute};

#[cfg(feature = "serve")]
use commands::serve;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Distribute(args) => distribute::execute(args, &cli.global).await,
        cli::Commands::Attribute(args) => attribute::execute(args, &cli.global).await,
        cli::Commands::Analyze(args) => analyze::execute(args, &cli.global).await,
        cli::Commands::Compare(args) => compare::execute(args, &cli.global).await,
        #[cfg(feature = "serve")]
        cli::Commands::Serve(args) => serve::execute(args, &cli.global).await,
    }
}
