use std::process::ExitCode;

use clap::{Parser, Subcommand};
use segtree::SegtreeError;
use tracing_subscriber::EnvFilter;

mod bench;
mod demo;

#[derive(clap::Parser)]
#[clap(about = "Segment tree walkthroughs and timings")]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a walkthrough and print each result.
    Demo {
        #[clap(value_enum)]
        example: demo::Example,
        /// Also print the tree structure.
        #[clap(short, long)]
        dump: bool,
    },
    /// Time construction, queries and updates on random input.
    Bench(bench::Params),
}

fn main() -> Result<ExitCode, SegtreeError> {
    // Logs go to stderr, results to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Demo { example, dump } => demo::run(example, dump)?,
        Command::Bench(params) => {
            if !bench::run(&params)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
