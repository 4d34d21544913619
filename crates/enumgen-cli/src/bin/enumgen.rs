#![allow(clippy::print_stderr)]

use clap::Parser;
use colored::Colorize;
use enumgen::WriteOutcome;
use enumgen_cli::args::CliArgs;
use enumgen_cli::driver::{self, is_usage_error};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    // Initialize tracing if ENUMGEN_LOG or RUST_LOG is set.
    enumgen::tracing_config::init_tracing();

    let args = CliArgs::parse();

    if args.show_config {
        match serde_json::to_string_pretty(&args.render_config()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{} {err}", "error:".red().bold());
                std::process::exit(EXIT_FAILURE);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    match driver::run(&args) {
        Ok(summary) => {
            if summary.outcome == WriteOutcome::Unchanged {
                tracing::info!(out = %summary.out.display(), "already up to date");
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Err(err) if is_usage_error(&err) => {
            eprintln!("{}", CliArgs::usage());
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(EXIT_USAGE);
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            std::process::exit(EXIT_FAILURE);
        }
    }
}
