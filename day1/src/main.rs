use day1::{find_top_three, get_biggest_three_total, DEFAULT_INPUT};

use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;

/// Sums the three largest calorie groups in the puzzle input.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file, or `-` to read stdin
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    let res = if args.input.as_os_str() == "-" {
        let stdin = io::stdin();
        find_top_three(stdin.lock().lines(), &args.input).and_then(|top| top.sum())
    } else {
        get_biggest_three_total(&args.input)
    };

    match res {
        Ok(answer) => {
            println!("{answer}");
            Ok(())
        }
        Err(e) => {
            if let Some(report) = e.diagnostic() {
                eprintln!("{report}");
            }
            Err(e.into())
        }
    }
}
