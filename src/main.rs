//! Hexplot CLI
//!
//! Reads a byte command stream (a file, or stdin) and writes the resulting
//! plotter commands (to a file, or stdout).

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use hexplot::codec::Sixteen14Codec;
use hexplot::commands::CommandTable;
use hexplot::draw::{Board, Plane};
use hexplot::processor::StreamProcessor;
use hexplot::reader::TokenSource;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "hexplot")]
#[command(version)]
#[command(about = "Byte encoded vector based drawing system", long_about = None)]
struct CliArgs {
    /// Path to the byte command file (defaults to stdin)
    #[arg(short = 'f', value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to the output file (defaults to stdout)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            eprintln!("hexplot: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let source = TokenSource::new(input);
    let board = Board::new(Plane::default(), output);

    let mut processor = StreamProcessor::new(
        source,
        Sixteen14Codec::new(),
        board,
        CommandTable::default(),
    );

    // Input and output are dropped (and so released) on both the success and
    // the error path.
    processor.run()?;
    Ok(())
}
