//! vtgrid headless runner
//!
//! Feeds a byte stream from a file or stdin through a terminal and prints
//! the resulting screen as text or a JSON snapshot.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vtgrid::{Terminal, TerminalConfig};

#[derive(Debug, Parser)]
#[command(name = "vtgrid-headless", version, about = "Run terminal emulation without a display")]
struct Args {
    /// Terminal width
    #[arg(short, long, default_value_t = 80)]
    cols: usize,

    /// Terminal height
    #[arg(short, long, default_value_t = 24)]
    rows: usize,

    /// Scrollback limit (0 = unbounded), overrides the config file
    #[arg(short, long)]
    scrollback: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feed the input in chunks of this many bytes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: Option<u64>,

    /// Output snapshot as JSON
    #[arg(short, long)]
    json: bool,

    /// Include scrollback in the output
    #[arg(long)]
    scrollback_out: bool,

    /// Input file (stdin when omitted)
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => TerminalConfig::load_from_file(path)?,
        None => TerminalConfig::default(),
    };
    if let Some(limit) = args.scrollback {
        config.scrollback_limit = limit;
    }

    let mut term = Terminal::with_config(args.cols, args.rows, &config)?;

    let input = match &args.input {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            data
        }
    };
    info!("Read {} bytes", input.len());

    match args.chunk_size {
        Some(size) => {
            let size = usize::try_from(size).unwrap_or(usize::MAX);
            for chunk in input.chunks(size) {
                term.write(chunk);
            }
        }
        None => term.write(&input),
    }

    if args.json {
        let snapshot = term.snapshot(args.scrollback_out);
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    println!("Terminal State ({}x{}):", term.cols(), term.rows());
    println!("Cursor: ({}, {})", term.cursor_y(), term.cursor_x());
    if !term.title().is_empty() {
        println!("Title: {}", term.title());
    }
    if args.scrollback_out {
        if term.scrollback_len() == 0 {
            warn!("Scrollback requested but empty");
        }
        println!("--- scrollback ({} lines)", term.scrollback_len());
        for line in term.screen().scrollback().iter() {
            println!("{}", line.text());
        }
    }
    println!("---");
    for y in 0..term.rows() {
        println!("{}", term.line_text(y)?);
    }
    println!("---");

    Ok(())
}
