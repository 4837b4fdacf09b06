//! sizeunits - Parse and format sizes, weights and durations
//!
//! Usage:
//!   sizeunits "5ft8in" -s U                   # Single quantity
//!   sizeunits -d weight "2 lb" -s ,.2mu        # Other dimensions
//!   sizeunits "2m" -g o                       # Everyday comparison
//!   sizeunits -c "2m/3s until 12m"            # Change expression as JSON
//!   echo "1,000 km" | sizeunits               # Pipe mode
//!   sizeunits --server                        # JSON-RPC over stdin/stdout

mod convert;
mod server;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use sizeunits_core::{Change, Dimension, UnitCatalog};

#[derive(Parser, Debug)]
#[command(name = "sizeunits")]
#[command(about = "Parse and format sizes, weights and durations", long_about = None)]
struct Args {
    /// Quantity (or change expression with --change) to read
    text: Option<String>,

    /// Dimension of the input: size, weight or time
    #[arg(short, long, default_value = "size", value_parser = parse_dimension)]
    dimension: Dimension,

    /// Format spec, e.g. `mu`, `,.3MU` or `>10.2m`
    #[arg(short, long, default_value = "mu")]
    spec: String,

    /// Read the input as a change expression and print it as JSON
    #[arg(short, long)]
    change: bool,

    /// Compare against a random close unit of this system instead
    #[arg(short, long, value_name = "SYSTEM")]
    good: Option<String>,

    /// Extra JSON unit file for sizes
    #[arg(long, value_name = "FILE")]
    units_size: Option<PathBuf>,

    /// Extra JSON unit file for weights
    #[arg(long, value_name = "FILE")]
    units_weight: Option<PathBuf>,

    /// Extra JSON unit file for times
    #[arg(long, value_name = "FILE")]
    units_time: Option<PathBuf>,

    /// Show only the result (no input echo)
    #[arg(short, long)]
    quiet: bool,

    /// Run as a JSON-RPC 2.0 server on stdin/stdout
    #[arg(long)]
    server: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_dimension(name: &str) -> Result<Dimension, String> {
    name.parse().map_err(|e: sizeunits_core::ParseError| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = load_catalog(&args)?;

    if args.server {
        server::run_server(&catalog)?;
    } else if let Some(text) = &args.text {
        // Single input mode
        println!("{}", evaluate(&args, &catalog, text)?);
    } else if !io::stdin().is_terminal() {
        // Pipe mode (stdin is not a tty)
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match evaluate(&args, &catalog, line) {
                Ok(result) => print_result(line, &result, args.quiet),
                Err(e) => eprintln!("{line}: {e}"),
            }
        }
    } else {
        eprintln!("Usage: sizeunits <quantity> [-d size|weight|time] [-s SPEC]");
        eprintln!("       sizeunits -c <change>");
        eprintln!("       echo \"1,000 km\" | sizeunits");
        eprintln!("       sizeunits --server");
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG wins over -v
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None);
    builder.init();
}

fn load_catalog(args: &Args) -> Result<UnitCatalog> {
    let mut catalog = UnitCatalog::bundled()?;
    let files = [
        (Dimension::Length, &args.units_size),
        (Dimension::Mass, &args.units_weight),
        (Dimension::Time, &args.units_time),
    ];
    for (dimension, path) in files {
        let Some(path) = path else { continue };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        catalog
            .load_json(dimension, &text)
            .with_context(|| format!("loading {dimension} units from {}", path.display()))?;
        debug!("merged {} into the {dimension} catalog", path.display());
    }
    Ok(catalog)
}

fn evaluate(args: &Args, catalog: &UnitCatalog, text: &str) -> Result<String> {
    if args.change {
        let change = Change::parse(text, catalog)?;
        return Ok(serde_json::to_string(&change)?);
    }

    let value = convert::parse(args.dimension, text, catalog)?;
    let formatted = match &args.good {
        Some(system) => convert::good_unit(args.dimension, value, system, "", catalog)?,
        None => convert::format(args.dimension, value, &args.spec, catalog)?,
    };
    Ok(formatted)
}

fn print_result(input: &str, result: &str, quiet: bool) {
    if quiet {
        println!("{result}");
    } else {
        // Pad input to align results
        let padding = 30usize.saturating_sub(input.chars().count());
        println!("{input}{:>width$} = {result}", "", width = padding);
    }
}
