use anyhow::Context;
use clap::Parser;
use serenity_service::convert::convert;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Convert an affirmations CSV into SQL value tuples.
#[derive(Debug, Parser)]
#[command(name = "convert-affirmations", version)]
struct Args {
    /// CSV with a header row and `affirmation,tag` records
    #[arg(long, default_value = "affirmations.csv")]
    input: PathBuf,

    /// Destination for the tuple lines
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let summary = convert(BufReader::new(input), BufWriter::new(output))?;

    println!("\nUnique tags: {:?}", summary.tags);
    println!(
        "{} affirmations have been saved to '{}'.",
        summary.rows,
        args.output.display()
    );

    Ok(())
}
