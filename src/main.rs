use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use dkb2homebank::CsvFormat;

#[derive(Parser, Debug)]
#[command(
    name = "dkb2homebank",
    version,
    about = "Convert a CSV export file from DKB online banking to a Homebank compatible CSV format."
)]
struct Cli {
    /// The CSV file to convert
    filename: PathBuf,

    /// Where to store the output file (default: per-format name in the working directory)
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Output debug information
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = CsvFormat::detect(&cli.filename)
        .with_context(|| format!("Cannot read {}", cli.filename.display()))?;

    if cli.debug {
        println!("Looks like we're trying to convert a {format} CSV file");
    }

    let spec = match format.spec() {
        Some(spec) => spec,
        None => bail!("Could not detect CSV file type. Are you sure this is a legitimate file?"),
    };

    let output = cli
        .output_file
        .unwrap_or_else(|| PathBuf::from(spec.default_output));
    let rows = dkb2homebank::convert(format, &cli.filename, &output)
        .with_context(|| format!("Cannot convert {}", cli.filename.display()))?;

    println!(
        "✓ DKB {format} file converted ({rows} transactions). Output file: {}",
        output.display()
    );
    Ok(())
}
