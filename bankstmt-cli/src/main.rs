use std::path::PathBuf;

use anyhow::{Context, Result};
use bankstmt_convert::{Converter, OutputFormat};
use clap::{Parser, Subcommand};

mod console;

use console::ConsoleReporter;

#[derive(Parser, Debug)]
#[command(name = "bankstmt", version, about = "Convert bank statement PDFs to XLSX or CSV")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement PDF into a spreadsheet
    Convert {
        /// Path to the input PDF file
        input: PathBuf,

        /// Path where the output file will be saved
        output: PathBuf,

        /// Output format (xlsx or csv)
        #[arg(long, default_value = "xlsx")]
        format: String,

        /// Also print per-page progress, not just warnings
        #[arg(long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            input,
            output,
            format,
            verbose,
        } => {
            let format: OutputFormat = format.parse()?;
            let reporter = ConsoleReporter::new(verbose);

            let converter = Converter::new(input.clone(), output, format)
                .with_context(|| format!("cannot convert {}", input.display()))?;

            match converter.convert(&reporter)? {
                Some(path) => {
                    println!("Conversion successful! Output saved to: {}", path.display());
                }
                None => {
                    println!("Conversion produced no transactions; nothing was written.");
                }
            }
        }
    }

    Ok(())
}
