//! codesnap CLI - codebase snapshots with spreadsheet extraction
//!
//! A command-line tool that snapshots a directory tree into a single text
//! report and dumps OOXML spreadsheets as tab-separated text.

use clap::{Parser, Subcommand};
use codesnap::snapshot::{SnapshotOptions, DEFAULT_OUTPUT_NAME};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Codebase snapshots with OOXML spreadsheet extraction
#[derive(Parser)]
#[command(
    name = "codesnap",
    version,
    about = "Snapshot a codebase into one text report",
    long_about = "codesnap - codebase snapshot tool.\n\n\
                  Walks a directory tree, renders a tree diagram, and concatenates\n\
                  file contents into one report. Spreadsheet files (.xlsx, .xlsm,\n\
                  .xltx, .xltm) are dumped as tab-separated text."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Snapshot a directory into a report file
    #[command(visible_alias = "snap")]
    Snapshot {
        /// Directory to snapshot
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
        output: PathBuf,

        /// Additional directory names to exclude
        #[arg(long = "exclude", value_name = "DIR")]
        exclude: Vec<String>,
    },

    /// Dump one spreadsheet file as tab-separated text
    Sheet {
        /// Input spreadsheet path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Snapshot {
            dir,
            output,
            exclude,
        } => {
            let mut options = SnapshotOptions::default();
            for name in exclude {
                options = options.with_exclude_dir(name);
            }
            if let Some(name) = output.file_name() {
                options = options.with_output_name(name.to_string_lossy());
            }

            let pb = create_spinner("Walking directory tree...");

            let file = fs::File::create(&output)?;
            let mut writer = BufWriter::new(file);
            codesnap::write_snapshot(&dir, &mut writer, &options)?;
            writer.flush()?;

            pb.finish_and_clear();
            println!(
                "{} Directory tree and file contents written to {}",
                "✓".green().bold(),
                output.display()
            );
        }

        Commands::Sheet { input, output } => {
            let text = codesnap::extract_sheet_text(&input)?;
            write_output(output.as_ref(), &text)?;

            if let Some(path) = output {
                println!(
                    "{} Extracted {} to {}",
                    "✓".green().bold(),
                    input.display(),
                    path.display()
                );
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "codesnap".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Codebase snapshot tool with OOXML spreadsheet extraction");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
