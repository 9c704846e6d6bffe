//! csvstore - convert and inspect delimiter-separated files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use csvstore::config::Config;
use csvstore::model::FieldSeparator;
use csvstore::output::{render_preview, CsvWriter, FileSinkFactory};
use csvstore::parser::CsvParser;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSeparator {
    Semicolon,
    Comma,
}

impl From<CliSeparator> for FieldSeparator {
    fn from(s: CliSeparator) -> Self {
        match s {
            CliSeparator::Semicolon => FieldSeparator::Semicolon,
            CliSeparator::Comma => FieldSeparator::Comma,
        }
    }
}

/// Load, convert and split delimiter-separated files
#[derive(Parser, Debug)]
#[command(name = "csvstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite a file under another separator convention
    Convert(ConvertArgs),
    /// Print the first lines of a file as a table
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// File to read
    input: PathBuf,

    /// Output file (".csv" is appended when missing)
    output: PathBuf,

    /// JSON configuration file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field separator of the input file
    #[arg(long, value_enum)]
    from: Option<CliSeparator>,

    /// Field separator of the output file
    #[arg(long, value_enum)]
    to: Option<CliSeparator>,

    /// The input has no header line, and none is written
    #[arg(long)]
    no_header: bool,

    /// Never split the output into several files
    #[arg(long)]
    no_split: bool,

    /// Size threshold in bytes for starting the next output file
    #[arg(long)]
    max_bytes: Option<u64>,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// File to read
    input: PathBuf,

    /// Field separator of the input file
    #[arg(short, long, value_enum, default_value = "semicolon")]
    separator: CliSeparator,

    /// The input has no header line
    #[arg(long)]
    no_header: bool,

    /// Maximum number of lines to print
    #[arg(short, long, default_value_t = 20)]
    limit: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => convert(args),
        Command::Show(args) => show(args),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(from) = args.from {
        config = config.with_field_separator(from.into());
    }
    if args.no_header {
        config = config.with_header_on_load(false).with_header_on_save(false);
    }
    if args.no_split {
        config = config.with_split_files(false);
    }
    if let Some(max) = args.max_bytes {
        config = config.with_max_file_bytes(max);
    }

    let mut table = CsvParser
        .parse(&args.input, &config)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let target = args.to.map(FieldSeparator::from).unwrap_or(config.field_separator);
    table.policy_mut().set_field_separator(target);

    let summary = CsvWriter::new(FileSinkFactory)
        .write(&table, &args.output, config.write_header_on_save)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    for file in &summary.files {
        println!("{}", file.display());
    }
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let config = Config::default()
        .with_field_separator(args.separator.into())
        .with_header_on_load(!args.no_header);

    let table = CsvParser
        .parse(&args.input, &config)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    print!("{}", render_preview(&table, args.limit));
    Ok(())
}
