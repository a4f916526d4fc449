use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use styled_markup::log_init::LOG_FILE_ENV;
use styled_markup::{
    Document, Result, import_rtf_file, init_logger, load_markup_file, save_markup_file,
};

#[derive(Parser, Debug)]
#[command(name = "styled-markup", about, version, long_about = None)]
struct Cli {
    /// Save logs to a specific file (falls back to $STYLED_MARKUP_LOG)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text and runs of a markup file
    Decode {
        file: PathBuf,
    },
    /// Convert an RTF file to markup
    ImportRtf {
        input: PathBuf,

        /// Write markup here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decode a markup file and encode it again
    Roundtrip {
        file: PathBuf,

        /// Write markup here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("styled-markup: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let log_file = cli
        .log_file
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from));
    if let Some(path) = log_file {
        let level = match cli.verbosity {
            0 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        init_logger(path, level)?;
    }

    match cli.command {
        Command::Decode { file } => match load_markup_file(&file)? {
            Some(doc) => {
                print_document(&doc);
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(invalid(&file, "markup")),
        },
        Command::ImportRtf { input, output } => match import_rtf_file(&input)? {
            Some(doc) => {
                write_markup(&doc, output.as_deref())?;
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(invalid(&input, "RTF")),
        },
        Command::Roundtrip { file, output } => match load_markup_file(&file)? {
            Some(doc) => {
                write_markup(&doc, output.as_deref())?;
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(invalid(&file, "markup")),
        },
    }
}

fn invalid(path: &Path, format: &str) -> ExitCode {
    eprintln!("styled-markup: {} is not a valid {} document", path.display(), format);
    ExitCode::FAILURE
}

fn write_markup(doc: &Document, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => save_markup_file(doc, path),
        None => Ok(markup::encode_to_writer(doc, io::stdout().lock())?),
    }
}

fn print_document(doc: &Document) {
    println!("{}", doc.text());

    if doc.runs().is_empty() {
        return;
    }

    println!();
    println!("{:>12}  {:<20} {:>6}  {:<22} colour", "range", "family", "size", "style");
    for run in doc.runs() {
        println!(
            "{:>12}  {:<20} {:>6}  {:<22} {}",
            format!("{}..{}", run.range.start, run.range.end),
            run.font.family,
            run.font.height,
            run.font.flags.to_markup(),
            run.color.map(|c| c.to_hex()).unwrap_or_else(|| "-".to_string())
        );
    }
}
