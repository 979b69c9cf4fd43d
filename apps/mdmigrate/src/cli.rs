//! CLI argument parsing via `clap` for both binaries.

use crate::config::{CleanFlags, OutputMode};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mdmigrate-detect",
    version,
    about = "Detect issues in Markdown files before a VitePress migration",
    long_about = "Scan a directory of Markdown files and report wiki links, embedded images, heading problems, absolute paths, and empty headings. Never writes to disk.",
    after_help = "Examples:\n  mdmigrate-detect docs\n  mdmigrate-detect docs --output json"
)]
/// Options for the read-only detector.
pub struct DetectCli {
    #[arg(help = "Directory of Markdown files to scan")]
    pub source_dir: PathBuf,
    #[arg(long, value_enum, help = "Output mode: human|json (default: human)")]
    pub output: Option<OutputMode>,
    #[arg(long, help = "Path to a TOML or YAML config file")]
    pub config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Log debug details to stderr")]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "mdmigrate-clean",
    version,
    about = "Clean up Markdown files for a VitePress migration",
    long_about = "Copy every Markdown file from <SOURCE_DIR> into <OUTPUT_DIR>, applying the selected fixes. The source is never modified.\n\nWARNING: <OUTPUT_DIR> is deleted and recreated on every run.",
    after_help = "Examples:\n  mdmigrate-clean docs cleaned --all\n  mdmigrate-clean docs cleaned --convert-links --fix-headings"
)]
/// Options for the cleaner.
pub struct CleanCli {
    #[arg(help = "Directory of Markdown files to read")]
    pub source_dir: PathBuf,
    #[arg(help = "Directory to write results into (replaced on every run)")]
    pub output_dir: PathBuf,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Fix multiple H1 and skipped levels")]
    pub fix_headings: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Convert wiki links [[...]] to standard links")]
    pub convert_links: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Convert embedded images ![[...]] to standard images")]
    pub convert_images: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Normalize filenames (spaces to dashes, etc.)")]
    pub normalize_names: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Apply all fixes")]
    pub all: bool,
    #[arg(long, help = "Path to a TOML or YAML config file")]
    pub config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Log debug details to stderr")]
    pub verbose: bool,
}

impl CleanCli {
    pub fn flags(&self) -> CleanFlags {
        CleanFlags {
            fix_headings: self.fix_headings,
            convert_links: self.convert_links,
            convert_images: self.convert_images,
            normalize_names: self.normalize_names,
            all: self.all,
        }
    }
}

/// Exit status for a clap error: 0 for help and version, 1 for usage errors.
pub fn exit_code_for(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}

/// Parse `args`, pairing any clap error with the status it should exit with.
pub fn parse_args<T, I, A>(args: I) -> Result<T, (i32, clap::Error)>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<std::ffi::OsString> + Clone,
{
    T::try_parse_from(args).map_err(|e| (exit_code_for(&e), e))
}

/// Parse the process arguments or print the clap message and exit.
pub fn parse_or_exit<T: Parser>() -> T {
    match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err((code, e)) => {
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Install the `env_logger` backend. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "warn,mdmigrate=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
