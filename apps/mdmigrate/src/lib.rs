//! mdmigrate core library.
//!
//! Prepares a directory of Markdown documents for migration into a static
//! site generator. Two tools share this crate:
//!
//! - `detect`: read-only scan that reports wiki links, embedded images,
//!   heading problems, absolute paths, and empty headings.
//! - `clean`: copies a tree into a fresh output directory while converting
//!   link/image syntax, repairing headings, and normalizing file names.
//!
//! Supporting modules:
//! - `cli`: CLI argument parsing (binaries use this).
//! - `config`: Optional config file and effective settings resolution.
//! - `error`: Crate error type.
//! - `models`: Report and option data structures.
//! - `output`: Human/JSON printers.
//! - `patterns`: Regular expressions shared by both tools.
//! - `utils`: Tree enumeration and path helpers.
pub mod clean;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod models;
pub mod output;
pub mod patterns;
pub mod utils;

pub use clean::MarkdownCleaner;
pub use detect::IssueDetector;
pub use error::{MigrateError, Result};
pub use models::{CleanOptions, ScanReport};
