//! TNM CLI library
//!
//! This library provides the command-line interface for extracting TNM
//! classifications and ICD-O morphology codes from clinical text files.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
