//! Extract command implementation

use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{
    DocumentResult, JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tnm_api::{Config, MorphologyProcessor, TnmProcessor};

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Built-in language for boundary defaults (code, name or alias)
    #[arg(short, long, default_value = "de", conflicts_with = "language_config")]
    pub language: String,

    /// External language configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Match codes with whitespace between letter and value (`T 2`)
    #[arg(long)]
    pub allow_spaces: bool,

    /// Merge adjacent compatible records
    #[arg(long)]
    pub merge: bool,

    /// Do not match parenthetical details such as lymph-node counts
    #[arg(long)]
    pub no_parentheses: bool,

    /// Also extract ICD-O morphology codes
    #[arg(long = "icd-o")]
    pub icd_o: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one record per line
    Text,
    /// JSON array with records and metadata per file
    Json,
    /// Markdown formatted output
    Markdown,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting extraction");
        log::debug!("Arguments: {self:?}");

        let files = resolve_patterns(&self.input)?;
        let config = self.build_config()?;

        let processor = TnmProcessor::with_config(config.clone())
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        let morphology = if self.icd_o {
            Some(
                MorphologyProcessor::with_config(&config)
                    .map_err(|e| CliError::ConfigError(e.to_string()))?,
            )
        } else {
            None
        };
        log::info!("Using language '{}'", processor.language());

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let documents = files
            .par_iter()
            .map(|path| {
                let document = process_file(path, &processor, morphology.as_ref())?;
                progress.file_completed(&document.source);
                Ok(document)
            })
            .collect::<Result<Vec<_>>>();
        progress.finish();
        let documents = documents?;

        let mut formatter = self.create_formatter()?;
        for document in &documents {
            formatter.format_document(document)?;
        }
        formatter.finish()?;

        let record_total: usize = documents.iter().map(|d| d.output.records.len()).sum();
        log::info!(
            "Extracted {record_total} record(s) from {} file(s)",
            documents.len()
        );

        Ok(())
    }

    /// Translate the flags into an API configuration
    pub fn build_config(&self) -> Result<Config> {
        let builder = match &self.language_config {
            Some(path) => Config::builder().language_file(path),
            None => Config::builder()
                .language(self.language.as_str())
                .map_err(|e| CliError::ConfigError(e.to_string()))?,
        };

        builder
            .allow_spaces(self.allow_spaces)
            .merge_matches(self.merge)
            .detect_parentheses(!self.no_parentheses)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    fn create_formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .ok();
        }

        Ok(())
    }
}

fn process_file(
    path: &Path,
    processor: &TnmProcessor,
    morphology: Option<&MorphologyProcessor>,
) -> Result<DocumentResult> {
    let text = FileReader::read_text(path)?;
    let output = processor
        .process_text(&text)
        .map_err(|e| CliError::ProcessingError(format!("{}: {e}", path.display())))?;
    let morphology = morphology.map(|m| m.process_text(&text));

    Ok(DocumentResult {
        source: path.display().to_string(),
        output,
        morphology,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnm_api::LanguageSource;

    fn args() -> ExtractArgs {
        ExtractArgs {
            input: vec!["befund.txt".to_string()],
            output: None,
            format: OutputFormat::Text,
            language: "de".to_string(),
            language_config: None,
            allow_spaces: false,
            merge: false,
            no_parentheses: false,
            icd_o: false,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_build_config_from_flags() {
        let mut args = args();
        args.language = "english".to_string();
        args.allow_spaces = true;
        args.merge = true;
        args.no_parentheses = true;

        let config = args.build_config().unwrap();
        assert_eq!(config.language(), &LanguageSource::BuiltIn("en".to_string()));
        assert!(config.allow_spaces());
        assert!(config.merge_matches());
        assert!(!config.detect_parentheses());
    }

    #[test]
    fn test_build_config_unknown_language() {
        let mut args = args();
        args.language = "klingon".to_string();

        let error = args.build_config().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_build_config_missing_language_file() {
        let mut args = args();
        args.language_config = Some(PathBuf::from("/nonexistent/language.toml"));
        assert!(args.build_config().is_err());
    }

    #[test]
    fn test_process_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("befund.txt");
        std::fs::write(&path, "Adenokarzinom (8140/3), pT1 pN0 (0/12) M0").unwrap();

        let processor = TnmProcessor::new().unwrap();
        let morphology = MorphologyProcessor::new().unwrap();
        let document = process_file(&path, &processor, Some(&morphology)).unwrap();

        assert_eq!(document.output.records.len(), 1);
        assert_eq!(document.output.records[0].len(), 3);
        assert_eq!(
            document.morphology.unwrap().morphology()[0].value,
            "8140/3"
        );
    }
}
