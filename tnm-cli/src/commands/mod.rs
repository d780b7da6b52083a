//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod extract;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract TNM classifications from text files
    Extract(extract::ExtractArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate an external language configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in languages
    Languages,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Languages => {
                println!("Available languages:");
                for language in tnm_api::available_languages()? {
                    let aliases = if language.aliases.is_empty() {
                        String::new()
                    } else {
                        format!(" (aliases: {})", language.aliases.join(", "))
                    };
                    println!("  {:<4} {}{aliases}", language.code, language.name);
                }
            }
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text      One line per classification record");
                println!("  json      JSON array with records and metadata per file");
                println!("  markdown  Markdown section per file");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let extract_cmd = Commands::Extract(extract::ExtractArgs {
            input: vec!["befund.txt".to_string()],
            output: None,
            format: extract::OutputFormat::Text,
            language: "de".to_string(),
            language_config: None,
            allow_spaces: false,
            merge: false,
            no_parentheses: false,
            icd_o: false,
            quiet: false,
            verbose: 0,
        });

        let debug_str = format!("{extract_cmd:?}");
        assert!(debug_str.contains("Extract"));
        assert!(debug_str.contains("befund.txt"));

        let validate_cmd = Commands::Validate(validate::ValidateArgs {
            language_config: PathBuf::from("custom.toml"),
        });
        assert!(format!("{validate_cmd:?}").contains("custom.toml"));
    }

    #[test]
    fn test_list_commands_execute() {
        assert!(ListCommands::Languages.execute().is_ok());
        assert!(ListCommands::Formats.execute().is_ok());
    }
}
