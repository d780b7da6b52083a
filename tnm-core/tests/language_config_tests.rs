//! Built-in and external language configurations

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tnm_core::language::{get_language_config, list_available_languages};
use tnm_core::{ComponentKind, CoreError, ExtractorConfig, LanguageSource, TnmExtractor};

const CUSTOM_CONFIG: &str = r#"
[metadata]
code = "xx"
name = "Minimal"

[tokenizer]
prefixes = ['\(']
suffixes = ['\)', ',', '\.']
infixes = []

[exceptions]
literals = ["St.Gallen"]

[boundary]
word_continuation = "bdfghjklmnqstvwxz"
"#;

#[test]
fn test_builtin_languages() {
    let languages = list_available_languages();
    assert!(languages.contains(&"de"));
    assert!(languages.contains(&"en"));

    for alias in ["de", "German", "deutsch", "en", "english"] {
        assert!(get_language_config(alias).is_ok(), "{alias}");
    }
}

#[test]
fn test_external_language_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CUSTOM_CONFIG.as_bytes()).unwrap();

    let config = ExtractorConfig {
        language: LanguageSource::File(file.path().to_path_buf()),
        ..Default::default()
    };
    let extractor = TnmExtractor::configure(config).unwrap();
    assert_eq!(extractor.language(), "xx");

    let records = extractor.transform("(pT1, pN0.)").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get(ComponentKind::T).unwrap().start(), 1);
    assert_eq!(records[0].get(ComponentKind::N).unwrap().token(), "pN0");
}

#[test]
fn test_missing_external_file() {
    let config = ExtractorConfig {
        language: LanguageSource::File(PathBuf::from("/nonexistent/language.toml")),
        ..Default::default()
    };
    assert!(matches!(
        TnmExtractor::configure(config),
        Err(CoreError::Io(_))
    ));
}

#[test]
fn test_invalid_external_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CUSTOM_CONFIG.replace("\\(", "(").as_bytes())
        .unwrap();

    let config = ExtractorConfig {
        language: LanguageSource::File(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        TnmExtractor::configure(config),
        Err(CoreError::InvalidRule(_))
    ));
}
