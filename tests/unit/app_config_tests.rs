/*!
 * Tests for configuration loading, validation and defaults
 */

#![allow(non_snake_case)]

use narravox::app_config::{Config, LogLevel};
use narravox::timing::repair::RepairMode;

/// Test the built-in defaults are valid and complete
#[test]
fn test_default_config_shouldValidateAndCarryDefaults() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.language, "en");
    assert_eq!(config.chunking.max_chunk_len, None);
    assert!(config.chunking.extra_abbreviations.is_empty());
    assert_eq!(config.timing.repair, RepairMode::SinglePass);
    assert_eq!(config.aligner.program, "stable-ts-align");
    assert_eq!(config.aligner.timeout_secs, 300);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test a partial config file fills the rest from defaults
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("narravox.json");
    std::fs::write(
        &path,
        r#"{
            "language": "ko",
            "timing": {"repair": "fixed_point"},
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.language, "ko");
    assert_eq!(config.timing.repair, RepairMode::FixedPoint);
    assert_eq!(config.log_level, LogLevel::Debug);
    // Untouched sections keep their defaults
    assert_eq!(config.aligner.program, "stable-ts-align");
    assert_eq!(config.chunking.max_chunk_len, None);
}

/// Test save then load round-trips the configuration
#[test]
fn test_save_withModifiedConfig_shouldRoundTrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("narravox.json");

    let mut config = Config::default();
    config.language = "fr".to_string();
    config.chunking.max_chunk_len = Some(150);
    config
        .chunking
        .extra_abbreviations
        .push("Bldg.".to_string());
    config.aligner.args = vec!["--model".to_string(), "small".to_string()];

    config.save(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.language, "fr");
    assert_eq!(loaded.chunking.max_chunk_len, Some(150));
    assert_eq!(loaded.chunking.extra_abbreviations, vec!["Bldg."]);
    assert_eq!(loaded.aligner.args, vec!["--model", "small"]);
}

/// Test loading a missing or malformed file fails with an error
#[test]
fn test_from_file_withMissingOrMalformedFile_shouldError() {
    let dir = tempfile::tempdir().unwrap();

    assert!(Config::from_file(dir.path().join("absent.json")).is_err());

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Config::from_file(&path).is_err());
}

/// Test validation rejects each bad field
#[test]
fn test_validate_withBadFields_shouldRejectEach() {
    let mut config = Config::default();
    config.language = "de".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.chunking.max_chunk_len = Some(0);
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.aligner.program = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.aligner.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test the effective chunk budget prefers the override, then the
/// per-language default
#[test]
fn test_effective_max_chunk_len_withAndWithoutOverride_shouldPickCorrectly() {
    let mut config = Config::default();
    assert_eq!(config.effective_max_chunk_len().unwrap(), 300);

    config.language = "ko".to_string();
    assert_eq!(config.effective_max_chunk_len().unwrap(), 120);

    config.chunking.max_chunk_len = Some(80);
    assert_eq!(config.effective_max_chunk_len().unwrap(), 80);
}
