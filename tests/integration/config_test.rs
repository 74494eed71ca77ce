//! Configuration loading from disk

use hex_book::config::Config;
use std::io::Write;

#[test]
fn test_example_config_loads() {
    let config = Config::parse(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.market.selling.code, "HEXA");
    assert!(config.market.buying.is_native());
    assert_eq!(config.tracker.depth, 3);
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [market]
        selling = {{ code = "HEXA", issuer = "GISSUER" }}
        buying = {{ code = "XLM" }}

        [tracker]
        depth = 7

        [telemetry]
        log_level = "warn"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.tracker.depth, 7);
    assert_eq!(config.telemetry.log_level, "warn");
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [market]
        selling = {{ code = "HEXA", issuer = "GISSUER" }}
        buying = {{ code = "XLM" }}

        [tracker]
        depth = 0

        [telemetry]
        log_level = "info"
        "#
    )
    .unwrap();

    let err = Config::load_if_exists(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("tracker.depth"));
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[market\nselling = ").unwrap();
    assert!(Config::load_if_exists(file.path()).is_err());
}

#[test]
fn test_existing_config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", include_str!("../../config.toml.example")).unwrap();
    let config = Config::load_if_exists(file.path()).unwrap().unwrap();
    assert_eq!(config.tracker.depth, 3);
}
