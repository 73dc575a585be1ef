//! Loading and saving virtualizer configuration

use gcodesim_core::{ConfigError, Error};
use gcodesim_virtualizer::{NoOpListener, Virtualizer, VirtualizerConfig};
use tempfile::TempDir;

fn custom_config() -> VirtualizerConfig {
    VirtualizerConfig {
        collect_statistics: true,
        legacy_z_min_bound: true,
        acceleration: 500.0,
        rotary_curve_threshold: 45.0,
    }
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("virtualizer.json");

    custom_config().save_to_file(&path).unwrap();
    let loaded = VirtualizerConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, custom_config());
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("virtualizer.toml");

    custom_config().save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("legacy_z_min_bound = true"));

    let loaded = VirtualizerConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, custom_config());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    std::fs::write(&path, r#"{ "collect_statistics": true }"#).unwrap();

    let loaded = VirtualizerConfig::load_from_file(&path).unwrap();
    assert!(loaded.collect_statistics);
    assert!(!loaded.legacy_z_min_bound);
    assert_eq!(loaded.acceleration, 750.0);
}

#[test]
fn test_corrupted_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "collect_statistics = [").unwrap();

    let err = VirtualizerConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Corrupted(_))));
}

#[test]
fn test_out_of_range_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{ "acceleration": -1.0 }"#).unwrap();

    let err = VirtualizerConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::ValueOutOfRange { ref key, .. }) if key == "acceleration"
    ));

    let bad = VirtualizerConfig {
        rotary_curve_threshold: f64::NAN,
        ..VirtualizerConfig::default()
    };
    assert!(bad.save_to_file(&dir.path().join("nan.json")).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = VirtualizerConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_loaded_config_drives_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(
        &path,
        "collect_statistics = true\nlegacy_z_min_bound = true\nrotary_curve_threshold = 100.0\n",
    )
    .unwrap();

    let config = VirtualizerConfig::load_from_file(&path).unwrap();
    let mut v = Virtualizer::new(NoOpListener, config);
    v.virtualize_str("G0 X-50 Z0\nG1 Z-2 F100");

    let stats = v.generate_file_stats();
    assert_eq!(stats.bbox.min.z, -50.0);
    assert_eq!(stats.feed_rates, vec![100.0]);
}
