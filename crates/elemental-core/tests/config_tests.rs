// SimConfig parsing and validation.

use elemental_core::{ConfigError, SimConfig};

#[test]
fn empty_toml_gives_defaults() {
    let cfg = SimConfig::from_toml_str("").expect("empty config parses");
    assert_eq!(cfg, SimConfig::default());
    assert!((cfg.damping - 0.92).abs() < 1e-6);
    assert_eq!(cfg.interaction_range, 15.0);
}

#[test]
fn partial_toml_overrides_only_given_keys() {
    let cfg = SimConfig::from_toml_str("damping = 0.9\naudio_enabled = true\n").expect("parses");
    assert!((cfg.damping - 0.9).abs() < 1e-6);
    assert!(cfg.audio_enabled);
    assert_eq!(cfg.fixed_step_hz, SimConfig::default().fixed_step_hz);
}

#[test]
fn invalid_values_are_rejected() {
    let err = SimConfig::from_toml_str("damping = 0.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "damping", .. }));
    let err = SimConfig::from_toml_str("fixed_step_hz = -30.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "fixed_step_hz", .. }));
    let err = SimConfig::from_toml_str("max_catchup_steps = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "max_catchup_steps", .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SimConfig::from_toml_str("damping = [").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SimConfig::load("/definitely/not/here/elemental.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("elemental.toml"));
}

#[test]
fn defaults_round_trip_through_toml() {
    let text = toml::to_string(&SimConfig::default()).expect("serializes");
    assert_eq!(SimConfig::from_toml_str(&text).expect("parses"), SimConfig::default());
}
