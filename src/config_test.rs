use super::*;

#[test]
fn defaults_match_documented_values() {
    let config = AppConfig::default();
    assert_eq!(config.storage_key, "storeName");
    assert_eq!(config.placeholder, "@YourStoreName");
    assert_eq!(config.default_theme, Theme::Natural);
    assert_eq!((config.export.width, config.export.height), (1080, 1920));
    assert_eq!(config.export.settle_fallback_ms, 100);
    assert_eq!(config.export.file_prefix, "reservation_");
    assert!(config.validate().is_ok());
}

#[test]
fn empty_object_yields_defaults() {
    let config = AppConfig::from_json("{}").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let config =
        AppConfig::from_json(r#"{"default_theme":"night","export":{"idle_label":"Save image"}}"#).unwrap();
    assert_eq!(config.default_theme, Theme::Night);
    assert_eq!(config.export.idle_label, "Save image");
    assert_eq!(config.export.busy_label, ExportConfig::default().busy_label);
    assert_eq!(config.storage_key, STORE_NAME_KEY);
}

#[test]
fn unknown_field_is_a_parse_error() {
    let err = AppConfig::from_json(r#"{"storage":"x"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_theme_is_a_parse_error() {
    let err = AppConfig::from_json(r#"{"default_theme":"neon"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_export_size_is_invalid() {
    let err = AppConfig::from_json(r#"{"export":{"width":0}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("0x1920")));
}

#[test]
fn fallback_longer_than_timeout_is_invalid() {
    let err = AppConfig::from_json(r#"{"export":{"settle_fallback_ms":500,"settle_timeout_ms":200}}"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn blank_storage_key_is_invalid() {
    let err = AppConfig::from_json(r#"{"storage_key":"  "}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[cfg(not(feature = "csr"))]
#[test]
fn load_without_browser_returns_defaults() {
    assert_eq!(AppConfig::load(), AppConfig::default());
}
