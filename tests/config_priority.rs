#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file
//! 3. Built-in defaults

use desk_cli::config::{
    ChatSection, ConfigFile, DEFAULT_ENDPOINT, TranslateOverrides, TranslateSection,
    resolve_chat_endpoint, resolve_translate_config,
};

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        translate: TranslateSection {
            endpoint: Some("http://translate.local".to_string()),
            from: Some("en".to_string()),
            to: Some("ja".to_string()),
        },
        chat: ChatSection {
            endpoint: Some("http://faq.local".to_string()),
        },
    }
}

#[test]
fn test_cli_overrides_config_file() {
    let config = make_config_with_defaults();
    let overrides = TranslateOverrides {
        endpoint: Some("https://cli.example".to_string()),
        from: Some("de".to_string()),
        to: Some("fr".to_string()),
    };

    let resolved = resolve_translate_config(&overrides, &config).unwrap();

    assert_eq!(resolved.endpoint, "https://cli.example");
    assert_eq!(resolved.source_lang, "de");
    assert_eq!(resolved.target_lang, "fr");
}

#[test]
fn test_config_file_used_without_cli() {
    let config = make_config_with_defaults();

    let resolved = resolve_translate_config(&TranslateOverrides::default(), &config).unwrap();

    assert_eq!(resolved.endpoint, "http://translate.local");
    assert_eq!(resolved.source_lang, "en");
    assert_eq!(resolved.target_lang, "ja");
}

#[test]
fn test_partial_cli_override() {
    let config = make_config_with_defaults();
    let overrides = TranslateOverrides {
        to: Some("es".to_string()),
        ..TranslateOverrides::default()
    };

    let resolved = resolve_translate_config(&overrides, &config).unwrap();

    assert_eq!(resolved.endpoint, "http://translate.local");
    assert_eq!(resolved.source_lang, "en");
    assert_eq!(resolved.target_lang, "es");
}

#[test]
fn test_builtin_defaults() {
    let overrides = TranslateOverrides {
        to: Some("fr".to_string()),
        ..TranslateOverrides::default()
    };

    let resolved = resolve_translate_config(&overrides, &ConfigFile::default()).unwrap();

    assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(resolved.source_lang, "auto");
}

#[test]
fn test_missing_target_is_an_error() {
    let err =
        resolve_translate_config(&TranslateOverrides::default(), &ConfigFile::default())
            .unwrap_err();
    assert!(err.to_string().contains("'to'"));
}

#[test]
fn test_invalid_config_file_language_is_rejected() {
    let mut config = make_config_with_defaults();
    config.translate.to = Some("klingon".to_string());

    let err = resolve_translate_config(&TranslateOverrides::default(), &config).unwrap_err();
    assert!(err.to_string().contains("Invalid language code"));
}

#[test]
fn test_chat_endpoint_priority() {
    let config = make_config_with_defaults();

    assert_eq!(
        resolve_chat_endpoint(Some("http://cli.local"), &config).unwrap(),
        "http://cli.local"
    );
    assert_eq!(
        resolve_chat_endpoint(None, &config).unwrap(),
        "http://faq.local"
    );
    assert_eq!(
        resolve_chat_endpoint(None, &ConfigFile::default()).unwrap(),
        DEFAULT_ENDPOINT
    );
}

#[test]
fn test_chat_endpoint_must_be_http() {
    assert!(resolve_chat_endpoint(Some("ftp://faq.local"), &ConfigFile::default()).is_err());
}
