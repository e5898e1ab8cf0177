//! Configuration file management and resolution of effective settings.

mod manager;

pub use manager::{
    ChatSection, ConfigFile, ConfigManager, DEFAULT_ENDPOINT, ResolvedTranslateConfig,
    TranslateOverrides, TranslateSection, resolve_chat_endpoint, resolve_translate_config,
    validate_endpoint,
};
