//! The translation widget: language selection, translate, copy and speak.

mod client;
mod controller;
mod language;

pub use client::{
    HttpTranslationBackend, TranslateError, TranslateResponse, TranslationBackend,
    TranslationRequest,
};
pub use controller::{
    CONNECTIVITY_ERROR, COPIED_LABEL, COPY_FEEDBACK, COPY_LABEL, CopyOutcome, ERROR_PREFIX,
    LOADING_SENTINEL, ResultDisplay, SpeakOutcome, TranslateOutcome, TranslationController,
    TranslationResult, UNEXPECTED_RESPONSE,
};
pub use language::{
    AUTO_DETECT, SUPPORTED_LANGUAGES, language_name, print_languages, validate_source_language,
    validate_target_language,
};
