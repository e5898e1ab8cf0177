//! Language codes accepted by the translation service.

use anyhow::{Result, bail};

use crate::ui::Style;

/// Source-language code asking the service to detect the language itself.
pub const AUTO_DETECT: &str = "auto";

/// Language codes the translation service understands, with display names.
///
/// Codes follow the service's convention: ISO 639-1 where one exists, with
/// region-qualified codes for the two Chinese scripts.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Returns the display name for a language code, if it is supported.
pub fn language_name(code: &str) -> Option<&'static str> {
    if code == AUTO_DETECT {
        return Some("Detect language");
    }
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes"));
    println!(
        "  {:6} {}",
        Style::code(AUTO_DETECT),
        Style::secondary("Detect language (source only)")
    );
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates a target language code. `auto` is not a valid target.
pub fn validate_target_language(lang: &str) -> Result<()> {
    if SUPPORTED_LANGUAGES.iter().any(|(code, _)| *code == lang) {
        return Ok(());
    }
    if lang == AUTO_DETECT {
        bail!("'{AUTO_DETECT}' can only be used as a source language");
    }
    bail!(
        "Invalid language code: '{lang}'\n\n\
         Valid language codes: en, fr, es, de, ja, zh-CN, ...\n\
         Run 'desk languages' to see all supported codes."
    )
}

/// Validates a source language code, which may also be `auto`.
pub fn validate_source_language(lang: &str) -> Result<()> {
    if lang == AUTO_DETECT {
        Ok(())
    } else {
        validate_target_language(lang)
    }
}
