//! Configure command handler for editing default endpoints and languages.

use anyhow::Result;
use inquire::{Select, Text};

use crate::config::{
    ChatSection, ConfigFile, ConfigManager, DEFAULT_ENDPOINT, TranslateSection, validate_endpoint,
};
use crate::translation::{AUTO_DETECT, SUPPORTED_LANGUAGES, language_name};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current configuration. Otherwise prompts for the
/// translation endpoint, default languages and chat endpoint, then saves.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    if show {
        let config = manager.load_or_default()?;
        print_config(&manager, &config);
        return Ok(());
    }
    handle_prompt_cancellation(|| run_configure_inner(&manager))
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;
    print_config(manager, &config);

    let translate_endpoint =
        prompt_endpoint("Translation service URL:", config.translate.endpoint.as_deref())?;
    let from = select_language("Default source language:", config.translate.from.as_deref(), true)?;
    let to = select_language("Default target language:", config.translate.to.as_deref(), false)?;
    let chat_endpoint = prompt_endpoint("Chat service URL:", config.chat.endpoint.as_deref())?;

    config.translate = TranslateSection {
        endpoint: Some(translate_endpoint),
        from: Some(from),
        to: Some(to),
    };
    config.chat = ChatSection {
        endpoint: Some(chat_endpoint),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_config(manager: &ConfigManager, config: &ConfigFile) {
    let show = |value: Option<&str>, fallback: &str| {
        value.map_or_else(|| Style::secondary(fallback), Style::value)
    };

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {}  {}",
        Style::label("translate.endpoint"),
        show(
            config.translate.endpoint.as_deref(),
            &format!("{DEFAULT_ENDPOINT} (default)")
        )
    );
    println!(
        "  {}      {}",
        Style::label("translate.from"),
        show(config.translate.from.as_deref(), "auto (default)")
    );
    println!(
        "  {}        {}",
        Style::label("translate.to"),
        show(config.translate.to.as_deref(), "(not set)")
    );
    println!(
        "  {}       {}",
        Style::label("chat.endpoint"),
        show(
            config.chat.endpoint.as_deref(),
            &format!("{DEFAULT_ENDPOINT} (default)")
        )
    );
    println!();
}

fn prompt_endpoint(message: &str, current: Option<&str>) -> Result<String> {
    let endpoint = Text::new(message)
        .with_default(current.unwrap_or(DEFAULT_ENDPOINT))
        .prompt()?;
    let endpoint = endpoint.trim().to_string();

    validate_endpoint(&endpoint)?;
    Ok(endpoint)
}

fn select_language(message: &str, current: Option<&str>, allow_auto: bool) -> Result<String> {
    let mut codes: Vec<&str> = Vec::with_capacity(SUPPORTED_LANGUAGES.len() + 1);
    if allow_auto {
        codes.push(AUTO_DETECT);
    }
    codes.extend(SUPPORTED_LANGUAGES.iter().map(|(code, _)| *code));

    let options: Vec<String> = codes
        .iter()
        .map(|code| format!("{code} - {}", language_name(code).unwrap_or_default()))
        .collect();

    let starting_cursor = current
        .and_then(|c| codes.iter().position(|code| *code == c))
        .unwrap_or(0);

    let selection = Select::new(message, options)
        .with_starting_cursor(starting_cursor)
        .raw_prompt()?;

    Ok(codes[selection.index].to_string())
}
