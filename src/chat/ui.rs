//! Chat mode UI components.

use crate::ui::Style;

use super::command::SLASH_COMMANDS;
use super::controller::{ChatMessage, FaqSuggestion, Sender};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(endpoint: &str) {
    println!(
        "{} {} - FAQ chat ({})",
        Style::header("desk"),
        Style::version(format!("v{VERSION}")),
        Style::secondary(endpoint)
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (cmd, desc) in SLASH_COMMANDS {
        println!("  {:10} {}", Style::command(cmd), Style::secondary(desc));
    }
    println!(
        "{}",
        Style::secondary("Start a message with // to send text beginning with /.")
    );
    println!();
}

pub fn print_suggestions(suggestions: &[FaqSuggestion]) {
    if suggestions.is_empty() {
        println!("{}", Style::secondary("No suggested questions available."));
        println!();
        return;
    }

    println!("{}", Style::header("Suggested questions"));
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  {} {}", Style::code(format!("{}.", i + 1)), suggestion.label);
    }
    println!(
        "{}",
        Style::secondary("Type /ask <number> to send one of them.")
    );
    println!();
}

pub fn print_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => Style::user("You:"),
        Sender::Bot => Style::bot("Bot:"),
    };
    println!("{who} {}", message.text);
}

pub fn print_transcript(transcript: &[ChatMessage]) {
    if transcript.is_empty() {
        println!("{}", Style::secondary("No messages yet."));
    }
    for message in transcript {
        print_message(message);
    }
    println!();
}
