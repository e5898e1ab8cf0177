use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::client::HttpChatBackend;
use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::controller::{ChatController, ChatMessage};
use super::ui;
use crate::ui::{Spinner, print_error};

/// Configuration for a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the chat service.
    pub endpoint: String,
}

impl SessionConfig {
    pub const fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

/// An interactive chat session against the FAQ backend.
///
/// Thin terminal adapter over [`ChatController`]: it reads lines, routes
/// slash commands, and prints whatever the controller appends.
pub struct ChatSession {
    config: SessionConfig,
    controller: ChatController<HttpChatBackend>,
}

impl ChatSession {
    pub fn new(config: SessionConfig) -> Self {
        let controller = ChatController::new(HttpChatBackend::new(config.endpoint.clone()));
        Self { config, controller }
    }

    pub async fn run(&self) -> Result<()> {
        ui::print_header(&self.config.endpoint);

        {
            let spinner = Spinner::new("Loading suggested questions...");
            self.controller.load_suggestions().await;
            spinner.stop();
        }
        let suggestions = self.controller.suggestions();
        if !suggestions.is_empty() {
            ui::print_suggestions(&suggestions);
        }

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Ask a question, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await {
                            break;
                        }
                    }
                    Input::Message(text) => {
                        if let Some(reply) = self.ask(|c| c.submit(&text)).await {
                            ui::print_message(&reply);
                            println!();
                        }
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    async fn ask<'a, F, Fut>(&'a self, send: F) -> Option<ChatMessage>
    where
        F: FnOnce(&'a ChatController<HttpChatBackend>) -> Fut,
        Fut: Future<Output = Option<ChatMessage>>,
    {
        let spinner = Spinner::new("Thinking...");
        let reply = send(&self.controller).await;
        spinner.stop();
        reply
    }

    async fn handle_command(&self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Ask(Some(number)) => {
                let suggestions = self.controller.suggestions();
                let Some(suggestion) = suggestions.get(number - 1) else {
                    print_error(&format!(
                        "No suggested question #{number} (there are {})",
                        suggestions.len()
                    ));
                    return true;
                };
                ui::print_message(&ChatMessage::user(suggestion.label.clone()));
                if let Some(reply) = self
                    .ask(|c| c.activate_suggestion(number - 1))
                    .await
                {
                    ui::print_message(&reply);
                    println!();
                }
                true
            }
            SlashCommand::Ask(None) => {
                print_error("Usage: /ask <number>");
                true
            }
            SlashCommand::Faq => {
                ui::print_suggestions(&self.controller.suggestions());
                true
            }
            SlashCommand::Help => {
                ui::print_help();
                true
            }
            SlashCommand::History => {
                ui::print_transcript(&self.controller.transcript());
                true
            }
            SlashCommand::Quit => false,
            SlashCommand::Unknown(cmd) => {
                print_error(&format!("Unknown command: /{cmd}"));
                true
            }
        }
    }
}
