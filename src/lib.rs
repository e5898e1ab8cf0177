//! # desk - translation and FAQ chat from the terminal
//!
//! `desk` is a client for two small HTTP services: a translation service
//! (`POST /translate`) and an FAQ chatbot (`POST /chat`, `GET /get_top_faqs`).
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate inline text
//! desk --text "hello" --to fr
//!
//! # Translate a file, then copy and read the result aloud
//! desk ./notes.txt --from en --to de --copy --speak
//!
//! # Interactive FAQ chat
//! desk chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/desk/config.toml`:
//!
//! ```toml
//! [translate]
//! endpoint = "http://127.0.0.1:5000"
//! from = "auto"
//! to = "fr"
//!
//! [chat]
//! endpoint = "http://127.0.0.1:5000"
//! ```

/// The FAQ chat widget and its interactive session.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Input reading from inline text, files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities.
pub mod paths;

/// Clipboard and speech adapters.
pub mod platform;

/// The translation widget and its service client.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
