//! Platform capabilities used by the translation actions.
//!
//! The controllers only see the [`Clipboard`] and [`SpeechSynthesizer`]
//! traits; the `System*` types shell out to whatever the OS provides.

mod clipboard;
mod speech;

pub use clipboard::{Clipboard, SystemClipboard};
pub use speech::{SpeechSynthesizer, SystemSpeech, Utterance};
