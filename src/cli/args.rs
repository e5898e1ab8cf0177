use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "desk")]
#[command(about = "Translate text and chat with an FAQ bot from the terminal")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if neither FILE nor --text is given)
    pub file: Option<PathBuf>,

    /// Text to translate
    #[arg(short = 'x', long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Source language code, or "auto" to let the service detect it
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (e.g. fr, de, ja, zh-CN)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Translation service URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Copy the translation to the clipboard
    #[arg(short = 'c', long)]
    pub copy: bool,

    /// Read the translation aloud
    #[arg(short = 's', long)]
    pub speak: bool,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log request details to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat with the FAQ bot
    Chat {
        /// Chat service URL
        #[arg(short = 'e', long)]
        endpoint: Option<String>,
    },
    /// Configure default endpoints and languages
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported language codes
    Languages,
}
