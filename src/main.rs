use anyhow::Result;
use clap::Parser;

use desk_cli::cli::commands::{chat, configure, translate};
use desk_cli::cli::{Args, Command};
use desk_cli::input::InputSource;
use desk_cli::output::{self, OutputConfig};
use desk_cli::translation::{
    print_languages, validate_source_language, validate_target_language,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        ..OutputConfig::default()
    });

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Chat { endpoint }) => {
            chat::run_chat(chat::ChatOptions { endpoint }).await?;
        }
        None => {
            if let Some(ref lang) = args.to {
                validate_target_language(lang)?;
            }
            if let Some(ref lang) = args.from {
                validate_source_language(lang)?;
            }

            let options = translate::TranslateOptions {
                source: InputSource::from_args(args.text, args.file),
                from: args.from,
                to: args.to,
                endpoint: args.endpoint,
                copy: args.copy,
                speak: args.speak,
            };
            let code = translate::run_translate(options).await?;
            if code != exitcode::OK {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
