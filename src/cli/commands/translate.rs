use anyhow::{Result, bail};

use crate::config::{
    ConfigManager, ResolvedTranslateConfig, TranslateOverrides, resolve_translate_config,
};
use crate::input::{InputReader, InputSource};
use crate::platform::{SystemClipboard, SystemSpeech};
use crate::status;
use crate::translation::{
    CopyOutcome, HttpTranslationBackend, LOADING_SENTINEL, SpeakOutcome, TranslateOutcome,
    TranslationController, TranslationResult,
};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub source: InputSource,
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
    pub copy: bool,
    pub speak: bool,
}

/// Translates once and runs the requested follow-up actions.
///
/// Returns the process exit code: `UNAVAILABLE` when the service could not
/// be reached, `DATAERR` when it reported an error.
pub async fn run_translate(options: TranslateOptions) -> Result<exitcode::ExitCode> {
    let config = load_translate_config(&options)?;
    let source_text = InputReader::read(&options.source)?;

    let controller = TranslationController::new(
        HttpTranslationBackend::new(config.endpoint.clone()),
        SystemClipboard,
        SystemSpeech,
    );

    let outcome = {
        let spinner = Spinner::new(LOADING_SENTINEL);
        let outcome = controller
            .translate(&source_text, &config.source_lang, &config.target_lang)
            .await;
        spinner.stop();
        outcome
    };

    let result = match outcome {
        TranslateOutcome::Ignored => bail!("Input is empty"),
        TranslateOutcome::Displayed(result) | TranslateOutcome::Stale(result) => result,
    };

    match result {
        TranslationResult::Translated(_) => println!("{}", controller.display_text()),
        TranslationResult::ServiceError(_) => {
            eprintln!("{}", Style::error(controller.display_text()));
            return Ok(exitcode::DATAERR);
        }
        TranslationResult::ConnectivityError => {
            eprintln!("{}", Style::error(controller.display_text()));
            return Ok(exitcode::UNAVAILABLE);
        }
    }

    if options.copy {
        match controller.copy().await {
            CopyOutcome::Copied => status!("{} {}", Style::success("✓"), controller.copy_label()),
            CopyOutcome::Failed => status!("{} Could not copy to clipboard", Style::warning("!")),
            CopyOutcome::Skipped => {}
        }
    }

    if options.speak {
        match controller.speak(&config.target_lang) {
            SpeakOutcome::Started => status!("{} Speaking", Style::success("✓")),
            SpeakOutcome::Failed => status!("{} Could not start speech", Style::warning("!")),
            SpeakOutcome::Skipped => {}
        }
    }

    Ok(exitcode::OK)
}

fn load_translate_config(options: &TranslateOptions) -> Result<ResolvedTranslateConfig> {
    let file_config = ConfigManager::new()?.load_or_default()?;

    resolve_translate_config(
        &TranslateOverrides {
            endpoint: options.endpoint.clone(),
            from: options.from.clone(),
            to: options.to.clone(),
        },
        &file_config,
    )
}
