use anyhow::{Context, Result, bail};
use std::io::{ErrorKind, Write};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use tracing::debug;

/// Text to be spoken, tagged with the language it is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
}

/// Speech output for the speak action.
///
/// `speak` starts playback and returns; completion is never reported.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: &Utterance) -> Result<()>;
}

impl<T: SpeechSynthesizer + ?Sized> SpeechSynthesizer for Arc<T> {
    fn speak(&self, utterance: &Utterance) -> Result<()> {
        (**self).speak(utterance)
    }
}

/// Speech backed by the platform's text-to-speech tool.
///
/// Every tool is told the utterance's language: `say` gets a voice whose
/// locale matches, System.Speech selects a voice by culture, and espeak gets
/// the code as its voice. Codes no installed voice covers fall back to the
/// default voice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpeech;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    MacOs,
    Windows,
    Unix,
}

impl Platform {
    const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// One way to start speech; the text itself is written to stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SpeechCommand {
    program: &'static str,
    args: Vec<String>,
}

/// Candidate commands for `platform`, tried in order.
///
/// `mac_voice` is the `say` voice resolved for `lang`, if any.
fn speech_commands(
    lang: &str,
    platform: Platform,
    mac_voice: Option<&str>,
) -> Vec<SpeechCommand> {
    match platform {
        Platform::MacOs => {
            let args = mac_voice
                .map(|voice| vec!["-v".to_string(), voice.to_string()])
                .unwrap_or_default();
            vec![SpeechCommand {
                program: "say",
                args,
            }]
        }
        Platform::Windows => vec![SpeechCommand {
            program: "powershell",
            args: vec![
                "-NoProfile".to_string(),
                "-Command".to_string(),
                windows_speak_script(lang),
            ],
        }],
        Platform::Unix => ["espeak-ng", "espeak"]
            .into_iter()
            .map(|program| SpeechCommand {
                program,
                args: vec!["-v".to_string(), lang.to_string(), "--stdin".to_string()],
            })
            .collect(),
    }
}

fn windows_speak_script(lang: &str) -> String {
    let culture = lang.replace('\'', "''");
    format!(
        "Add-Type -AssemblyName System.Speech; \
         $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
         try {{ $s.SelectVoiceByHints('NotSet', 'NotSet', 0, \
         [Globalization.CultureInfo]'{culture}') }} catch {{ }}; \
         $s.Speak([Console]::In.ReadToEnd())"
    )
}

/// Maps a service language code onto the `ll_RR` form `say` lists locales in.
fn mac_locale(lang: &str) -> String {
    let locale = lang.replace('-', "_");
    match locale.split_once('_') {
        Some(("iw", region)) => format!("he_{region}"),
        None if locale == "iw" => "he".to_string(),
        _ => locale,
    }
}

/// Picks a voice from `say -v '?'` output for `lang`.
///
/// An exact locale match wins; otherwise the first voice for the language.
fn voice_for_locale(listing: &str, lang: &str) -> Option<String> {
    let wanted = mac_locale(lang);
    let wanted_language = wanted.split('_').next().unwrap_or_default();

    let voices: Vec<(&str, &str)> = listing
        .lines()
        .filter_map(|line| {
            let entry = line.split('#').next()?.trim_end();
            let (name, locale) = entry.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            (!name.is_empty()).then_some((name, locale))
        })
        .collect();

    voices
        .iter()
        .find(|(_, locale)| locale.eq_ignore_ascii_case(&wanted))
        .or_else(|| {
            voices.iter().find(|(_, locale)| {
                locale
                    .split('_')
                    .next()
                    .is_some_and(|l| l.eq_ignore_ascii_case(wanted_language))
            })
        })
        .map(|(name, _)| (*name).to_string())
}

fn resolve_mac_voice(lang: &str) -> Option<String> {
    let output = Command::new("say").args(["-v", "?"]).output().ok()?;
    let voice = voice_for_locale(&String::from_utf8_lossy(&output.stdout), lang);
    if voice.is_none() {
        debug!(lang, "no say voice for language, using the default voice");
    }
    voice
}

impl SystemSpeech {
    fn spawn(utterance: &Utterance) -> Result<Child> {
        let platform = Platform::current();
        let mac_voice = if platform == Platform::MacOs {
            resolve_mac_voice(&utterance.lang)
        } else {
            None
        };

        let mut last_err = None;
        for command in speech_commands(&utterance.lang, platform, mac_voice.as_deref()) {
            debug!(program = command.program, args = ?command.args, "starting speech");
            let mut cmd = Command::new(command.program);
            cmd.args(&command.args);
            match spawn_reading_stdin(cmd) {
                Ok(child) => return Ok(child),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("No speech tool available")))
    }
}

fn spawn_reading_stdin(mut cmd: Command) -> Result<Child> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    match cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => Ok(child),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("Speech tool '{program}' is not installed")
        }
        Err(e) => Err(e).with_context(|| format!("Failed to start speech tool '{program}'")),
    }
}

impl SpeechSynthesizer for SystemSpeech {
    fn speak(&self, utterance: &Utterance) -> Result<()> {
        let mut child = Self::spawn(utterance)?;

        // Closing stdin starts playback; the child is left to finish on its own
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(utterance.text.as_bytes())
                .context("Failed to hand text to the speech tool")?;
        }

        Ok(())
    }
}
