//! Global output configuration and log setup.
//!
//! - Translated text and chat replies go to stdout
//! - Status lines, spinners and logs go to stderr
//! - Quiet mode suppresses status lines, never results or errors
//! - Colors can be disabled via the `NO_COLOR` environment variable

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive for log output.
pub const LOG_ENV: &str = "DESK_LOG";

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress status lines.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
    /// Raise the default log level to `debug`.
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var_os("NO_COLOR").is_some(),
            verbose: false,
        }
    }
}

/// Installs the output configuration and the tracing subscriber.
///
/// Only the first call has an effect.
pub fn init(config: OutputConfig) {
    if OUTPUT_CONFIG.set(config).is_err() {
        return;
    }

    let default_level = if self::config().verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("desk_cli={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!self::config().no_color)
        .with_target(false)
        .try_init();
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Print a status line to stderr unless quiet mode is on.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}
