use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Destination for the copy action.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

#[async_trait]
impl<T: Clipboard + ?Sized> Clipboard for Arc<T> {
    async fn write_text(&self, text: &str) -> Result<()> {
        (**self).write_text(text).await
    }
}

/// Clipboard backed by the platform's command-line clipboard tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn tool() -> Result<(&'static str, &'static [&'static str])> {
        if cfg!(target_os = "macos") {
            Ok(("pbcopy", &[]))
        } else if cfg!(target_os = "windows") {
            Ok(("clip", &[]))
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Ok(("wl-copy", &[]))
        } else if std::env::var_os("DISPLAY").is_some() {
            Ok(("xclip", &["-selection", "clipboard"]))
        } else {
            bail!("No clipboard available (neither WAYLAND_DISPLAY nor DISPLAY is set)")
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let (program, args) = Self::tool()?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start clipboard tool '{program}'"))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .with_context(|| format!("Failed to write to '{program}'"))?;
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Clipboard tool '{program}' did not finish"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Clipboard tool '{program}' failed ({}): {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}
