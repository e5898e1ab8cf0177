use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Where the text to translate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Given inline on the command line.
    Text(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Inline text wins over a file; with neither, read stdin.
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(path)) => Self::File(path),
            (None, None) => Self::Stdin,
        }
    }
}

pub struct InputReader;

impl InputReader {
    pub fn read(source: &InputSource) -> Result<String> {
        match source {
            InputSource::Text(text) => {
                check_size(text.len(), "text")?;
                Ok(text.clone())
            }
            InputSource::File(path) => Self::read_file(path),
            InputSource::Stdin => Self::read_stdin(),
        }
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;
        check_size(metadata.len() as usize, "file")?;

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;
            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);
            check_size(buffer.len(), "input")?;
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn check_size(size: usize, what: &str) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        bail!(
            "Input {what} ({:.1} MB) exceeds maximum allowed size (1 MB).",
            size as f64 / 1024.0 / 1024.0
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_source_prefers_inline_text() {
        assert_eq!(
            InputSource::from_args(Some("hi".to_string()), Some(PathBuf::from("a.txt"))),
            InputSource::Text("hi".to_string())
        );
        assert_eq!(
            InputSource::from_args(None, Some(PathBuf::from("a.txt"))),
            InputSource::File(PathBuf::from("a.txt"))
        );
        assert_eq!(InputSource::from_args(None, None), InputSource::Stdin);
    }

    #[test]
    fn test_read_inline_text() {
        let content = InputReader::read(&InputSource::Text("hello".to_string())).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_read_file_unicode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "Où est la bibliothèque ?\n図書館はどこですか";
        write!(temp_file, "{content}").unwrap();

        let result =
            InputReader::read(&InputSource::File(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read(&InputSource::File(PathBuf::from(
            "/nonexistent/path/to/file.txt",
        )));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let err = InputReader::read(&InputSource::File(file_path)).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_read_file_at_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("max_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE)).unwrap();

        let content = InputReader::read(&InputSource::File(file_path)).unwrap();
        assert_eq!(content.len(), MAX_INPUT_SIZE);
    }
}
