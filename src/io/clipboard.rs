use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Where "copy to clipboard" sends its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardSink {
    /// Pipe the text into a helper program such as `wl-copy` or `pbcopy`
    Command { program: String, args: Vec<String> },
    /// Write the text to a file, replacing its contents
    File(PathBuf),
    /// Print the text to standard output
    Stdout,
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Failed to start clipboard program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard program '{program}' exited with {status}")]
    Exit { program: String, status: String },

    #[error("Failed to write clipboard text: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipboardSink {
    /// Build a command sink from `["program", "arg", ...]`.
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(ClipboardSink::Command {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            ClipboardSink::Command { program, .. } => format!("clipboard ({})", program),
            ClipboardSink::File(path) => format!("file {}", path.display()),
            ClipboardSink::Stdout => "standard output".to_string(),
        }
    }

    pub async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!(sink = %self.describe(), bytes = text.len(), "writing clipboard text");

        match self {
            ClipboardSink::Command { program, args } => {
                let mut child = Command::new(program)
                    .args(args)
                    .stdin(Stdio::piped())
                    .stdout(Stdio::null())
                    .spawn()
                    .map_err(|source| ClipboardError::Spawn {
                        program: program.clone(),
                        source,
                    })?;

                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(text.as_bytes()).await?;
                    stdin.shutdown().await?;
                }

                let status = child.wait().await?;
                if !status.success() {
                    return Err(ClipboardError::Exit {
                        program: program.clone(),
                        status: status.to_string(),
                    });
                }
            }
            ClipboardSink::File(path) => {
                tokio::fs::write(path, text).await?;
            }
            ClipboardSink::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_from_command_line() {
        let command = vec![
            "xclip".to_string(),
            "-selection".to_string(),
            "clipboard".to_string(),
        ];
        let sink = ClipboardSink::from_command_line(&command);
        assert_eq!(
            sink,
            Some(ClipboardSink::Command {
                program: "xclip".into(),
                args: vec!["-selection".into(), "clipboard".into()],
            })
        );
        assert_eq!(ClipboardSink::from_command_line(&[]), None);
    }

    #[tokio::test]
    async fn test_file_sink_writes_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clipboard.json");
        let sink = ClipboardSink::File(path.clone());

        sink.write_text("{\"revenue\": 1}").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"revenue\": 1}");
    }

    #[tokio::test]
    async fn test_missing_program_is_reported() {
        let sink = ClipboardSink::Command {
            program: "costcalc-no-such-clipboard-helper".into(),
            args: vec![],
        };
        let result = sink.write_text("text").await;
        assert!(matches!(result, Err(ClipboardError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_file_sink_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let sink = ClipboardSink::File(temp.path().join("missing").join("clip.json"));
        assert!(matches!(sink.write_text("x").await, Err(ClipboardError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_sink_pipes_text_to_helper() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clip.json");
        let sink = ClipboardSink::Command {
            program: "sh".into(),
            args: vec!["-c".into(), format!("cat > '{}'", path.display())],
        };

        sink.write_text("{\"revenue\": 5000}").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"revenue\": 5000}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_sink_failing_helper() {
        let sink = ClipboardSink::Command {
            program: "false".into(),
            args: vec![],
        };
        let result = sink.write_text("text").await;
        assert!(matches!(result, Err(ClipboardError::Exit { .. })));
    }
}
