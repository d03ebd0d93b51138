//! External-command synthesis engine.
//!
//! Spawns a CLI (by default `edge-tts`) once per request and reads the MP3
//! stream from its stdout. Arguments are templates; the placeholders
//! `{voice}`, `{text}`, `{rate}`, `{volume}` and `{pitch}` are substituted
//! per call. Each template is passed as a single argv entry, so text never
//! goes through a shell.

use std::process::Stdio;

use async_trait::async_trait;
use chatvox_core::Voice;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use super::{Prosody, SynthesisEngine};
use crate::error::TtsError;

/// Default synthesis program.
pub const DEFAULT_PROGRAM: &str = "edge-tts";

/// Longest stderr excerpt carried in an error.
const MAX_STDERR_CHARS: usize = 500;

/// Program and argument templates for [`CommandEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEngineConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandEngineConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: default_args(),
        }
    }
}

/// Argument templates for `edge-tts` writing MP3 to stdout.
pub fn default_args() -> Vec<String> {
    [
        "--voice",
        "{voice}",
        "--text",
        "{text}",
        "--rate={rate}",
        "--volume={volume}",
        "--pitch={pitch}",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Synthesis engine backed by an external program.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    config: CommandEngineConfig,
}

impl CommandEngine {
    pub const fn new(config: CommandEngineConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &CommandEngineConfig {
        &self.config
    }

    /// Substitute placeholders in every argument template.
    fn render_args(&self, text: &str, voice: Voice, prosody: Prosody) -> Vec<String> {
        self.config
            .args
            .iter()
            .map(|template| {
                template
                    .replace("{voice}", voice.id())
                    .replace("{rate}", prosody.rate)
                    .replace("{volume}", prosody.volume)
                    .replace("{pitch}", prosody.pitch)
                    // Last, so placeholders inside the chat text stay literal
                    .replace("{text}", text)
            })
            .collect()
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new(CommandEngineConfig::default())
    }
}

#[async_trait]
impl SynthesisEngine for CommandEngine {
    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        prosody: Prosody,
    ) -> Result<Vec<u8>, TtsError> {
        let args = self.render_args(text, voice, prosody);
        debug!(program = %self.config.program, %voice, "Spawning synthesis command");

        let output = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| TtsError::EngineUnavailable(format!("{}: {e}", self.config.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut message: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            if message.is_empty() {
                message = format!("{} exited with {}", self.config.program, output.status);
            }
            return Err(TtsError::Synthesis(message));
        }

        if output.stdout.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        Ok(output.stdout)
    }

    fn name(&self) -> &str {
        &self.config.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_placeholders_per_argument() {
        let engine = CommandEngine::default();
        let args = engine.render_args("hi {voice}", Voice::Dmitry, Prosody::NEUTRAL);
        assert_eq!(
            args,
            vec![
                "--voice",
                "ru-RU-DmitryNeural",
                "--text",
                "hi {voice}",
                "--rate=+0%",
                "--volume=+0%",
                "--pitch=+0Hz",
            ]
        );
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let engine = CommandEngine::new(CommandEngineConfig {
            program: "chatvox-definitely-not-installed".to_string(),
            args: vec![],
        });
        let err = engine
            .synthesize("x", Voice::Svetlana, Prosody::NEUTRAL)
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EngineUnavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_the_audio() {
        let engine = CommandEngine::new(CommandEngineConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "printf 'ID3:%s' \"$0\"".to_string(), "{voice}".to_string()],
        });
        let audio = engine
            .synthesize("x", Voice::Svetlana, Prosody::NEUTRAL)
            .await
            .unwrap();
        assert_eq!(audio, b"ID3:ru-RU-SvetlanaNeural");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_reports_stderr() {
        let engine = CommandEngine::new(CommandEngineConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "echo 'no such voice' >&2; exit 3".to_string()],
        });
        let err = engine
            .synthesize("x", Voice::Svetlana, Prosody::NEUTRAL)
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::Synthesis(ref m) if m == "no such voice"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn silent_success_is_empty_audio() {
        let engine = CommandEngine::new(CommandEngineConfig {
            program: "true".to_string(),
            args: vec![],
        });
        let err = engine
            .synthesize("x", Voice::Svetlana, Prosody::NEUTRAL)
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EmptyAudio));
    }
}
