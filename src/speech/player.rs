use super::provider::{SpeechClip, SpeechError, SpeechResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

pub const CLIP_FILE_NAME: &str = "last-reply.mp3";

/// Hands a synthesized clip to the machine: always written to disk, and
/// passed to an external player when one is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPlayer {
    output_dir: PathBuf,
    command: Vec<String>,
}

impl ClipPlayer {
    pub fn new(output_dir: PathBuf, command: Vec<String>) -> Self {
        Self {
            output_dir,
            command,
        }
    }

    pub fn deliver(&self, clip: &SpeechClip) -> SpeechResult<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|err| {
            SpeechError::Output(format!("{}: {err}", self.output_dir.display()))
        })?;

        let path = self.output_dir.join(CLIP_FILE_NAME);
        fs::write(&path, &clip.audio)
            .map_err(|err| SpeechError::Output(format!("{}: {err}", path.display())))?;

        // Playback runs detached; the reply never waits on audio.
        self.start_player(&path)?;
        Ok(path)
    }

    /// Spawns the configured player on `path` and reaps it from a
    /// background thread once it exits.
    fn start_player(&self, path: &Path) -> SpeechResult<Option<JoinHandle<io::Result<ExitStatus>>>> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(None);
        };

        let mut child = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| SpeechError::Player(format!("{program}: {err}")))?;
        Ok(Some(thread::spawn(move || child.wait())))
    }
}
