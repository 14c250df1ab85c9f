pub mod google;
pub mod player;
pub mod provider;

use crate::trace::SessionTrace;
use google::GoogleTranslateTts;
use player::ClipPlayer;
use provider::{SpeechError, SpeechRequest, SpeechResult, SpeechSynthesizer, spoken_excerpt};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_SPEECH_TIMEOUT_MS: u64 = 8_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    Delivered(PathBuf),
    Skipped,
}

/// Speaks assistant replies. Failures never reach the user; they are
/// returned typed and `speak_quietly` records them in the trace.
#[derive(Debug, Clone)]
pub struct Speaker<S = GoogleTranslateTts> {
    synthesizer: S,
    player: ClipPlayer,
    lang: String,
    timeout: Duration,
}

impl<S: SpeechSynthesizer> Speaker<S> {
    pub fn new(synthesizer: S, player: ClipPlayer, lang: String) -> Self {
        Self {
            synthesizer,
            player,
            lang,
            timeout: Duration::from_millis(DEFAULT_SPEECH_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = limit;
        self
    }

    pub async fn speak(&self, text: &str) -> SpeechResult<SpeechOutcome> {
        let Some(excerpt) = spoken_excerpt(text) else {
            return Ok(SpeechOutcome::Skipped);
        };

        let request = SpeechRequest {
            text: excerpt.to_string(),
            lang: self.lang.clone(),
        };
        let clip = timeout(self.timeout, self.synthesizer.synthesize(request))
            .await
            .map_err(|_| SpeechError::Timeout(self.timeout))??;
        self.player.deliver(&clip).map(SpeechOutcome::Delivered)
    }

    pub async fn speak_quietly(&self, text: &str, trace: &SessionTrace) -> Option<PathBuf> {
        match self.speak(text).await {
            Ok(SpeechOutcome::Delivered(path)) => Some(path),
            Ok(SpeechOutcome::Skipped) => None,
            Err(err) => {
                log_failure(trace, &err);
                None
            }
        }
    }
}

fn log_failure(trace: &SessionTrace, err: &SpeechError) {
    trace.log_speech_failure(&err.to_string());
}
