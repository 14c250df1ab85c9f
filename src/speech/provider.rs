use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechClip {
    pub mime_type: String,
    pub audio: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    EmptyText,
    HttpStatus { status: u16, body: String },
    Transport(String),
    Timeout(Duration),
    EmptyAudio,
    Output(String),
    Player(String),
}

impl Display for SpeechError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "nothing to speak"),
            Self::HttpStatus { status, body } => {
                write!(f, "speech request failed with status {status}: {body}")
            }
            Self::Transport(msg) => write!(f, "speech transport error: {msg}"),
            Self::Timeout(limit) => {
                write!(f, "speech request timed out after {}ms", limit.as_millis())
            }
            Self::EmptyAudio => write!(f, "speech service returned no audio"),
            Self::Output(msg) => write!(f, "unable to store speech clip: {msg}"),
            Self::Player(msg) => write!(f, "unable to start audio player: {msg}"),
        }
    }
}

impl Error for SpeechError {}

pub type SpeechResult<T> = std::result::Result<T, SpeechError>;

pub trait SpeechSynthesizer {
    fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> impl std::future::Future<Output = SpeechResult<SpeechClip>> + Send;
}

/// The part of a reply that gets spoken: everything before the first
/// period, trimmed. `None` when that leaves nothing.
pub fn spoken_excerpt(text: &str) -> Option<&str> {
    let head = text.split('.').next().unwrap_or("").trim();
    if head.is_empty() { None } else { Some(head) }
}
