use super::provider::{SpeechClip, SpeechError, SpeechRequest, SpeechResult, SpeechSynthesizer};
use crate::http::client::HttpClient;

pub const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";

// The endpoint rejects longer `q` values.
const MAX_CHUNK_CHARS: usize = 100;
const DEFAULT_MIME_TYPE: &str = "audio/mpeg";

/// Text-to-speech over the public Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateTts {
    http: HttpClient,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_tts", self.base_url)
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        lang: &str,
    ) -> SpeechResult<(Option<String>, Vec<u8>)> {
        let total_text = total.to_string();
        let index_text = index.to_string();
        let len_text = chunk.chars().count().to_string();
        let response = self
            .http
            .get_bytes(
                &self.endpoint(),
                &[
                    ("ie", "UTF-8"),
                    ("q", chunk),
                    ("tl", lang),
                    ("total", total_text.as_str()),
                    ("idx", index_text.as_str()),
                    ("textlen", len_text.as_str()),
                    ("client", "tw-ob"),
                ],
            )
            .await
            .map_err(|err| SpeechError::Transport(err.to_string()))?;

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body)
                .chars()
                .take(400)
                .collect::<String>();
            return Err(SpeechError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok((response.content_type, response.body))
    }
}

impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, request: SpeechRequest) -> SpeechResult<SpeechClip> {
        let chunks = chunk_text(&request.text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut mime_type = None;
        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let (content_type, bytes) = self
                .fetch_chunk(chunk, index, chunks.len(), &request.lang)
                .await?;
            mime_type = mime_type.or(content_type);
            // MP3 frames concatenate into one playable stream.
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        Ok(SpeechClip {
            mime_type: mime_type.unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            audio,
        })
    }
}

/// Splits on whitespace into pieces of at most `max_chars` characters. A
/// single word longer than the limit is cut hard.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            chunks.push(head);
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
