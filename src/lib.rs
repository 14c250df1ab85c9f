pub mod campus;
pub mod cli;
pub mod config;
pub mod http;
pub mod speech;
pub mod trace;

use anyhow::Result;
use campus::{IntentMatcher, RosterStore};
use cli::{AppState, CliArgs, run_repl};
use config::{AppConfig, SpeechConfig};
use http::client::HttpClient;
use speech::Speaker;
use speech::google::GoogleTranslateTts;
use speech::player::ClipPlayer;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use trace::{SessionTrace, resolve_state_dir_from_env};

const SPEECH_DIR_NAME: &str = "speech";

pub async fn run(args: CliArgs) -> Result<()> {
    let config = if let Some(path) = args.config.as_deref() {
        AppConfig::load_with_path(Some(path))?
    } else {
        AppConfig::load()?
    };
    let store = RosterStore::open(&data_file_for(&args, &config))?;
    let session_id = generate_session_id();
    let trace = SessionTrace::create(&session_id)?;
    let speech_dir = resolve_state_dir_from_env()?.join(SPEECH_DIR_NAME);
    let speaker = build_speaker(&config.speech, &speech_dir, &trace);

    let mut app_state = AppState {
        session_id,
        store,
        matcher: IntentMatcher::new(),
        speaker: Some(speaker),
        speech_enabled: config.speech.enabled && !args.no_speech,
        theme_config: config.theme.clone(),
        trace,
    };

    run_repl(&mut app_state).await
}

/// `--data` beats the config file and environment.
fn data_file_for(args: &CliArgs, config: &AppConfig) -> PathBuf {
    args.data
        .clone()
        .unwrap_or_else(|| config.data_file.clone())
}

fn build_speaker(speech: &SpeechConfig, speech_dir: &Path, trace: &SessionTrace) -> Speaker {
    let http = HttpClient::new(reqwest::Client::new()).with_trace(trace.clone());
    Speaker::new(
        GoogleTranslateTts::new(http, speech.base_url.clone()),
        ClipPlayer::new(speech_dir.to_path_buf(), speech.player.clone()),
        speech.lang.clone(),
    )
    .with_timeout(Duration::from_millis(speech.timeout_ms))
}

fn generate_session_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis());
    format!("{millis:x}-{:x}", std::process::id())
}
