use crate::campus::{IntentMatcher, RosterStore};
use crate::cli::repl::{
    AppState, UiRegions, UiState, handle_key, handle_mouse, layout_regions, render, settle_speech,
    start_pending_speech,
};
use crate::cli::theme::Theme;
use crate::config::{DEFAULT_SPEECH_LANG, ThemeConfig};
use crate::http::client::HttpClient;
use crate::speech::Speaker;
use crate::speech::google::GoogleTranslateTts;
use crate::speech::player::ClipPlayer;
use crate::trace::SessionTrace;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::path::Path;

/// Drives the UI against an in-memory terminal.
pub struct UiHarness {
    terminal: Terminal<TestBackend>,
    app: AppState,
    ui: UiState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiStateView {
    pub prompt: String,
    pub input: String,
    pub scroll_from_bottom: usize,
    pub should_quit: bool,
}

impl UiHarness {
    pub fn new(width: u16, height: u16, app: AppState) -> Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self {
            terminal,
            app,
            ui: UiState::new(Theme::new(false)),
        })
    }

    pub fn render(&mut self) -> Result<()> {
        let app = &self.app;
        let ui = &mut self.ui;
        self.terminal.draw(|frame| render(frame, app, ui))?;
        Ok(())
    }

    pub async fn send_key(&mut self, key: KeyEvent) -> Result<()> {
        handle_key(&mut self.app, &mut self.ui, key);
        self.render()?;
        start_pending_speech(&self.app, &mut self.ui);
        Ok(())
    }

    /// Blocks until speech for the last reply has finished or failed.
    pub async fn settle_speech(&mut self) {
        settle_speech(&mut self.ui).await;
    }

    pub fn send_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        handle_mouse(&mut self.ui, mouse);
        self.render()
    }

    pub fn buffer_lines(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect::<String>()
            })
            .collect()
    }

    pub fn regions(&self) -> Result<UiRegions> {
        let size = self.terminal.size()?;
        Ok(layout_regions(Rect::new(0, 0, size.width, size.height)))
    }

    pub fn ui_state_view(&self) -> UiStateView {
        UiStateView {
            prompt: self.ui.prompt().to_string(),
            input: self.ui.input.clone(),
            scroll_from_bottom: self.ui.scroll_from_bottom,
            should_quit: self.ui.should_quit,
        }
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }
}

/// App state with speech off, the seed dataset stored under `dir`, and the
/// trace written to `dir/traces`.
pub fn deterministic_app_state(session_id: &str, dir: &Path) -> Result<AppState> {
    let store = RosterStore::open(&dir.join("dataset.json"))?;
    let trace = SessionTrace::create_in_dir(session_id, &dir.join("traces"))?;

    Ok(AppState {
        session_id: session_id.to_string(),
        store,
        matcher: IntentMatcher::new(),
        speaker: None,
        speech_enabled: false,
        theme_config: ThemeConfig::default(),
        trace,
    })
}

/// Like [`deterministic_app_state`] but with speech on, synthesized by the
/// TTS endpoint at `tts_base_url` and written to `dir/speech`.
pub fn speaking_app_state(session_id: &str, dir: &Path, tts_base_url: &str) -> Result<AppState> {
    let mut app = deterministic_app_state(session_id, dir)?;
    let http = HttpClient::new(reqwest::Client::new()).with_trace(app.trace.clone());
    app.speaker = Some(Speaker::new(
        GoogleTranslateTts::new(http, tts_base_url.to_string()),
        ClipPlayer::new(dir.join("speech"), Vec::new()),
        DEFAULT_SPEECH_LANG.to_string(),
    ));
    app.speech_enabled = true;
    Ok(app)
}
