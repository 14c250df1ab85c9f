use crate::campus::{AddStudentError, IntentMatcher, RosterStore, Section};
use crate::cli::commands::{ABOUT_TEXT, Command, HELP_TEXT, is_command_line, parse_command};
use crate::cli::theme::Theme;
use crate::cli::timeline::{OutputKind, Timeline, prompt_for};
use crate::config::{ThemeConfig, ThemeToken};
use crate::speech::Speaker;
use crate::trace::SessionTrace;
use anyhow::{Result, anyhow};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::env;
use std::io;
use tokio::task::JoinHandle;

const MOUSE_SCROLL_LINES: usize = 3;
const INPUT_BLOCK_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

pub struct AppState {
    pub session_id: String,
    pub store: RosterStore,
    pub matcher: IntentMatcher,
    pub speaker: Option<Speaker>,
    pub speech_enabled: bool,
    pub theme_config: ThemeConfig,
    pub trace: SessionTrace,
}

impl AppState {
    pub fn speech_active(&self) -> bool {
        self.speech_enabled && self.speaker.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiRegions {
    pub timeline: Rect,
    pub input: Rect,
    pub status: Rect,
}

pub(crate) struct UiState {
    pub(crate) input: String,
    pub(crate) timeline: Timeline,
    pub(crate) theme: Theme,
    history: Vec<String>,
    history_index: Option<usize>,
    history_draft: String,
    pub(crate) scroll_from_bottom: usize,
    timeline_area: Rect,
    pending_speech: Option<String>,
    speech_task: Option<JoinHandle<()>>,
    pub(crate) should_quit: bool,
}

impl UiState {
    pub(crate) fn new(theme: Theme) -> Self {
        Self {
            input: String::new(),
            timeline: Timeline::new(),
            theme,
            history: Vec::new(),
            history_index: None,
            history_draft: String::new(),
            scroll_from_bottom: 0,
            timeline_area: Rect::default(),
            pending_speech: None,
            speech_task: None,
            should_quit: false,
        }
    }

    pub(crate) fn prompt(&self) -> &'static str {
        prompt_for(&self.input)
    }

    fn push_info(&mut self, text: &str) {
        self.timeline.push_output(OutputKind::SystemInfo, text);
    }

    fn push_error(&mut self, text: &str) {
        self.timeline.push_output(OutputKind::SystemError, text);
    }
}

pub async fn run_repl(app: &mut AppState) -> Result<()> {
    let mut terminal = ratatui::init();
    if let Err(err) = execute!(io::stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(anyhow!("Failed to enable mouse capture: {err}"));
    }

    let result = event_loop(&mut terminal, app).await;

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, app: &mut AppState) -> Result<()> {
    let theme = Theme::from_config(color_enabled(), &app.theme_config);
    let mut ui = UiState::new(theme);

    loop {
        terminal.draw(|frame| render(frame, app, &mut ui))?;
        start_pending_speech(app, &mut ui);
        if ui.should_quit {
            break;
        }

        let next = tokio::task::spawn_blocking(event::read)
            .await
            .map_err(|err| anyhow!("Failed to read terminal event: {err}"))??;
        match next {
            Event::Key(key) => handle_key(app, &mut ui, key),
            Event::Mouse(mouse) => handle_mouse(&mut ui, mouse),
            _ => {}
        }
    }

    Ok(())
}

fn color_enabled() -> bool {
    env::var_os("NO_COLOR").is_none()
}

/// Hands the latest reply to a background speech task once it has been
/// drawn. A newer reply cancels speech still in flight for an older one.
pub(crate) fn start_pending_speech(app: &AppState, ui: &mut UiState) {
    let Some(text) = ui.pending_speech.take() else {
        return;
    };
    let Some(speaker) = app.speaker.clone().filter(|_| app.speech_enabled) else {
        return;
    };

    if let Some(previous) = ui.speech_task.take() {
        previous.abort();
    }
    let trace = app.trace.clone();
    ui.speech_task = Some(tokio::spawn(async move {
        speaker.speak_quietly(&text, &trace).await;
    }));
}

/// Waits for the current speech task, if any, to finish.
pub(crate) async fn settle_speech(ui: &mut UiState) {
    if let Some(task) = ui.speech_task.take() {
        let _ = task.await;
    }
}

pub(crate) fn handle_key(app: &mut AppState, ui: &mut UiState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c' | 'd') if ctrl => ui.should_quit = true,
        KeyCode::Enter => submit(app, ui),
        KeyCode::Backspace => {
            ui.input.pop();
        }
        KeyCode::Esc => {
            ui.input.clear();
            ui.history_index = None;
        }
        KeyCode::Up => history_previous(ui),
        KeyCode::Down => history_next(ui),
        KeyCode::PageUp => ui.scroll_from_bottom += page_size(ui),
        KeyCode::PageDown => {
            ui.scroll_from_bottom = ui.scroll_from_bottom.saturating_sub(page_size(ui));
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            ui.input.push(ch);
        }
        _ => {}
    }
}

fn page_size(ui: &UiState) -> usize {
    usize::from(ui.timeline_area.height).max(1)
}

/// Wheel events only scroll when the pointer is over the timeline.
pub(crate) fn handle_mouse(ui: &mut UiState, mouse: MouseEvent) {
    if !ui
        .timeline_area
        .contains(Position::new(mouse.column, mouse.row))
    {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => ui.scroll_from_bottom += MOUSE_SCROLL_LINES,
        MouseEventKind::ScrollDown => {
            ui.scroll_from_bottom = ui.scroll_from_bottom.saturating_sub(MOUSE_SCROLL_LINES);
        }
        _ => {}
    }
}

fn history_previous(ui: &mut UiState) {
    if ui.history.is_empty() {
        return;
    }

    let index = match ui.history_index {
        None => {
            ui.history_draft = ui.input.clone();
            ui.history.len() - 1
        }
        Some(index) => index.saturating_sub(1),
    };
    ui.history_index = Some(index);
    ui.input = ui.history[index].clone();
}

fn history_next(ui: &mut UiState) {
    let Some(index) = ui.history_index else {
        return;
    };

    if index + 1 < ui.history.len() {
        ui.history_index = Some(index + 1);
        ui.input = ui.history[index + 1].clone();
    } else {
        ui.history_index = None;
        ui.input = std::mem::take(&mut ui.history_draft);
    }
}

fn submit(app: &mut AppState, ui: &mut UiState) {
    let line = ui.input.trim().to_string();
    ui.input.clear();
    ui.history_index = None;
    ui.history_draft.clear();
    if line.is_empty() {
        return;
    }

    ui.history.push(line.clone());
    ui.scroll_from_bottom = 0;

    if is_command_line(&line) {
        handle_command(app, ui, &line);
        return;
    }

    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        ui.should_quit = true;
        return;
    }

    app.trace.log_user_input(&line);
    ui.timeline.push_user_input(&line);
    let reply = app.matcher.respond(app.store.data(), &line);
    app.trace.log_reply(reply.intent.as_str(), &reply.text);
    if app.speech_active() {
        ui.pending_speech = Some(reply.text.clone());
    }
    ui.timeline.push_reply(reply);
}

fn handle_command(app: &mut AppState, ui: &mut UiState, line: &str) {
    app.trace.log_command(line);
    ui.timeline.push_user_command(line);

    let command = match parse_command(line) {
        Ok(command) => command,
        Err(err) => {
            let message = format!("error: {}", err.message());
            app.trace.log_output("sys.err", &message);
            ui.push_error(&message);
            return;
        }
    };

    match command {
        Command::Help => ui.push_info(HELP_TEXT),
        Command::Clear => ui.timeline.clear(),
        Command::History(limit) => {
            let text = history_text(&ui.history, limit);
            ui.push_info(&text);
        }
        Command::Trace => {
            let text = format!("Trace file: {}", app.trace.file_path().display());
            ui.push_info(&text);
        }
        Command::Add { section, name } => add_student(app, ui, section, &name),
        Command::Speech(None) => {
            let text = format!("Speech is {}.", on_off(app.speech_active()));
            ui.push_info(&text);
        }
        Command::Speech(Some(enabled)) => {
            if enabled && app.speaker.is_none() {
                ui.push_error("error: speech is unavailable in this session");
                return;
            }
            app.speech_enabled = enabled;
            let text = format!("Speech is now {}.", on_off(enabled));
            ui.push_info(&text);
        }
        Command::About => ui.timeline.push_output(OutputKind::AssistantText, ABOUT_TEXT),
        Command::Quit => ui.should_quit = true,
    }
}

fn add_student(app: &mut AppState, ui: &mut UiState, section: Section, name: &str) {
    app.trace.log_admin(&format!("add {section} {name}"));
    match app.store.add_student(section, name) {
        Ok(added) => {
            app.trace.log_admin(&format!(
                "saved {} ({added} -> {section})",
                app.store.path().display()
            ));
            ui.push_info(&format!("Updated {section}!"));
        }
        Err(err @ AddStudentError::Persist { .. }) => {
            app.trace.log_store_error(&err.to_string());
            ui.push_error(&format!("error: {err}"));
        }
        Err(err) => ui.push_error(&format!("error: {err}")),
    }
}

/// The history listing leaves out the `/history` line that asked for it.
fn history_text(history: &[String], limit: Option<usize>) -> String {
    let previous = &history[..history.len().saturating_sub(1)];
    if previous.is_empty() {
        return "No history yet.".to_string();
    }

    let start = limit.map_or(0, |n| previous.len().saturating_sub(n));
    previous[start..]
        .iter()
        .enumerate()
        .map(|(offset, line)| format!("{:>3}  {line}", start + offset + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

pub(crate) fn layout_regions(area: Rect) -> UiRegions {
    let [timeline, input, status] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(INPUT_BLOCK_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    UiRegions {
        timeline,
        input,
        status,
    }
}

pub(crate) fn status_text(app: &AppState) -> String {
    let data = app.store.data();
    format!(
        "College Assistant | Session: {} | Speech: {} | Students: A {} B {} C {}",
        app.session_id,
        if app.speech_active() { "On" } else { "Off" },
        data.cse_a.len(),
        data.cse_b.len(),
        data.cse_c.len(),
    )
}

pub(crate) fn render(frame: &mut Frame<'_>, app: &AppState, ui: &mut UiState) {
    let regions = layout_regions(frame.area());

    let lines = ui.timeline.render_lines(&ui.theme, app.store.data());
    let height = usize::from(regions.timeline.height);
    let max_offset = lines.len().saturating_sub(height);
    ui.timeline_area = regions.timeline;
    ui.scroll_from_bottom = ui.scroll_from_bottom.min(max_offset);
    let top = u16::try_from(max_offset - ui.scroll_from_bottom).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), regions.timeline);

    let prompt = ui.prompt();
    let prompt_token = if is_command_line(&ui.input) {
        ThemeToken::CommandPrompt
    } else {
        ThemeToken::UserPrompt
    };
    let input_line = Line::from(vec![
        Span::styled(prompt, ui.theme.style(prompt_token)),
        Span::styled(ui.input.clone(), ui.theme.style(ThemeToken::UserInput)),
    ]);
    let input_block = Block::bordered().border_style(ui.theme.style(ThemeToken::InputBlock));
    let input_inner = input_block.inner(regions.input);
    frame.render_widget(Paragraph::new(input_line).block(input_block), regions.input);

    let typed = prompt.chars().count() + ui.input.chars().count();
    let cursor_x = input_inner
        .x
        .saturating_add(u16::try_from(typed).unwrap_or(u16::MAX))
        .min(input_inner.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, input_inner.y));

    frame.render_widget(
        Paragraph::new(Span::styled(
            status_text(app),
            ui.theme.style(ThemeToken::Status),
        )),
        regions.status,
    );
}
