use crate::campus::{Dataset, Grid, PLACEHOLDER, Payload, Reply};
use crate::cli::theme::Theme;
use crate::config::ThemeToken;
use ratatui::text::{Line, Span};

pub(crate) const WELCOME_TEXT: &str = "Welcome to the College Assistant. Try 'College Info', 'CSE Timetable', 'Lab Schedule', or /help.";

const USER_PROMPT: &str = "you> ";
const COMMAND_PROMPT: &str = "cmd> ";
const GRID_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    AssistantText,
    SystemInfo,
    SystemError,
}

#[derive(Debug, Clone)]
pub(crate) enum TimelineEntry {
    UserInput(String),
    UserCommand(String),
    AssistantReply(Reply),
    OutputLine { kind: OutputKind, text: String },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_output(&mut self, kind: OutputKind, text: &str) {
        for line in split_output_lines(text) {
            self.entries.push(TimelineEntry::OutputLine {
                kind,
                text: line.to_string(),
            });
        }
    }

    pub(crate) fn push_user_input(&mut self, text: &str) {
        self.entries.push(TimelineEntry::UserInput(text.to_string()));
    }

    pub(crate) fn push_user_command(&mut self, text: &str) {
        self.entries
            .push(TimelineEntry::UserCommand(text.to_string()));
    }

    pub(crate) fn push_reply(&mut self, reply: Reply) {
        self.entries.push(TimelineEntry::AssistantReply(reply));
    }

    /// Payloads are drawn from `data` at render time, so institution details
    /// always reflect the current dataset.
    pub(crate) fn render_lines(&self, theme: &Theme, data: &Dataset) -> Vec<Line<'static>> {
        if self.entries.is_empty() {
            return vec![Line::from(Span::styled(
                WELCOME_TEXT,
                theme.style(output_token_for(OutputKind::SystemInfo)),
            ))];
        }

        let context = RenderContext { theme, data };
        let mut lines = Vec::new();
        for entry in &self.entries {
            widget_for_entry(entry).render(&context, &mut lines);
        }

        lines
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

trait TimelineWidget {
    fn render(&self, context: &RenderContext<'_>, lines: &mut Vec<Line<'static>>);
}

struct RenderContext<'a> {
    theme: &'a Theme,
    data: &'a Dataset,
}

struct InputWidget<'a> {
    prompt: &'static str,
    prompt_token: ThemeToken,
    text: &'a str,
}

impl TimelineWidget for InputWidget<'_> {
    fn render(&self, context: &RenderContext<'_>, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(vec![
            Span::styled(self.prompt, context.theme.style(self.prompt_token)),
            Span::styled(
                self.text.to_string(),
                context.theme.style(ThemeToken::UserInput),
            ),
        ]));
    }
}

struct OutputLineWidget<'a> {
    kind: OutputKind,
    text: &'a str,
}

impl TimelineWidget for OutputLineWidget<'_> {
    fn render(&self, context: &RenderContext<'_>, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(Span::styled(
            self.text.to_string(),
            context.theme.style(output_token_for(self.kind)),
        )));
    }
}

struct ReplyWidget<'a> {
    reply: &'a Reply,
}

impl TimelineWidget for ReplyWidget<'_> {
    fn render(&self, context: &RenderContext<'_>, lines: &mut Vec<Line<'static>>) {
        for line in split_output_lines(&self.reply.text) {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                context.theme.style(ThemeToken::AssistantText),
            )));
        }

        match &self.reply.payload {
            None => {}
            Some(Payload::InstitutionInfo) => render_institution(context, lines),
            Some(Payload::Table(grid)) => render_grid(context, grid, lines),
        }
        lines.push(Line::from(""));
    }
}

fn render_institution(context: &RenderContext<'_>, lines: &mut Vec<Line<'static>>) {
    let institution = &context.data.institution;
    let heading = context.theme.style(ThemeToken::InfoHeading);
    let body = context.theme.style(ThemeToken::AssistantText);

    lines.push(Line::from(Span::styled("Institution Details", heading)));
    lines.push(Line::from(Span::styled(
        format!("College Name: {}", institution.name),
        body,
    )));
    lines.push(Line::from(Span::styled(
        format!("Location: {}", institution.location),
        body,
    )));
    lines.push(Line::from(Span::styled("Departments", heading)));
    for department in &institution.departments {
        lines.push(Line::from(Span::styled(format!("- {department}"), body)));
    }
}

fn render_grid(context: &RenderContext<'_>, grid: &Grid, lines: &mut Vec<Line<'static>>) {
    let header = context.theme.style(ThemeToken::TableHeader);
    let cell = context.theme.style(ThemeToken::TableCell);
    let placeholder = context.theme.style(ThemeToken::TablePlaceholder);

    // Header and rule come first.
    for text in grid.render_text().into_iter().take(2) {
        lines.push(Line::from(Span::styled(text, header)));
    }

    let widths = grid.column_widths();
    for row in &grid.rows {
        let values = std::iter::once(&row.label).chain(&row.cells);
        let last = row.cells.len();
        let mut spans = Vec::with_capacity(2 * (last + 1));
        for (index, (value, width)) in values.zip(&widths).enumerate() {
            if index > 0 {
                spans.push(Span::styled(GRID_SEPARATOR, cell));
            }
            let style = if index > 0 && value == PLACEHOLDER {
                placeholder
            } else {
                cell
            };
            spans.push(Span::styled(value.clone(), style));
            let pad = width.saturating_sub(value.chars().count());
            if index < last && pad > 0 {
                spans.push(Span::styled(" ".repeat(pad), cell));
            }
        }
        lines.push(Line::from(spans));
    }
}

fn widget_for_entry(entry: &TimelineEntry) -> Box<dyn TimelineWidget + '_> {
    match entry {
        TimelineEntry::UserInput(text) => Box::new(InputWidget {
            prompt: USER_PROMPT,
            prompt_token: ThemeToken::UserPrompt,
            text,
        }),
        TimelineEntry::UserCommand(text) => Box::new(InputWidget {
            prompt: COMMAND_PROMPT,
            prompt_token: ThemeToken::CommandPrompt,
            text,
        }),
        TimelineEntry::AssistantReply(reply) => Box::new(ReplyWidget { reply }),
        TimelineEntry::OutputLine { kind, text } => {
            Box::new(OutputLineWidget { kind: *kind, text })
        }
    }
}

pub(crate) fn prompt_for(input: &str) -> &'static str {
    if input.starts_with('/') {
        COMMAND_PROMPT
    } else {
        USER_PROMPT
    }
}

fn split_output_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    text.lines().collect()
}

fn output_token_for(kind: OutputKind) -> ThemeToken {
    match kind {
        OutputKind::AssistantText => ThemeToken::AssistantText,
        OutputKind::SystemInfo => ThemeToken::SystemInfo,
        OutputKind::SystemError => ThemeToken::SystemError,
    }
}
