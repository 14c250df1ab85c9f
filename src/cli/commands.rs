use crate::campus::Section;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Clear,
    History(Option<usize>),
    Trace,
    Add { section: Section, name: String },
    Speech(Option<bool>),
    About,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

pub(crate) const HELP_TEXT: &str = "Ask in plain words, for example:\n  College Info\n  CSE Timetable\n  Lab Schedule\n  CSE A Student List   (A, B, or C)\n  Search <name>\n\nAvailable commands:\n  /help                Show this command list\n  /clear               Clear the conversation\n  /history [n]         Show submitted inputs (or last n)\n  /trace               Show path to the current trace file\n  /add <a|b|c> <name>  Add a student to a section and save the dataset\n  /speech [on|off]     Show or toggle spoken replies\n  /about               Show project credits\n  /quit                Leave the assistant";

pub(crate) const ABOUT_TEXT: &str = "College Assistant\nMade by:\n  - Darshan HS\n  - Deekshith RK\n  - Gourav N Gowda\n  - K Manoj Kumar";

const ADD_USAGE: &str = "usage: /add <a|b|c> <name>";

pub(crate) fn parse_command(line: &str) -> Result<Command, ParseError> {
    if !line.starts_with('/') {
        return Err(ParseError::new("not a command"));
    }

    let trimmed = line.trim();
    if trimmed == "/" {
        return Err(ParseError::new("empty command. Try /help"));
    }

    let command_text = &trimmed[1..];
    let mut parts = command_text.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return Err(ParseError::new("empty command. Try /help"));
    }
    let rest = parts.next().map(str::trim).unwrap_or("");

    match name.as_str() {
        "help" => expect_no_args(rest, Command::Help, "usage: /help"),
        "clear" => expect_no_args(rest, Command::Clear, "usage: /clear"),
        "history" => parse_history(rest),
        "trace" => expect_no_args(rest, Command::Trace, "usage: /trace"),
        "add" => parse_add(rest),
        "speech" => parse_speech(rest),
        "about" => expect_no_args(rest, Command::About, "usage: /about"),
        "quit" | "exit" => expect_no_args(rest, Command::Quit, "usage: /quit"),
        _ => Err(ParseError::new(format!(
            "unknown command '/{name}'. Try /help"
        ))),
    }
}

pub(crate) fn is_command_line(line: &str) -> bool {
    line.starts_with('/')
}

fn expect_no_args(rest: &str, command: Command, usage: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::new(usage))
    }
}

fn parse_history(rest: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        return Ok(Command::History(None));
    }

    let value = rest
        .parse::<usize>()
        .map_err(|_| ParseError::new("usage: /history [n]"))?;
    if value == 0 {
        return Err(ParseError::new("usage: /history [n] (n must be >= 1)"));
    }

    Ok(Command::History(Some(value)))
}

fn parse_add(rest: &str) -> Result<Command, ParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let section_text = parts.next().unwrap_or("");
    if section_text.is_empty() {
        return Err(ParseError::new(ADD_USAGE));
    }

    let section = Section::from_str(section_text)
        .map_err(|reason| ParseError::new(format!("{reason}. {ADD_USAGE}")))?;
    let name = parts.next().map(str::trim).unwrap_or("");
    if name.is_empty() {
        return Err(ParseError::new(format!("missing student name. {ADD_USAGE}")));
    }

    Ok(Command::Add {
        section,
        name: name.to_string(),
    })
}

fn parse_speech(rest: &str) -> Result<Command, ParseError> {
    match rest {
        "" => Ok(Command::Speech(None)),
        "on" => Ok(Command::Speech(Some(true))),
        "off" => Ok(Command::Speech(Some(false))),
        _ => Err(ParseError::new("usage: /speech [on|off]")),
    }
}
