use super::dataset::{Dataset, Section};
use super::grid::Grid;

pub const FALLBACK_TEXT: &str =
    "I'm not sure. Type 'College Info', 'CSE A Student List', or search a classmate's name.";
pub const SECTION_PROMPT_TEXT: &str =
    "Please specify: 'CSE A Student List', 'CSE B Student List', or 'CSE C Student List'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    InstitutionInfo,
    ClassTimetable,
    LabSchedule,
    StudentList,
    NameSearch,
    Fallback,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InstitutionInfo => "institution_info",
            Self::ClassTimetable => "class_timetable",
            Self::LabSchedule => "lab_schedule",
            Self::StudentList => "student_list",
            Self::NameSearch => "name_search",
            Self::Fallback => "fallback",
        }
    }
}

/// What the display layer should draw under the reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    InstitutionInfo,
    Table(Grid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
    pub payload: Option<Payload>,
}

struct Rule {
    intent: Intent,
    matches: fn(&Dataset, &str) -> bool,
    reply: fn(&Dataset, &str) -> Reply,
}

// First match wins; reordering changes which reply fires on mixed input.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::InstitutionInfo,
        matches: |_, text| contains_any(text, &["collegeinfo", "institution"]),
        reply: institution_reply,
    },
    Rule {
        intent: Intent::ClassTimetable,
        matches: |_, text| contains_any(text, &["classtimetable", "csetimetable"]),
        reply: class_timetable_reply,
    },
    Rule {
        intent: Intent::LabSchedule,
        matches: |_, text| contains_any(text, &["labschedule", "labs"]),
        reply: lab_schedule_reply,
    },
    Rule {
        intent: Intent::StudentList,
        matches: |_, text| text.contains("studentlist"),
        reply: student_list_reply,
    },
    Rule {
        intent: Intent::NameSearch,
        matches: |data, text| find_student(data, text).is_some(),
        reply: name_search_reply,
    },
];

/// Lower-cases and strips spaces, the only cleaning the matcher applies.
pub fn normalize(input: &str) -> String {
    input.to_lowercase().replace(' ', "")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentMatcher;

impl IntentMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, data: &Dataset, input: &str) -> Intent {
        let text = normalize(input);
        RULES
            .iter()
            .find(|rule| (rule.matches)(data, &text))
            .map_or(Intent::Fallback, |rule| rule.intent)
    }

    pub fn respond(&self, data: &Dataset, input: &str) -> Reply {
        let text = normalize(input);
        match RULES.iter().find(|rule| (rule.matches)(data, &text)) {
            Some(rule) => (rule.reply)(data, &text),
            None => Reply {
                intent: Intent::Fallback,
                text: FALLBACK_TEXT.to_string(),
                payload: None,
            },
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn institution_reply(data: &Dataset, _text: &str) -> Reply {
    Reply {
        intent: Intent::InstitutionInfo,
        text: format!(
            "Showing the institution details for {}.",
            data.institution.short_name
        ),
        payload: Some(Payload::InstitutionInfo),
    }
}

fn class_timetable_reply(data: &Dataset, _text: &str) -> Reply {
    Reply {
        intent: Intent::ClassTimetable,
        text: "Here is your timetable in the correct order:".to_string(),
        payload: Some(Payload::Table(Grid::class_timetable(&data.class_timetable))),
    }
}

fn lab_schedule_reply(data: &Dataset, _text: &str) -> Reply {
    Reply {
        intent: Intent::LabSchedule,
        text: "Showing the Lab Schedule grid.".to_string(),
        payload: Some(Payload::Table(Grid::lab_schedule(&data.lab_timetable))),
    }
}

fn student_list_reply(data: &Dataset, text: &str) -> Reply {
    let Some(section) = requested_section(text) else {
        return Reply {
            intent: Intent::StudentList,
            text: SECTION_PROMPT_TEXT.to_string(),
            payload: None,
        };
    };

    let names = data.roster(section);
    Reply {
        intent: Intent::StudentList,
        text: format!("Found {} students in {section}.", names.len()),
        payload: Some(Payload::Table(Grid::roster(section, names))),
    }
}

fn requested_section(text: &str) -> Option<Section> {
    Section::ALL.into_iter().find(|section| {
        let letter = section.letter().to_ascii_lowercase();
        text.contains(&format!("cse{letter}")) || text.contains(&format!("section{letter}"))
    })
}

fn name_search_reply(data: &Dataset, text: &str) -> Reply {
    match find_student(data, text) {
        Some((section, name)) => Reply {
            intent: Intent::NameSearch,
            text: format!("Yes, {name} is a registered student in {section}."),
            payload: None,
        },
        None => Reply {
            intent: Intent::Fallback,
            text: FALLBACK_TEXT.to_string(),
            payload: None,
        },
    }
}

/// First roster name (A, then B, then C) contained in the normalized input.
fn find_student<'a>(data: &'a Dataset, text: &str) -> Option<(Section, &'a str)> {
    Section::ALL.into_iter().find_map(|section| {
        data.roster(section)
            .iter()
            .find(|name| {
                let needle = normalize(name);
                !needle.is_empty() && text.contains(&needle)
            })
            .map(|name| (section, name.as_str()))
    })
}
