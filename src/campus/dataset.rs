use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Day name mapped to free-form `"time: subject"` entries.
pub type DaySchedule = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Institution {
    pub name: String,
    pub short_name: String,
    pub location: String,
    pub departments: Vec<String>,
}

/// Everything the assistant knows about the college.
///
/// Field order is the snapshot write order and must not be rearranged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    pub institution: Institution,
    pub class_timetable: DaySchedule,
    pub lab_timetable: DaySchedule,
    pub exam_schedule: BTreeMap<String, String>,
    pub classrooms: Vec<String>,
    pub cse_a: Vec<String>,
    pub cse_b: Vec<String>,
    pub cse_c: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    A,
    B,
    C,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::A, Section::B, Section::C];

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "CSE-A",
            Self::B => "CSE-B",
            Self::C => "CSE-C",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let compact = value.trim().to_ascii_lowercase().replace(['-', ' '], "");
        match compact.as_str() {
            "a" | "csea" => Ok(Self::A),
            "b" | "cseb" => Ok(Self::B),
            "c" | "csec" => Ok(Self::C),
            _ => Err(format!("unknown section '{value}'")),
        }
    }
}

impl Dataset {
    pub fn roster(&self, section: Section) -> &[String] {
        match section {
            Section::A => &self.cse_a,
            Section::B => &self.cse_b,
            Section::C => &self.cse_c,
        }
    }

    pub(crate) fn roster_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::A => &mut self.cse_a,
            Section::B => &mut self.cse_b,
            Section::C => &mut self.cse_c,
        }
    }

    /// Built-in dataset used until the first admin edit creates a snapshot.
    pub fn seed() -> Self {
        Self {
            institution: Institution {
                name: "Kalpataru Institute of Technology".to_string(),
                short_name: "KIT".to_string(),
                location: "Tiptur, Karnataka".to_string(),
                departments: strings(&[
                    "Computer Science and Engineering",
                    "Electronics and Communication Engineering",
                    "Mechanical Engineering",
                    "Civil Engineering",
                    "Artificial Intelligence and Machine Learning",
                ]),
            },
            class_timetable: schedule(&[
                (
                    "Monday",
                    &[
                        "9 AM: Mathematics",
                        "10 AM: Data Structures",
                        "11:15 AM: Operating Systems",
                        "12:15 PM: Computer Networks",
                        "2:15 PM: DBMS",
                    ],
                ),
                (
                    "Tuesday",
                    &[
                        "9 AM: Data Structures",
                        "10 AM: Mathematics",
                        "11:15 AM: DBMS",
                        "2:15 PM: Operating Systems",
                    ],
                ),
                (
                    "Wednesday",
                    &[
                        "9 AM: Computer Networks",
                        "10 AM: Operating Systems",
                        "11:15 AM: Mathematics",
                        "12:15 PM: Data Structures",
                    ],
                ),
                (
                    "Thursday",
                    &[
                        "9 AM: DBMS",
                        "11:15 AM: Computer Networks",
                        "12:15 PM: Mathematics",
                        "2:15 PM: Data Structures",
                    ],
                ),
                (
                    "Friday",
                    &[
                        "9 AM: Operating Systems",
                        "10 AM: DBMS",
                        "12:15 PM: Environmental Studies",
                    ],
                ),
                ("Saturday", &["9 AM: Mathematics", "10 AM: Library"]),
            ]),
            lab_timetable: schedule(&[
                ("Monday", &["2:15 PM - 4:15 PM: DS Lab (Batch 1)"]),
                ("Tuesday", &["11:15 AM - 1:15 PM: DBMS Lab"]),
                ("Wednesday", &["2:15 PM - 4:15 PM: Networks Lab"]),
                (
                    "Thursday",
                    &[
                        "9 AM - 11 AM: DS Lab (Batch 2)",
                        "9 AM - 11 AM: OS Lab (Batch 1)",
                    ],
                ),
                ("Friday", &["2:15 PM - 4:15 PM: OS Lab (Batch 2)"]),
            ]),
            exam_schedule: [
                ("Mathematics", "2026-12-01"),
                ("Data Structures", "2026-12-03"),
                ("Operating Systems", "2026-12-05"),
                ("Computer Networks", "2026-12-08"),
                ("DBMS", "2026-12-10"),
            ]
            .into_iter()
            .map(|(subject, date)| (subject.to_string(), date.to_string()))
            .collect(),
            classrooms: strings(&["CS-101", "CS-102", "CS-103", "CS-Lab-1", "CS-Lab-2"]),
            cse_a: strings(&["Aarav Sharma", "Bhavana Rao", "Chetan Kumar", "Divya Hegde"]),
            cse_b: strings(&["Esha Patil", "Farhan Ali", "Ganesh Murthy", "Harini S"]),
            cse_c: strings(&["Ishaan Gowda", "Jyothi M", "Karthik Nayak", "Lavanya R"]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn schedule(days: &[(&str, &[&str])]) -> DaySchedule {
    days.iter()
        .map(|(day, entries)| ((*day).to_string(), strings(entries)))
        .collect()
}
