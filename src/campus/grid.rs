use super::dataset::{DaySchedule, Section};
use std::collections::{BTreeMap, BTreeSet};

/// Glyph shown in cells with nothing scheduled.
pub const PLACEHOLDER: &str = "•";

pub const DAY_ORDER: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const CLASS_TIME_SLOTS: [&str; 5] = ["9 AM", "10 AM", "11:15 AM", "12:15 PM", "2:15 PM"];

const CLASS_CELL_SEPARATOR: &str = " / ";
const LAB_CELL_SEPARATOR: &str = " | ";

/// A dense two-dimensional table with labelled rows and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub corner: String,
    pub columns: Vec<String>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub label: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum ColumnOrder<'a> {
    /// Exactly these columns, in this order; other times are dropped.
    Fixed(&'a [&'a str]),
    /// Every distinct time seen, sorted lexicographically.
    Natural,
}

impl Grid {
    pub fn class_timetable(schedule: &DaySchedule) -> Self {
        pivot(
            schedule,
            ColumnOrder::Fixed(&CLASS_TIME_SLOTS),
            CLASS_CELL_SEPARATOR,
        )
    }

    pub fn lab_schedule(schedule: &DaySchedule) -> Self {
        pivot(schedule, ColumnOrder::Natural, LAB_CELL_SEPARATOR)
    }

    /// One-column roster listing with rows numbered from 1.
    pub fn roster(section: Section, names: &[String]) -> Self {
        Self {
            corner: String::new(),
            columns: vec![format!("Student Name (Section {})", section.letter())],
            rows: names
                .iter()
                .enumerate()
                .map(|(index, name)| GridRow {
                    label: (index + 1).to_string(),
                    cells: vec![name.clone()],
                })
                .collect(),
        }
    }

    pub fn cell(&self, row: &str, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.label == row)
            .and_then(|r| r.cells.get(col))
            .map(String::as_str)
    }

    /// Display width of the label column followed by each data column.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.columns.len() + 1);
        widths.push(
            self.rows
                .iter()
                .map(|row| text_width(&row.label))
                .chain(std::iter::once(text_width(&self.corner)))
                .max()
                .unwrap_or(0),
        );
        for (index, column) in self.columns.iter().enumerate() {
            let widest_cell = self
                .rows
                .iter()
                .filter_map(|row| row.cells.get(index))
                .map(|cell| text_width(cell))
                .max()
                .unwrap_or(0);
            widths.push(widest_cell.max(text_width(column)));
        }
        widths
    }

    /// Aligned plain-text rendering: header, rule, one line per row.
    pub fn render_text(&self) -> Vec<String> {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        let header = std::iter::once(self.corner.as_str())
            .chain(self.columns.iter().map(String::as_str));
        lines.push(join_padded(header, &widths));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &self.rows {
            let cells = std::iter::once(row.label.as_str())
                .chain(row.cells.iter().map(String::as_str));
            lines.push(join_padded(cells, &widths));
        }

        lines
    }
}

/// Splits `"time: subject"` on the last colon, so colons inside the time
/// label survive. Entries without a colon yield `None`.
pub fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let (time, subject) = entry.rsplit_once(':')?;
    Some((time.trim(), subject.trim()))
}

pub fn pivot(schedule: &DaySchedule, columns: ColumnOrder<'_>, separator: &str) -> Grid {
    let mut cells: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
    let mut seen_times = BTreeSet::new();

    for (day, entries) in schedule {
        for entry in entries {
            let Some((time, subject)) = split_entry(entry) else {
                continue;
            };
            seen_times.insert(time);
            cells.entry((day.trim(), time)).or_default().push(subject);
        }
    }

    let columns: Vec<&str> = match columns {
        ColumnOrder::Fixed(order) => order.to_vec(),
        ColumnOrder::Natural => seen_times.into_iter().collect(),
    };

    let rows = DAY_ORDER
        .iter()
        .map(|day| GridRow {
            label: (*day).to_string(),
            cells: columns
                .iter()
                .map(|time| match cells.get(&(*day, *time)) {
                    Some(subjects) => subjects.join(separator),
                    None => PLACEHOLDER.to_string(),
                })
                .collect(),
        })
        .collect();

    Grid {
        corner: "DAY".to_string(),
        columns: columns.into_iter().map(ToOwned::to_owned).collect(),
        rows,
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(text_width(cell));
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}
