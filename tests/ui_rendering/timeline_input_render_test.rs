use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use crate::common::{
    input_snapshot, new_harness, press_backspace, status_snapshot, submit_line,
    timeline_snapshot, type_text,
};

#[tokio::test]
async fn initial_render_shows_welcome_and_status_with_session() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-welcome", dir.path(), 100, 24)?;
    harness.render()?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Welcome to the College Assistant"));

    let status = status_snapshot(&harness)?;
    assert!(status.contains("College Assistant | Session: ui-welcome"));
    assert!(status.contains("Speech: Off"));
    assert!(status.contains("Students: A 4 B 4 C 4"));

    Ok(())
}

#[tokio::test]
async fn prompt_changes_for_chat_and_command_input() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-prompt", dir.path(), 100, 24)?;

    assert_eq!(harness.ui_state_view().prompt, "you> ");
    assert!(input_snapshot(&harness)?.contains("you> "));

    type_text(&mut harness, "/he").await?;
    assert_eq!(harness.ui_state_view().prompt, "cmd> ");
    assert!(input_snapshot(&harness)?.contains("cmd> /he"));

    for _ in 0..3 {
        press_backspace(&mut harness).await?;
    }
    assert_eq!(harness.ui_state_view().prompt, "you> ");
    assert_eq!(harness.ui_state_view().input, "");

    Ok(())
}

#[tokio::test]
async fn timetable_question_renders_grid_with_placeholders() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-timetable", dir.path(), 100, 24)?;

    submit_line(&mut harness, "CSE Timetable").await?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("you> CSE Timetable"));
    assert!(timeline.contains("Here is your timetable in the correct order:"));
    assert!(timeline.contains("DAY"));
    assert!(timeline.contains("11:15 AM"));
    assert!(timeline.contains("Saturday"));
    assert!(timeline.contains("•"));

    Ok(())
}

#[tokio::test]
async fn college_info_renders_institution_block() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-college", dir.path(), 100, 24)?;

    submit_line(&mut harness, "college info").await?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Showing the institution details for KIT."));
    assert!(timeline.contains("Institution Details"));
    assert!(timeline.contains("College Name: Kalpataru Institute of Technology"));
    assert!(timeline.contains("- Computer Science and Engineering"));

    Ok(())
}

#[tokio::test]
async fn name_search_and_fallback_replies() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-search", dir.path(), 100, 24)?;

    submit_line(&mut harness, "is Jyothi M here").await?;
    submit_line(&mut harness, "what is for lunch").await?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Yes, Jyothi M is a registered student in CSE-C."));
    assert!(timeline.contains("I'm not sure."));

    Ok(())
}

#[tokio::test]
async fn add_command_updates_roster_status_and_data_file() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-add", dir.path(), 100, 24)?;

    submit_line(&mut harness, "/add a Kiran Kumar").await?;
    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("cmd> /add a Kiran Kumar"));
    assert!(timeline.contains("Updated CSE-A!"));
    assert!(status_snapshot(&harness)?.contains("Students: A 5 B 4 C 4"));

    let saved = fs::read_to_string(dir.path().join("dataset.json"))?;
    assert!(saved.contains("\"Kiran Kumar\""));

    submit_line(&mut harness, "CSE A Student List").await?;
    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Found 5 students in CSE-A."));
    assert!(timeline.contains("5 | Kiran Kumar"));

    Ok(())
}

#[tokio::test]
async fn command_errors_are_shown_inline() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-errors", dir.path(), 100, 24)?;

    submit_line(&mut harness, "/bogus").await?;
    submit_line(&mut harness, "/add x Ravi").await?;
    submit_line(&mut harness, "/speech on").await?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("error: unknown command '/bogus'. Try /help"));
    assert!(timeline.contains("error: unknown section 'x'. usage: /add <a|b|c> <name>"));
    assert!(timeline.contains("error: speech is unavailable in this session"));
    assert!(status_snapshot(&harness)?.contains("Speech: Off"));

    Ok(())
}

#[tokio::test]
async fn help_about_and_clear() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-help", dir.path(), 100, 24)?;

    submit_line(&mut harness, "/help").await?;
    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("/add <a|b|c> <name>"));
    assert!(timeline.contains("/speech [on|off]"));

    submit_line(&mut harness, "/clear").await?;
    assert!(timeline_snapshot(&harness)?.contains("Welcome to the College Assistant"));

    submit_line(&mut harness, "/about").await?;
    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Made by:"));
    assert!(timeline.contains("- Gourav N Gowda"));

    Ok(())
}

#[tokio::test]
async fn trace_command_points_at_session_trace() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-trace", dir.path(), 100, 24)?;

    submit_line(&mut harness, "Lab Schedule").await?;
    submit_line(&mut harness, "/trace").await?;

    assert!(timeline_snapshot(&harness)?.contains("Trace file: "));

    let trace = fs::read_to_string(harness.app().trace.file_path())?;
    assert!(trace.contains("[user.in    ] Lab Schedule"));
    assert!(trace.contains("[bot.out    ] [lab_schedule] Showing the Lab Schedule grid."));
    assert!(trace.contains("[cmd.in     ] /trace"));

    Ok(())
}
