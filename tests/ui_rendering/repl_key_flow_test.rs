use anyhow::Result;
use tempfile::tempdir;

use crate::common::{
    new_harness, press_ctrl_c, press_down, press_enter, press_esc, press_up, submit_line,
    timeline_snapshot, type_text,
};

#[tokio::test]
async fn up_down_history_navigation_restores_draft() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-history-nav", dir.path(), 100, 24)?;

    submit_line(&mut harness, "college info").await?;
    submit_line(&mut harness, "/help").await?;
    type_text(&mut harness, "lab").await?;

    press_up(&mut harness).await?;
    assert_eq!(harness.ui_state_view().input, "/help");
    assert_eq!(harness.ui_state_view().prompt, "cmd> ");
    press_up(&mut harness).await?;
    assert_eq!(harness.ui_state_view().input, "college info");
    press_up(&mut harness).await?;
    assert_eq!(harness.ui_state_view().input, "college info");
    press_down(&mut harness).await?;
    assert_eq!(harness.ui_state_view().input, "/help");
    press_down(&mut harness).await?;
    assert_eq!(harness.ui_state_view().input, "lab");

    Ok(())
}

#[tokio::test]
async fn history_command_lists_previous_inputs() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-history-cmd", dir.path(), 100, 24)?;

    submit_line(&mut harness, "hello").await?;
    submit_line(&mut harness, "labs").await?;
    submit_line(&mut harness, "/history 1").await?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("  2  labs"));
    assert!(!timeline.contains("  1  hello"));

    Ok(())
}

#[tokio::test]
async fn esc_clears_input_and_blank_enter_is_ignored() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-esc", dir.path(), 100, 24)?;

    type_text(&mut harness, "half typed").await?;
    press_esc(&mut harness).await?;
    assert_eq!(harness.ui_state_view().input, "");

    type_text(&mut harness, "   ").await?;
    press_enter(&mut harness).await?;
    assert!(timeline_snapshot(&harness)?.contains("Welcome to the College Assistant"));

    Ok(())
}

#[tokio::test]
async fn quit_paths_stop_the_session() -> Result<()> {
    for quit in ["exit", "QUIT", "/quit"] {
        let dir = tempdir()?;
        let mut harness = new_harness("ui-quit", dir.path(), 100, 24)?;
        submit_line(&mut harness, quit).await?;
        assert!(harness.ui_state_view().should_quit, "{quit} should quit");
    }

    let dir = tempdir()?;
    let mut harness = new_harness("ui-ctrl-c", dir.path(), 100, 24)?;
    press_ctrl_c(&mut harness).await?;
    assert!(harness.ui_state_view().should_quit);

    Ok(())
}

#[tokio::test]
async fn failed_save_keeps_roster_unchanged() -> Result<()> {
    let dir = tempdir()?;
    std::fs::create_dir_all(dir.path().join("dataset.json").join("blocked"))?;
    let mut harness = new_harness("ui-save-fail", dir.path(), 100, 24)?;

    submit_line(&mut harness, "/add b Ravi").await?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("error: failed to save"));
    assert!(!timeline.contains("Updated CSE-B!"));
    assert_eq!(harness.app().store.data().cse_b.len(), 4);

    Ok(())
}
