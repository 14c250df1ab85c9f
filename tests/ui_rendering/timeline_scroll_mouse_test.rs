use anyhow::Result;
use tempfile::tempdir;

use crate::common::{
    new_harness, press_page_up, scroll_down, scroll_up, submit_line, timeline_snapshot,
};

async fn fill_timeline(harness: &mut college_assistant::cli::test_support::UiHarness) -> Result<()> {
    for _ in 0..4 {
        submit_line(harness, "college info").await?;
    }
    Ok(())
}

#[tokio::test]
async fn mouse_wheel_scroll_only_applies_inside_timeline_region() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-mouse-area", dir.path(), 100, 24)?;
    fill_timeline(&mut harness).await?;

    let regions = harness.regions()?;
    assert_eq!(harness.ui_state_view().scroll_from_bottom, 0);

    scroll_up(&mut harness, regions.input.x + 1, regions.input.y + 1)?;
    assert_eq!(harness.ui_state_view().scroll_from_bottom, 0);

    scroll_up(&mut harness, regions.timeline.x + 1, regions.timeline.y + 1)?;
    let after_timeline_up = harness.ui_state_view().scroll_from_bottom;
    assert!(after_timeline_up > 0);

    scroll_down(&mut harness, regions.status.x + 1, regions.status.y)?;
    assert_eq!(harness.ui_state_view().scroll_from_bottom, after_timeline_up);

    scroll_down(&mut harness, regions.timeline.x + 1, regions.timeline.y + 1)?;
    assert!(harness.ui_state_view().scroll_from_bottom < after_timeline_up);

    Ok(())
}

#[tokio::test]
async fn timeline_scroll_clamps_to_valid_bounds() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-mouse-clamp", dir.path(), 100, 24)?;
    fill_timeline(&mut harness).await?;

    let regions = harness.regions()?;
    for _ in 0..200 {
        scroll_up(&mut harness, regions.timeline.x + 1, regions.timeline.y + 1)?;
    }

    let max_reached = harness.ui_state_view().scroll_from_bottom;
    assert!(max_reached > 0);
    assert!(timeline_snapshot(&harness)?.starts_with("you> college info"));

    scroll_up(&mut harness, regions.timeline.x + 1, regions.timeline.y + 1)?;
    assert_eq!(harness.ui_state_view().scroll_from_bottom, max_reached);

    for _ in 0..200 {
        scroll_down(&mut harness, regions.timeline.x + 1, regions.timeline.y + 1)?;
    }
    assert_eq!(harness.ui_state_view().scroll_from_bottom, 0);

    Ok(())
}

#[tokio::test]
async fn page_up_scrolls_and_new_input_jumps_to_bottom() -> Result<()> {
    let dir = tempdir()?;
    let mut harness = new_harness("ui-page", dir.path(), 100, 24)?;
    fill_timeline(&mut harness).await?;

    press_page_up(&mut harness).await?;
    assert!(harness.ui_state_view().scroll_from_bottom > 0);

    submit_line(&mut harness, "lab schedule").await?;
    assert_eq!(harness.ui_state_view().scroll_from_bottom, 0);
    assert!(timeline_snapshot(&harness)?.contains("Showing the Lab Schedule grid."));

    Ok(())
}
