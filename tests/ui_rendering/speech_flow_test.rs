use anyhow::Result;
use college_assistant::cli::test_support::speaking_app_state;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{harness_with_state, status_snapshot, submit_line, timeline_snapshot};

#[tokio::test]
async fn failed_speech_stays_out_of_the_timeline() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let dir = tempdir()?;
    let state = speaking_app_state("ui-speech-fail", dir.path(), &server.uri())?;
    let mut harness = harness_with_state(state, 100, 24)?;
    assert!(status_snapshot(&harness)?.contains("Speech: On"));

    submit_line(&mut harness, "college info").await?;
    harness.settle_speech().await;
    harness.render()?;

    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Showing the institution details for KIT."));
    assert!(timeline.contains("College Name: Kalpataru Institute of Technology"));
    assert!(!timeline.contains("error"));
    assert!(status_snapshot(&harness)?.contains("Speech: On"));

    let trace = fs::read_to_string(harness.app().trace.file_path())?;
    assert!(trace.contains("[speech.err ] speech request failed with status 500: backend down"));
    assert!(!dir.path().join("speech").exists());

    Ok(())
}

#[tokio::test]
async fn slow_speech_does_not_hold_up_input() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(vec![0xFFu8, 0xFB], "audio/mpeg")
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let dir = tempdir()?;
    let mut state = speaking_app_state("ui-speech-slow", dir.path(), &server.uri())?;
    state.speaker = state
        .speaker
        .map(|speaker| speaker.with_timeout(Duration::from_millis(300)));
    let mut harness = harness_with_state(state, 100, 24)?;

    let started = Instant::now();
    submit_line(&mut harness, "lab schedule").await?;
    submit_line(&mut harness, "/help").await?;
    assert!(started.elapsed() < Duration::from_secs(2));
    let timeline = timeline_snapshot(&harness)?;
    assert!(timeline.contains("Showing the Lab Schedule grid."));
    assert!(timeline.contains("/speech [on|off]"));

    harness.settle_speech().await;
    assert!(started.elapsed() < Duration::from_secs(5));
    let trace = fs::read_to_string(harness.app().trace.file_path())?;
    assert!(trace.contains("[speech.err ] speech request timed out after 300ms"));

    Ok(())
}

#[tokio::test]
async fn spoken_reply_is_written_as_clip() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0xFFu8, 0xFB, 0x90], "audio/mpeg"))
        .mount(&server)
        .await;

    let dir = tempdir()?;
    let state = speaking_app_state("ui-speech-ok", dir.path(), &server.uri())?;
    let mut harness = harness_with_state(state, 100, 24)?;

    submit_line(&mut harness, "is Jyothi M here").await?;
    harness.settle_speech().await;

    let clip = fs::read(dir.path().join("speech").join("last-reply.mp3"))?;
    assert_eq!(clip, vec![0xFF, 0xFB, 0x90]);
    let trace = fs::read_to_string(harness.app().trace.file_path())?;
    assert!(!trace.contains("[speech.err ]"));

    Ok(())
}
