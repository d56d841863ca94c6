/*!
 * End-to-end transcript conversion tests: load, smooth, lay out, render, write
 */

use anyhow::Result;
use chatsub::app_config::{AssStyle, SrtStyle};
use chatsub::chat_source::ChatTranscript;
use chatsub::layout::{layout_adaptive_groups, layout_fixed_duration};
use chatsub::subtitle_renderer::{AssRenderer, SrtRenderer};
use chatsub::timing::smooth_timestamps;
use crate::common;

/// Test the full plain-caption pipeline over the sample transcript
#[test]
fn test_pipeline_withSrtTarget_shouldProduceExpectedBlocks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let transcript_path =
        common::create_test_transcript(&temp_dir.path().to_path_buf(), "chat.json")?;

    let transcript = ChatTranscript::load_from_file(&transcript_path)?;
    let mut messages = transcript.messages;

    // All three messages burst inside [0, 5): smoothing spreads them to
    // 0.8333..., 2.5 and 4.1666... seconds
    smooth_timestamps(&mut messages, 5.0)?;
    let lines = layout_fixed_duration(&messages, 5.0)?;

    let output_path = temp_dir.path().join("out.srt");
    SrtRenderer::new(SrtStyle::default()).write_to_file(&lines, &output_path)?;

    let written = std::fs::read_to_string(&output_path)?;
    assert_eq!(
        written,
        "1\n00:00:00,833 --> 00:00:02,500\n<font color=\"#00FF00\">alice</font>: hi\n\n\
         2\n00:00:02,500 --> 00:00:04,167\n<font color=\"#00FF00\">bob</font>: yo 🥳\n\n\
         3\n00:00:04,167 --> 00:00:09,167\n<font color=\"#00FF00\">alice</font>: sup\n\n"
    );

    Ok(())
}

/// Test the full styled-caption pipeline over the sample transcript
#[test]
fn test_pipeline_withAssTarget_shouldProduceHeaderAndEvents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let transcript_path =
        common::create_test_transcript(&temp_dir.path().to_path_buf(), "chat.json")?;

    let transcript = ChatTranscript::load_from_file(&transcript_path)?;
    let mut messages = transcript.messages;

    smooth_timestamps(&mut messages, 5.0)?;
    // k = 3 in [0, 5): duration = min(5 * 5 / 3, 5) = 5 for every caption
    let lines = layout_adaptive_groups(&messages, 5.0, 5.0, 5)?;

    let output_path = temp_dir.path().join("out.ass");
    AssRenderer::new(AssStyle::default()).write_to_file(&lines, &output_path)?;

    let written = std::fs::read_to_string(&output_path)?;

    assert!(written.starts_with("[Script Info]\n"));
    assert_eq!(written.matches("[V4+ Styles]").count(), 1);
    assert_eq!(written.matches("Dialogue: 0,").count(), 3);

    // Five-second captions fade over 250ms at the documented 1/20 ratio
    assert_eq!(written.matches("{\\fad(250,250)}").count(), 3);
    assert!(written.contains("Dialogue: 0,0:00:00.83,0:00:05.83,"));
    assert!(written.contains("{\\1c&H00FF00&}bob: {\\1c&HFFFFFF&}yo 🥳"));

    Ok(())
}

/// Test an empty transcript flows through to an empty (or header-only) document
#[test]
fn test_pipeline_withEmptyTranscript_shouldProduceEmptyTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let transcript_path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "empty.json", "[]")?;

    let transcript = ChatTranscript::load_from_file(&transcript_path)?;
    let mut messages = transcript.messages;

    smooth_timestamps(&mut messages, 5.0)?;

    let srt_lines = layout_fixed_duration(&messages, 5.0)?;
    assert!(srt_lines.is_empty());
    assert!(SrtRenderer::new(SrtStyle::default()).render_document(&srt_lines).is_empty());

    let ass_lines = layout_adaptive_groups(&messages, 5.0, 5.0, 5)?;
    assert!(ass_lines.is_empty());
    let ass_document = AssRenderer::new(AssStyle::default()).render_document(&ass_lines);
    assert!(ass_document.starts_with("[Script Info]\n"));
    assert!(!ass_document.contains("Dialogue:"));

    Ok(())
}
