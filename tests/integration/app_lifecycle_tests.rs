/*!
 * Full app lifecycle tests for the controller
 */

use anyhow::Result;
use chatsub::app_config::{Config, OutputFormat};
use chatsub::app_controller::Controller;
use chatsub::file_utils::FileManager;
use crate::common;

/// Test a single-file run writes the configured output
#[tokio::test]
async fn test_controller_run_withValidTranscript_shouldWriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let transcript_path = common::create_test_transcript(&dir, "chat.json")?;

    let controller = Controller::new_for_test()?;
    controller
        .run(transcript_path, dir.clone(), false)
        .await?;

    let output_path = dir.join("subtitles.srt");
    assert!(FileManager::file_exists(&output_path));

    let written = std::fs::read_to_string(&output_path)?;
    assert_eq!(written.matches(" --> ").count(), 3);

    Ok(())
}

/// Test an existing output is preserved unless overwrite is forced
#[tokio::test]
async fn test_controller_run_withExistingOutput_shouldRespectForceFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let transcript_path = common::create_test_transcript(&dir, "chat.json")?;

    let sentinel = "sentinel, not a subtitle";
    common::create_test_file(&dir, "subtitles.srt", sentinel)?;

    let controller = Controller::new_for_test()?;

    // Without the force flag the run is a skip, not an error
    controller
        .run(transcript_path.clone(), dir.clone(), false)
        .await?;
    assert_eq!(std::fs::read_to_string(dir.join("subtitles.srt"))?, sentinel);

    // With the force flag the output is regenerated
    controller.run(transcript_path, dir.clone(), true).await?;
    let written = std::fs::read_to_string(dir.join("subtitles.srt"))?;
    assert!(written.contains(" --> "));

    Ok(())
}

/// Test the styled format flows through the controller
#[tokio::test]
async fn test_controller_run_withAssFormat_shouldWriteStyledTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let transcript_path = common::create_test_transcript(&dir, "chat.json")?;

    let mut config = Config::default();
    config.format = OutputFormat::Ass;
    config.title = "styled".to_string();

    let controller = Controller::with_config(config)?;
    controller.run(transcript_path, dir.clone(), false).await?;

    let written = std::fs::read_to_string(dir.join("styled.ass"))?;
    assert!(written.starts_with("[Script Info]\n"));
    assert_eq!(written.matches("Dialogue: 0,").count(), 3);

    Ok(())
}

/// Test folder mode names each output after its transcript
#[tokio::test]
async fn test_controller_run_folder_withTwoTranscripts_shouldConvertBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_transcript(&dir, "first.json")?;
    common::create_test_transcript(&dir, "second.json")?;

    let controller = Controller::new_for_test()?;
    controller.run_folder(dir.clone(), false).await?;

    assert!(FileManager::file_exists(dir.join("first.srt")));
    assert!(FileManager::file_exists(dir.join("second.srt")));

    Ok(())
}

/// Test a folder without transcripts is a clean no-op
#[tokio::test]
async fn test_controller_run_folder_withNoTranscripts_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::new_for_test()?;
    controller
        .run_folder(temp_dir.path().to_path_buf(), false)
        .await?;

    Ok(())
}

/// Test a missing input path is an error
#[tokio::test]
async fn test_controller_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::new_for_test()?;
    let result = controller
        .run(
            temp_dir.path().join("missing.json"),
            temp_dir.path().to_path_buf(),
            false,
        )
        .await;

    assert!(result.is_err());

    Ok(())
}
