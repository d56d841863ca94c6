/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use chatsub::app_config::{Config, LogLevel, OutputFormat};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.max_seconds_onscreen, 5.0);
    assert_eq!(config.smoothing_interval_seconds, 5.0);
    assert_eq!(config.grouping_interval_seconds, 5.0);
    assert_eq!(config.max_subtitles_onscreen, 5);
    assert_eq!(config.title, "subtitles");
    assert_eq!(config.format, OutputFormat::Srt);
    assert_eq!(config.log_level, LogLevel::Info);

    assert_eq!(config.srt_style.author_colour, "#00FF00");
    assert_eq!(config.ass_style.play_res_x, 640);
    assert_eq!(config.ass_style.play_res_y, 480);
    assert_eq!(config.ass_style.font_name, "Myriad Web Pro Condensed");
    assert_eq!(config.ass_style.font_size, 26);
    assert_eq!(config.ass_style.author_colour, "&H00FF00&");
    assert_eq!(config.ass_style.text_colour, "&HFFFFFF&");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Start with a valid config
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Non-positive caption duration
    config.max_seconds_onscreen = 0.0;
    assert!(config.validate().is_err());
    config.max_seconds_onscreen = 5.0;

    // Non-positive smoothing window
    config.smoothing_interval_seconds = -3.0;
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("smoothing_interval_seconds"));
    assert!(err.contains("-3"));
    config.smoothing_interval_seconds = 5.0;

    // Non-positive grouping window
    config.grouping_interval_seconds = 0.0;
    assert!(config.validate().is_err());
    config.grouping_interval_seconds = 5.0;

    // Zero stacking bound
    config.max_subtitles_onscreen = 0;
    assert!(config.validate().is_err());
    config.max_subtitles_onscreen = 5;

    // Blank title
    config.title = "   ".to_string();
    assert!(config.validate().is_err());
    config.title = "subtitles".to_string();

    assert!(config.validate().is_ok());
}

/// Test partial config files fall back to field defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldUseDefaults() {
    let config: Config = serde_json::from_str(r#"{"max_seconds_onscreen": 7.5}"#).unwrap();

    assert_eq!(config.max_seconds_onscreen, 7.5);
    assert_eq!(config.smoothing_interval_seconds, 5.0);
    assert_eq!(config.max_subtitles_onscreen, 5);
    assert_eq!(config.format, OutputFormat::Srt);
}

/// Test a config round-trips through JSON
#[test]
fn test_config_serialization_withRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.format = OutputFormat::Ass;
    config.max_subtitles_onscreen = 8;
    config.title = "stream_chat".to_string();

    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.format, OutputFormat::Ass);
    assert_eq!(restored.max_subtitles_onscreen, 8);
    assert_eq!(restored.title, "stream_chat");
    assert_eq!(restored.ass_style, config.ass_style);
}

/// Test output format parsing, display and extensions
#[test]
fn test_output_format_withConversions_shouldRoundTrip() {
    assert_eq!(OutputFormat::from_str("srt").unwrap(), OutputFormat::Srt);
    assert_eq!(OutputFormat::from_str("ASS").unwrap(), OutputFormat::Ass);
    assert!(OutputFormat::from_str("vtt").is_err());

    assert_eq!(OutputFormat::Srt.extension(), "srt");
    assert_eq!(OutputFormat::Ass.extension(), "ass");
    assert_eq!(OutputFormat::Srt.display_name(), "SRT");
    assert_eq!(format!("{}", OutputFormat::Ass), "ass");
}
