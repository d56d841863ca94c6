use anyhow::{Result, anyhow};
use crate::chat_source::ChatMessage;
use crate::timing::WindowBuckets;

// @module: Caption layout engines

/// One rendered unit of on-screen text with a start and end time
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLine {
    /// On-screen appearance time in seconds
    pub start_seconds: f64,

    /// On-screen disappearance time in seconds, always after the start
    pub end_seconds: f64,

    /// Author display name
    pub author: String,

    /// Caption text
    pub text: String,

    /// Position in the source sequence; set by the fixed-duration engine,
    /// absent for grouped layout where captions are not individually numbered
    pub sequence_index: Option<usize>,
}

impl CaptionLine {
    /// On-screen duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Lay out one caption per message with a fixed maximum on-screen duration.
///
/// A caption stays visible for `max_seconds_onscreen`, clipped early by the
/// next message's arrival so captions never overlap. The final caption has no
/// follower to clip against and keeps the full duration. Output preserves the
/// input count and order; each line carries its source index.
pub fn layout_fixed_duration(
    messages: &[ChatMessage],
    max_seconds_onscreen: f64,
) -> Result<Vec<CaptionLine>> {
    if max_seconds_onscreen <= 0.0 {
        return Err(anyhow!(
            "max_seconds_onscreen must be positive, but was {}",
            max_seconds_onscreen
        ));
    }

    let mut lines = Vec::with_capacity(messages.len());
    for (index, message) in messages.iter().enumerate() {
        let next_timestamp = messages.get(index + 1).map(|next| next.timestamp_seconds);
        let uncapped_end = message.timestamp_seconds + max_seconds_onscreen;
        let end_seconds = match next_timestamp {
            Some(next_start) => next_start.min(uncapped_end),
            None => uncapped_end,
        };

        lines.push(CaptionLine {
            start_seconds: message.timestamp_seconds,
            end_seconds,
            author: message.author.clone(),
            text: message.text.clone(),
            sequence_index: Some(index),
        });
    }

    Ok(lines)
}

/// Lay out captions with durations adapted to local message density.
///
/// Messages are bucketed into fixed windows of `grouping_interval_seconds`.
/// A window holding `k` messages has density `k / w` messages per second, and
/// every caption in it gets the duration that keeps at most
/// `max_subtitles_onscreen` captions visible at once at that arrival rate,
/// never exceeding `max_seconds_onscreen`:
///
/// `duration = min(max_subtitles_onscreen / density, max_seconds_onscreen)`
///
/// Unlike the fixed-duration engine, captions are not clipped against the next
/// message's start. Overlapping, stacked captions are intentional here; the
/// styled target format renders simultaneous events, and the density rule
/// bounds how many stack up.
pub fn layout_adaptive_groups(
    messages: &[ChatMessage],
    max_seconds_onscreen: f64,
    grouping_interval_seconds: f64,
    max_subtitles_onscreen: u32,
) -> Result<Vec<CaptionLine>> {
    if max_seconds_onscreen <= 0.0 {
        return Err(anyhow!(
            "max_seconds_onscreen must be positive, but was {}",
            max_seconds_onscreen
        ));
    }
    if grouping_interval_seconds <= 0.0 {
        return Err(anyhow!(
            "grouping_interval_seconds must be positive, but was {}",
            grouping_interval_seconds
        ));
    }
    if max_subtitles_onscreen == 0 {
        return Err(anyhow!(
            "max_subtitles_onscreen must be positive, but was {}",
            max_subtitles_onscreen
        ));
    }

    let mut lines = Vec::with_capacity(messages.len());
    for bucket in WindowBuckets::new(messages, grouping_interval_seconds) {
        let density = bucket.len() as f64 / grouping_interval_seconds;
        let duration = (f64::from(max_subtitles_onscreen) / density).min(max_seconds_onscreen);

        for message in &messages[bucket.range] {
            lines.push(CaptionLine {
                start_seconds: message.timestamp_seconds,
                end_seconds: message.timestamp_seconds + duration,
                author: message.author.clone(),
                text: message.text.clone(),
                sequence_index: None,
            });
        }
    }

    Ok(lines)
}
