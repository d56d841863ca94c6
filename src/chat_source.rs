use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use log::{warn, debug};
use serde::Deserialize;
use serde_json::Value;

// @module: Chat transcript loading and message preparation

// @struct: Single chat message
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    // @field: Seconds from stream start, rewritten by smoothing
    pub timestamp_seconds: f64,

    // @field: Author display name
    pub author: String,

    // @field: Message text, emote shortcuts already resolved
    pub text: String,
}

impl ChatMessage {
    /// Creates a new chat message
    pub fn new(timestamp_seconds: f64, author: impl Into<String>, text: impl Into<String>) -> Self {
        ChatMessage {
            timestamp_seconds,
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Raw transcript item as written by a chat downloader JSON export.
/// Only the fields this tool consumes are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
struct RawChatItem {
    time_in_seconds: f64,
    author: RawAuthor,
    message: String,
    #[serde(default)]
    emotes: Vec<RawEmote>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    name: String,
}

// @struct: Emote metadata attached to a raw transcript item
#[derive(Debug, Deserialize)]
struct RawEmote {
    // @field: UTF replacement, absent for sprite-only emotes
    id: Option<String>,

    // @field: Textual shortcuts, like ":partying_face:"
    #[serde(default)]
    shortcuts: Vec<String>,

    // @field: Sprite-image emotes cannot be rendered in a text format
    #[serde(default)]
    is_custom_emoji: bool,
}

/// Collection of chat messages with their source file
#[derive(Debug)]
pub struct ChatTranscript {
    /// Source transcript file
    pub source_file: PathBuf,

    /// Messages sorted ascending by timestamp
    pub messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Create an empty transcript for the given source
    pub fn new(source_file: PathBuf) -> Self {
        ChatTranscript {
            source_file,
            messages: Vec::new(),
        }
    }

    /// Load a transcript from a chat downloader JSON export
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;

        let messages = Self::parse_json_string(&content)?;
        debug!("Loaded {} chat messages from {}", messages.len(), path.display());

        Ok(ChatTranscript {
            source_file: path.to_path_buf(),
            messages,
        })
    }

    /// Parse a JSON array of chat items into messages.
    ///
    /// Decoding is lenient: a malformed item is skipped with a warning rather
    /// than failing the whole transcript, since downloader exports mix message
    /// shapes across platforms. The result is sorted ascending by timestamp,
    /// which the smoothing and layout passes rely on.
    pub fn parse_json_string(content: &str) -> Result<Vec<ChatMessage>> {
        let items: Vec<Value> = serde_json::from_str(content)
            .context("Transcript content is not a JSON array of chat items")?;

        let item_count = items.len();
        let mut messages = Vec::with_capacity(item_count);
        let mut skipped = 0;

        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<RawChatItem>(item) {
                Ok(raw) => messages.push(Self::message_from_item(raw)),
                Err(e) => {
                    warn!("Skipping malformed chat item {}: {}", index, e);
                    skipped += 1;
                }
            }
        }

        if messages.is_empty() && skipped > 0 {
            return Err(anyhow!(
                "No usable chat messages found in transcript ({} items skipped)",
                skipped
            ));
        }

        // Downloaders emit in arrival order, which is almost but not always
        // timestamp order. Stable sort keeps arrival order within equal timestamps.
        messages.sort_by(|a, b| a.timestamp_seconds.total_cmp(&b.timestamp_seconds));

        Ok(messages)
    }

    /// Convert a raw item into a chat message, resolving emote shortcuts
    fn message_from_item(item: RawChatItem) -> ChatMessage {
        let text = Self::resolve_emote_shortcuts(item.message, &item.emotes);
        ChatMessage {
            timestamp_seconds: item.time_in_seconds,
            author: item.author.name,
            text,
        }
    }

    /// Replace shorthand emotes, like :partying_face:, with UTF, like 🥳.
    ///
    /// Custom emojis use sprite images, not UTF characters, and a text-based
    /// subtitle format cannot display images, so those shortcuts are left alone.
    fn resolve_emote_shortcuts(mut text: String, emotes: &[RawEmote]) -> String {
        for emote in emotes {
            if emote.is_custom_emoji || emote.shortcuts.is_empty() {
                continue;
            }
            let Some(utf_id) = emote.id.as_deref() else {
                continue;
            };
            if utf_id.is_empty() {
                continue;
            }
            for shortcut in &emote.shortcuts {
                if !shortcut.is_empty() && text.contains(shortcut.as_str()) {
                    text = text.replace(shortcut.as_str(), utf_id);
                }
            }
        }
        text
    }
}

impl fmt::Display for ChatTranscript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Chat Transcript")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Messages: {}", self.messages.len())?;
        Ok(())
    }
}
