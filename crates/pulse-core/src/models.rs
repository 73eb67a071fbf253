use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the message CSV, e.g. `2019/03/18`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Sentinel course-filter value matching every record.
pub const OVERALL: &str = "overall";

/// A single message row read from `messages.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Channel id the message was posted in (matches `ChannelInfo::folder_name`).
    pub course: String,
    /// Module (curriculum time block) the channel belongs to.
    pub module: String,
    /// Calendar day the message was posted.
    pub date: NaiveDate,
    /// Number of reactions attached to the message.
    pub reaction_count: u64,
    /// Constant-1 row counter injected at load time; summing it counts rows.
    pub message_count: u64,
}

/// A channel metadata row read from `channels_labeled.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Module id the channel is filed under.
    pub folder: String,
    /// Channel id as it appears in [`MessageRecord::course`].
    pub folder_name: String,
    /// Human-readable display name.
    pub actual_name: String,
}

/// Which dimension the module/channel tab groups reactions by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Module,
    Channel,
}

// ── ChannelDirectory ──────────────────────────────────────────────────────────

/// Read-only lookup table over the channel metadata.
///
/// Loaded once at startup and never mutated. Lookups that miss resolve to an
/// explicit empty string rather than an error, so channels without metadata
/// simply render without a description.
#[derive(Debug, Clone, Default)]
pub struct ChannelDirectory {
    channels: Vec<ChannelInfo>,
}

impl ChannelDirectory {
    pub fn new(channels: Vec<ChannelInfo>) -> Self {
        Self { channels }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Distinct display names of the channels filed under `module`, in
    /// first-appearance order. Empty when the module has no entry.
    pub fn display_names_for_module(&self, module: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for ch in self.channels.iter().filter(|c| c.folder == module) {
            if !names.iter().any(|n| n == &ch.actual_name) {
                names.push(ch.actual_name.clone());
            }
        }
        names
    }

    /// Display name for a channel id, if the directory knows it.
    pub fn display_name(&self, folder_name: &str) -> Option<&str> {
        self.channels
            .iter()
            .find(|c| c.folder_name == folder_name)
            .map(|c| c.actual_name.as_str())
    }

    /// Display name for a channel id, falling back to the empty string.
    pub fn display_name_or_empty(&self, folder_name: &str) -> &str {
        self.display_name(folder_name).unwrap_or("")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
