//! CSV loading for Slack Pulse.
//!
//! Reads the two input files once at startup and converts them into
//! [`MessageRecord`] and [`ChannelInfo`] values for downstream aggregation.
//! Any malformed row is fatal; there is no partial dashboard.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use pulse_core::error::{PulseError, Result};
use pulse_core::models::{ChannelDirectory, ChannelInfo, MessageRecord, DATE_FORMAT, OVERALL};

/// Channel metadata file name inside the data directory.
pub const CHANNELS_FILE: &str = "channels_labeled.csv";
/// Message records file name inside the data directory.
pub const MESSAGES_FILE: &str = "messages.csv";

// ── CSV row shapes ────────────────────────────────────────────────────────────

/// Raw row shape of `messages.csv`.
#[derive(Debug, Deserialize)]
struct MessageRow {
    course: String,
    module: String,
    date: String,
    count_reactions: u64,
}

/// Raw row shape of `channels_labeled.csv`.
#[derive(Debug, Deserialize)]
struct ChannelRow {
    folder: String,
    folder_name: String,
    actual_name: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and parse the channel metadata file.
pub fn load_channels(path: &Path) -> Result<Vec<ChannelInfo>> {
    let mut reader = open_csv(path)?;
    let mut channels = Vec::new();
    for row in reader.deserialize() {
        let row: ChannelRow = row?;
        channels.push(ChannelInfo {
            folder: row.folder,
            folder_name: row.folder_name,
            actual_name: row.actual_name,
        });
    }
    debug!("Loaded {} channel rows from {}", channels.len(), path.display());
    Ok(channels)
}

/// Load and parse the message records file.
///
/// Dates must match `%Y/%m/%d`; `message_count` is injected as the constant 1
/// so that summing it counts rows.
pub fn load_messages(path: &Path) -> Result<Vec<MessageRecord>> {
    let mut reader = open_csv(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: MessageRow = row?;
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|_| PulseError::DateParse(row.date.clone()))?;
        records.push(MessageRecord {
            course: row.course,
            module: row.module,
            date,
            reaction_count: row.count_reactions,
            message_count: 1,
        });
    }
    debug!("Loaded {} message rows from {}", records.len(), path.display());
    Ok(records)
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// One option in the course-filter selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Display label (channel display name, empty when unknown).
    pub label: String,
    /// Filter value passed back on selection (channel id or `overall`).
    pub value: String,
}

/// The full in-memory dataset: message records plus channel directory.
///
/// Loaded once at process start and held read-only for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<MessageRecord>,
    pub channels: ChannelDirectory,
}

impl Dataset {
    /// Load both CSV files from `data_dir`.
    ///
    /// Fails fast on a missing directory, unreadable file, or malformed row.
    pub fn load(data_dir: &Path) -> Result<Self> {
        if !data_dir.is_dir() {
            return Err(PulseError::DataDirNotFound(data_dir.to_path_buf()));
        }

        let channels = load_channels(&data_dir.join(CHANNELS_FILE))?;
        let records = load_messages(&data_dir.join(MESSAGES_FILE))?;

        info!(
            "Loaded {} messages and {} channel entries from {}",
            records.len(),
            channels.len(),
            data_dir.display()
        );

        Ok(Self {
            records,
            channels: ChannelDirectory::new(channels),
        })
    }

    /// Course-filter options: `overall` first, then each distinct course in
    /// first-appearance order, labeled with its display name (empty string
    /// when the directory has no entry for it).
    pub fn selector_options(&self) -> Vec<SelectOption> {
        let mut options = vec![SelectOption {
            label: OVERALL.to_string(),
            value: OVERALL.to_string(),
        }];

        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if seen.contains(&record.course.as_str()) {
                continue;
            }
            seen.push(&record.course);
            options.push(SelectOption {
                label: self.channels.display_name_or_empty(&record.course).to_string(),
                value: record.course.clone(),
            });
        }

        options
    }

    /// Earliest and latest record dates, `None` on an empty dataset.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    let file = std::fs::File::open(path).map_err(|source| PulseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
