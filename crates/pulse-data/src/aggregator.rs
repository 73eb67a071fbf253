//! Group-by-sum aggregation over message records.
//!
//! A pure, total function over its inputs: no I/O, no mutation of shared
//! state. Unknown filter values yield empty output rather than errors.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use pulse_core::formatting::format_count;
use pulse_core::models::{ChannelDirectory, GroupBy, MessageRecord, DATE_FORMAT, OVERALL};
use pulse_core::palette;

// ── Grouping and filtering ────────────────────────────────────────────────────

/// Dimension to partition records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Module,
    Channel,
    Date,
}

impl From<GroupBy> for GroupKey {
    fn from(value: GroupBy) -> Self {
        match value {
            GroupBy::Module => GroupKey::Module,
            GroupBy::Channel => GroupKey::Channel,
        }
    }
}

/// Optional course predicate applied before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseFilter {
    /// Match every record.
    Overall,
    /// Match records whose course equals the given channel id.
    Course(String),
}

impl CourseFilter {
    /// Build a filter from a selector value (`overall` or a channel id).
    pub fn from_value(value: &str) -> Self {
        if value == OVERALL {
            CourseFilter::Overall
        } else {
            CourseFilter::Course(value.to_string())
        }
    }

    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            CourseFilter::Overall => true,
            CourseFilter::Course(course) => record.course == *course,
        }
    }
}

// ── AggregateRow ──────────────────────────────────────────────────────────────

/// A summed view of the records sharing one grouping key, plus the
/// presentation fields derived for that dimension.
///
/// Ephemeral: rebuilt on every chart request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    /// Module id, channel id, or `%Y/%m/%d` date string.
    pub key: String,
    /// The key as a typed date, set only for date grouping.
    pub date: Option<NaiveDate>,
    pub reaction_count: u64,
    pub message_count: u64,
    /// Multi-line descriptive text for the key's bar or point.
    pub hover_text: String,
    /// Bar fill (hex string), set only for channel grouping.
    pub color: Option<String>,
    /// Day name (e.g. `Monday`), set only for date grouping.
    pub day_of_week: Option<String>,
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Stateless helper that groups message records by one dimension.
pub struct Aggregator;

impl Aggregator {
    /// Partition `records` matching `filter` by `group_key` and sum the
    /// reaction and message counters per partition.
    ///
    /// Module and channel output is sorted ascending by summed reaction
    /// count (stable; ties keep key order). Date output is sorted ascending
    /// by date. A key with no matching records produces no row.
    pub fn aggregate(
        records: &[MessageRecord],
        channels: &ChannelDirectory,
        group_key: GroupKey,
        filter: &CourseFilter,
    ) -> Vec<AggregateRow> {
        match group_key {
            GroupKey::Module => Self::aggregate_modules(records, channels, filter),
            GroupKey::Channel => Self::aggregate_channels(records, filter),
            GroupKey::Date => Self::aggregate_dates(records, filter),
        }
    }

    /// Ungrouped `(reactions, messages)` sums over the matching records.
    pub fn totals(records: &[MessageRecord], filter: &CourseFilter) -> (u64, u64) {
        records
            .iter()
            .filter(|r| filter.matches(r))
            .fold((0, 0), |(reactions, messages), r| {
                (reactions + r.reaction_count, messages + r.message_count)
            })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn aggregate_modules(
        records: &[MessageRecord],
        channels: &ChannelDirectory,
        filter: &CourseFilter,
    ) -> Vec<AggregateRow> {
        let sums = Self::sum_by(records, filter, |r| r.module.clone());

        let mut rows: Vec<AggregateRow> = sums
            .into_iter()
            .map(|(key, sums)| {
                let mut hover = format!("Reactions: {}\n\nChannels:\n", format_count(sums.reactions));
                for name in channels.display_names_for_module(&key) {
                    hover.push_str(&format!("- {}\n", name));
                }
                AggregateRow {
                    key,
                    date: None,
                    reaction_count: sums.reactions,
                    message_count: sums.messages,
                    hover_text: hover,
                    color: None,
                    day_of_week: None,
                }
            })
            .collect();

        rows.sort_by_key(|r| r.reaction_count);
        rows
    }

    fn aggregate_channels(records: &[MessageRecord], filter: &CourseFilter) -> Vec<AggregateRow> {
        let sums = Self::sum_by(records, filter, |r| r.course.clone());

        let mut rows: Vec<AggregateRow> = sums
            .into_iter()
            .map(|(key, sums)| {
                // The channel's module is taken from its first record.
                let module = records
                    .iter()
                    .find(|r| r.course == key)
                    .map(|r| r.module.as_str())
                    .unwrap_or("");

                let mut hover = format!(
                    "Channel: {}\nModule: {}\nReactions: {}",
                    key,
                    module,
                    format_count(sums.reactions)
                );
                if palette::is_cat_themed(&hover) {
                    hover = format!("😻😻😻\n{}", hover);
                }
                if palette::is_dog_themed(&hover) {
                    hover = format!("🐶🐶🐶\n{}", hover);
                }

                let color = palette::channel_color(&key).to_string();
                AggregateRow {
                    key,
                    date: None,
                    reaction_count: sums.reactions,
                    message_count: sums.messages,
                    hover_text: hover,
                    color: Some(color),
                    day_of_week: None,
                }
            })
            .collect();

        rows.sort_by_key(|r| r.reaction_count);
        rows
    }

    fn aggregate_dates(records: &[MessageRecord], filter: &CourseFilter) -> Vec<AggregateRow> {
        let mut sums: BTreeMap<NaiveDate, Sums> = BTreeMap::new();
        for record in records.iter().filter(|r| filter.matches(r)) {
            sums.entry(record.date).or_default().add(record);
        }

        // BTreeMap iteration yields ascending dates.
        sums.into_iter()
            .map(|(date, sums)| {
                let key = date.format(DATE_FORMAT).to_string();
                let dow = date.format("%A").to_string();
                let hover = format!("Reactions: {}\nDate: {}\ndow: {}", sums.reactions, key, dow);
                AggregateRow {
                    key,
                    date: Some(date),
                    reaction_count: sums.reactions,
                    message_count: sums.messages,
                    hover_text: hover,
                    color: None,
                    day_of_week: Some(dow),
                }
            })
            .collect()
    }

    /// Sum counters per string key over the matching records.
    fn sum_by(
        records: &[MessageRecord],
        filter: &CourseFilter,
        key_fn: impl Fn(&MessageRecord) -> String,
    ) -> BTreeMap<String, Sums> {
        let mut map: BTreeMap<String, Sums> = BTreeMap::new();
        for record in records.iter().filter(|r| filter.matches(r)) {
            map.entry(key_fn(record)).or_default().add(record);
        }
        map
    }
}

/// Running reaction/message totals for one partition.
#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    reactions: u64,
    messages: u64,
}

impl Sums {
    fn add(&mut self, record: &MessageRecord) {
        self.reactions += record.reaction_count;
        self.messages += record.message_count;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
