//! Selection handling for Slack Pulse.
//!
//! Owns the read-only dataset, precomputes the default charts, and re-runs
//! the aggregation pipeline whenever a selector input changes.

pub mod callbacks;
pub mod dashboard;

pub use pulse_core as core;
pub use pulse_data as data;
