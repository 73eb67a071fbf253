//! Named-input callback registry.
//!
//! The reactive-callback mechanism of the original rendering framework,
//! reduced to its essentials: a handler is registered per named input and
//! invoked with the input's current value, returning a fresh chart
//! description. No framework vocabulary crosses this boundary.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use pulse_core::chart::ChartDescription;
use pulse_core::models::GroupBy;

use crate::dashboard::Dashboard;

/// Name of the tab-1 grouping selector input.
pub const GROUP_BY_INPUT: &str = "group-by";
/// Name of the tab-2 course-filter selector input.
pub const COURSES_INPUT: &str = "courses";

/// Current value of a selector input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    /// Single-select input (tab 1).
    Single(String),
    /// Multi-select input (tab 2).
    Multi(Vec<String>),
}

impl InputValue {
    /// The value as a slice of selections; a single value becomes a
    /// one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            InputValue::Single(v) => std::slice::from_ref(v),
            InputValue::Multi(vs) => vs,
        }
    }
}

/// Handler invoked with an input's current value.
pub type Handler = Box<dyn Fn(&InputValue) -> ChartDescription + Send + Sync>;

/// Registry mapping input names to their handlers.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<String, Handler>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for the input called `name`, replacing any
    /// previous handler for that name.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        self.handlers.insert(name.into(), handler);
    }

    /// Invoke the handler registered for `name` with `value`.
    ///
    /// Returns `None` (and logs) when no handler is registered.
    pub fn dispatch(&self, name: &str, value: &InputValue) -> Option<ChartDescription> {
        match self.handlers.get(name) {
            Some(handler) => Some(handler(value)),
            None => {
                warn!("no handler registered for input '{}'", name);
                None
            }
        }
    }

    /// Build the registry wired to the two dashboard inputs.
    pub fn for_dashboard(dashboard: Arc<Dashboard>) -> Self {
        let mut registry = Self::new();

        let group_dashboard = Arc::clone(&dashboard);
        registry.register(
            GROUP_BY_INPUT,
            Box::new(move |value: &InputValue| {
                let group_by = match value {
                    InputValue::Single(v) if v == "channel" => GroupBy::Channel,
                    _ => GroupBy::Module,
                };
                group_dashboard.on_group_by_changed(group_by)
            }),
        );

        registry.register(
            COURSES_INPUT,
            Box::new(move |value: &InputValue| dashboard.on_courses_changed(value.as_slice())),
        );

        registry
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::models::{ChannelDirectory, ChannelInfo, MessageRecord};
    use pulse_data::reader::Dataset;

    fn sample_registry() -> CallbackRegistry {
        let dataset = Dataset {
            records: vec![MessageRecord {
                course: "math101".to_string(),
                module: "mod1_summer".to_string(),
                date: NaiveDate::from_ymd_opt(2019, 7, 1).unwrap(),
                reaction_count: 3,
                message_count: 1,
            }],
            channels: ChannelDirectory::new(vec![ChannelInfo {
                folder: "mod1_summer".to_string(),
                folder_name: "math101".to_string(),
                actual_name: "Linear Algebra".to_string(),
            }]),
        };
        let dashboard = Arc::new(Dashboard::new(Arc::new(dataset), "MSDS"));
        CallbackRegistry::for_dashboard(dashboard)
    }

    #[test]
    fn test_dispatch_group_by_module() {
        let registry = sample_registry();
        let chart = registry
            .dispatch(GROUP_BY_INPUT, &InputValue::Single("module".to_string()))
            .unwrap();
        assert_eq!(chart.x_axis.title, "Module");
    }

    #[test]
    fn test_dispatch_group_by_channel() {
        let registry = sample_registry();
        let chart = registry
            .dispatch(GROUP_BY_INPUT, &InputValue::Single("channel".to_string()))
            .unwrap();
        assert_eq!(chart.x_axis.title, "Channels (Hover for description)");
    }

    #[test]
    fn test_dispatch_courses_multi() {
        let registry = sample_registry();
        let chart = registry
            .dispatch(
                COURSES_INPUT,
                &InputValue::Multi(vec!["overall".to_string(), "math101".to_string()]),
            )
            .unwrap();
        assert_eq!(chart.line_series().len(), 2);
    }

    #[test]
    fn test_dispatch_unknown_input_returns_none() {
        let registry = sample_registry();
        let result = registry.dispatch("volume", &InputValue::Single("11".to_string()));
        assert!(result.is_none());
    }

    #[test]
    fn test_input_value_as_slice() {
        let single = InputValue::Single("overall".to_string());
        assert_eq!(single.as_slice(), ["overall".to_string()]);

        let multi = InputValue::Multi(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(multi.as_slice().len(), 2);
    }
}
