use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::grouping::NumberCollector;

/// One token of the document scanner's output, in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanEvent {
    /// Unrelated content between numbers
    Boundary,
    /// A number, linked when `url` is non-empty
    Number {
        value: i32,
        #[serde(default)]
        url: String,
    },
}

impl ScanEvent {
    pub fn plain(value: i32) -> Self {
        ScanEvent::Number {
            value,
            url: String::new(),
        }
    }

    pub fn link(value: i32, url: impl Into<String>) -> Self {
        ScanEvent::Number {
            value,
            url: url.into(),
        }
    }
}

/// Replay scanner events into a collector.
///
/// Numbers outside `0..=config.max_page_number` cannot be page numbers and
/// break the current run like any other unrelated content.
pub fn feed_events<C: NumberCollector>(events: &[ScanEvent], collector: &mut C, config: &DetectorConfig) {
    for event in events {
        match event {
            ScanEvent::Boundary => collector.add_group(),
            ScanEvent::Number { value, url } => {
                if (0..=config.max_page_number).contains(value) {
                    collector.add_number(*value, url);
                } else {
                    ::log::trace!("Number {} is out of page range, closing group", value);
                    collector.add_group();
                }
            }
        }
    }
}
