//! Detects whether a web document is one page of a paginated article.
//!
//! A document scanner reports the numbers it meets in reading order, plain
//! or linked, through a [`NumberCollector`]. [`NumberSequenceGrouper`]
//! splits them into monotonic runs, and [`PaginationDetector`] looks for a
//! page pattern shared by the linked numbers of a run, yielding a
//! [`PaginationResult`] with the ordered pages, the formula mapping page
//! numbers to the URL's page parameter, and the next page's URL.

// Re-export modules
pub mod config;
pub mod detector;
pub mod error;
pub mod evaluate;
pub mod filter;
pub mod grouping;
pub mod pattern;
pub mod results;
pub mod scan;
pub mod url_view;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::DetectorConfig;
pub use detector::PaginationDetector;
pub use error::{PagingError, Result};
pub use grouping::{Group, NumberCollector, NumberSequenceGrouper};
pub use pattern::PagePattern;
pub use results::{Formula, PageInfo, PaginationResult, ParamType};
pub use scan::ScanEvent;
pub use url_view::UrlView;

/// Detect pagination with the default configuration
pub fn detect<'a, I>(groups: I, doc_url: &str) -> PaginationResult
where
    I: IntoIterator<Item = &'a Group>,
{
    PaginationDetector::default().detect(groups, doc_url)
}
