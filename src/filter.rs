use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::DetectorConfig;

/// Names that conventionally precede content identifiers rather than page
/// numbers, whether as a query parameter or as the path component before a
/// numeric one.
pub const BAD_PAGE_PARAM_NAMES: &[&str] = &[
    "baixar-gratis",
    "category",
    "content",
    "day",
    "date",
    "definition",
    "etiket",
    "film-seyret",
    "key",
    "keys",
    "keyword",
    "label",
    "news",
    "q",
    "query",
    "rating",
    "s",
    "search",
    "seasons",
    "search_keyword",
    "search_query",
    "sortby",
    "subscriptions",
    "tag",
    "tags",
    "video",
    "videos",
    "w",
    "wiki",
];

/// What may follow a numeric path component for it to still count as the last one
static HTML_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\.s?html?)?$").expect("extension regex should be valid"));

/// Filter rejecting numbers that look like identifiers instead of page parameters
#[derive(Debug, Clone)]
pub struct PageParamFilter {
    bad_names: HashSet<String>,
}

impl Default for PageParamFilter {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl PageParamFilter {
    /// Create a filter from the built-in denylist plus `extra_names`
    pub fn new<I, S>(extra_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bad_names: HashSet<String> =
            BAD_PAGE_PARAM_NAMES.iter().map(|name| name.to_string()).collect();
        bad_names.extend(extra_names.into_iter().map(|name| name.as_ref().to_ascii_lowercase()));
        Self { bad_names }
    }

    /// Create a filter with the extra names of a detector configuration
    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(&config.extra_bad_param_names)
    }

    /// Case-insensitive denylist lookup
    pub fn is_bad_name(&self, name: &str) -> bool {
        self.bad_names.contains(&name.to_ascii_lowercase())
    }

    /// Check whether the digits at `digit_start..digit_end` of `path` form a
    /// whole last path component (optionally with an `.htm`, `.html` or
    /// `.shtml` extension) that follows a denylisted component, as in
    /// `/wiki/2.html`. The first path component is never bad.
    pub fn is_bad_numeric_component(&self, path: &str, digit_start: usize, digit_end: usize) -> bool {
        // Digits must start a component that is not the first one
        if digit_start < 2 || path.as_bytes().get(digit_start - 1) != Some(&b'/') {
            return false;
        }

        let Some(rest) = path.get(digit_end..) else {
            return false;
        };
        if !HTML_EXTENSION.is_match(rest) {
            return false;
        }

        let Some(before) = path.get(1..digit_start - 1) else {
            return false;
        };
        let previous = before.rsplit('/').next().unwrap_or_default();
        let bad = self.is_bad_name(previous);
        if bad {
            ::log::trace!("Numeric component after '{}' looks like an identifier: {}", previous, path);
        }
        bad
    }
}
