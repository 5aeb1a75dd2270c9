pub mod path;
pub mod query;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::filter::PageParamFilter;
use crate::url_view::UrlView;

pub use path::PathComponentPattern;
pub use query::QueryParamPattern;

/// Stands in for the page parameter inside a pattern string
pub const PAGE_PARAM_PLACEHOLDER: &str = "[*!]";

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digit regex should be valid"));

/// A URL with one numeric token abstracted out
#[derive(Debug, Clone)]
pub enum PagePattern {
    /// The number is (part of) a path component, e.g. `/article/[*!].html`
    PathComponent(PathComponentPattern),
    /// The number is a query parameter value, e.g. `/article?page=[*!]`
    QueryParam(QueryParamPattern),
}

impl PagePattern {
    /// The pattern string, unique per pattern
    pub fn as_str(&self) -> &str {
        match self {
            PagePattern::PathComponent(pattern) => pattern.as_str(),
            PagePattern::QueryParam(pattern) => pattern.as_str(),
        }
    }

    /// The value the abstracted token had in the URL the pattern came from
    pub fn page_param_value(&self) -> i32 {
        match self {
            PagePattern::PathComponent(pattern) => pattern.page_param_value(),
            PagePattern::QueryParam(pattern) => pattern.page_param_value(),
        }
    }

    /// Whether the pattern is consistent with the document's own URL
    pub fn is_valid_for(&self, doc_url: &UrlView) -> bool {
        match self {
            PagePattern::PathComponent(pattern) => pattern.is_valid_for(doc_url),
            PagePattern::QueryParam(pattern) => pattern.is_valid_for(doc_url),
        }
    }

    /// Whether `url` is structurally a page of this pattern, whatever its page value
    pub fn is_paging_url(&self, url: &str) -> bool {
        match self {
            PagePattern::PathComponent(pattern) => pattern.is_paging_url(url),
            PagePattern::QueryParam(pattern) => pattern.is_paging_url(url),
        }
    }
}

impl fmt::Display for PagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build every page pattern candidate a URL offers: one per numeric query
/// parameter, then one per digit run in the path.
pub fn extract_candidates(url: &UrlView, filter: &PageParamFilter) -> Vec<PagePattern> {
    let mut candidates = Vec::new();

    for (name, value) in url.query_params() {
        if let Some(pattern) = QueryParamPattern::new(url, filter, name, value) {
            candidates.push(PagePattern::QueryParam(pattern));
        }
    }

    let path_start = url.path_start();
    for digits in DIGITS.find_iter(url.path()) {
        let start = path_start + digits.start();
        let end = path_start + digits.end();
        if let Some(pattern) = PathComponentPattern::new(url, filter, start, end) {
            candidates.push(PagePattern::PathComponent(pattern));
        }
    }

    ::log::trace!("{} page pattern candidates from {}", candidates.len(), url);
    candidates
}
