mod query_pattern_tests;

use crate::filter::PageParamFilter;
use crate::pattern::{PAGE_PARAM_PLACEHOLDER, PathComponentPattern, QueryParamPattern};
use crate::url_view::UrlView;

/// Build a path pattern from a pattern string such as `http://a.com/p/[*!]`
fn path_pattern(pattern: &str) -> PathComponentPattern {
    let start = pattern.find(PAGE_PARAM_PLACEHOLDER).unwrap();
    let url = UrlView::parse(&pattern.replace(PAGE_PARAM_PLACEHOLDER, "8")).unwrap();
    PathComponentPattern::new(&url, &PageParamFilter::default(), start, start + 1).unwrap()
}

/// Build a query pattern for parameter `name` from a pattern string such as `http://a.com/p?page=[*!]`
fn query_pattern(pattern: &str, name: &str) -> QueryParamPattern {
    let url = UrlView::parse(&pattern.replace(PAGE_PARAM_PLACEHOLDER, "8")).unwrap();
    QueryParamPattern::new(&url, &PageParamFilter::default(), name, "8").unwrap()
}
