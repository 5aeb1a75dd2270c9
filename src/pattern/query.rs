use std::sync::LazyLock;

use regex::Regex;

use crate::filter::PageParamFilter;
use crate::url_view::UrlView;
use crate::utils::{is_plain_number, to_number};

use super::PAGE_PARAM_PLACEHOLDER;

/// What may replace the whole `?name=value` segment of a first page: a
/// trailing slash or an `.htm(l)` extension.
static FIRST_PAGE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/|\.html?$").expect("first page regex should be valid"));

/// A page pattern whose page parameter is a query value, e.g.
/// `http://host/a/b?page=[*!]&sort=d`.
#[derive(Debug, Clone)]
pub struct QueryParamPattern {
    url: UrlView,
    pattern: String,
    page_param_value: i32,
    placeholder_start: usize,
    /// Offset of the `?` or `&` opening the page parameter
    segment_start: usize,
    /// Length of everything after the placeholder, including its leading `&`
    suffix_len: usize,
}

impl QueryParamPattern {
    /// Abstract the value of query parameter `name`. Returns `None` unless the
    /// value is a plain number and the name is not on the denylist.
    pub fn new(url: &UrlView, filter: &PageParamFilter, name: &str, value: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        let page_param_value = to_number(value)?;
        if filter.is_bad_name(name) {
            ::log::trace!("Skipping bad page param name '{}' in {}", name, url);
            return None;
        }

        let pattern = url.replace_query_value(name, value, PAGE_PARAM_PLACEHOLDER);
        let placeholder_start = pattern.find(PAGE_PARAM_PLACEHOLDER)?;
        let query_start = pattern[..placeholder_start].rfind('?')?;
        let segment_start = pattern[query_start..placeholder_start]
            .rfind('&')
            .map_or(query_start, |pos| query_start + pos);
        let suffix_len = pattern.len() - placeholder_start - PAGE_PARAM_PLACEHOLDER.len();

        Some(Self {
            url: url.clone(),
            pattern,
            page_param_value,
            placeholder_start,
            segment_start,
            suffix_len,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn page_param_value(&self) -> i32 {
        self.page_param_value
    }

    fn prefix(&self) -> &str {
        &self.pattern[..self.segment_start]
    }

    /// Parameters after the page parameter, without the `&` joining them
    fn suffix(&self) -> &str {
        if self.suffix_len == 0 {
            ""
        } else {
            &self.pattern[self.pattern.len() - self.suffix_len + 1..]
        }
    }

    /// Valid when the document has the same path, ignoring case.
    pub fn is_valid_for(&self, doc_url: &UrlView) -> bool {
        self.url.trimmed_path().eq_ignore_ascii_case(doc_url.trimmed_path())
    }

    /// `url` matches when it has the same parameters around the page
    /// parameter and a plain number for its value, or leaves the page
    /// parameter out entirely.
    pub fn is_paging_url(&self, url: &str) -> bool {
        if self.suffix_len > 0 && !url.ends_with(self.suffix()) {
            return false;
        }
        let Some(suffix_start) = url.len().checked_sub(self.suffix_len) else {
            return false;
        };
        if !url.starts_with(self.prefix()) {
            return false;
        }

        // Page parameter left out
        if self.segment_start == suffix_start {
            return true;
        }
        let Some(segment) = url.get(self.segment_start..suffix_start) else {
            return false;
        };
        if FIRST_PAGE_TAIL.is_match(segment) {
            return true;
        }

        let name_part = self.segment_start..self.placeholder_start;
        if url.as_bytes().get(name_part.clone()) != Some(&self.pattern.as_bytes()[name_part]) {
            return false;
        }
        url.get(self.placeholder_start..suffix_start).is_some_and(is_plain_number)
    }
}
