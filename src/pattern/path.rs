use crate::filter::PageParamFilter;
use crate::url_view::UrlView;
use crate::utils::{common_prefix_len, common_suffix_len, is_plain_number, to_number};

use super::PAGE_PARAM_PLACEHOLDER;

/// Characters that may join a page number to the text before it, as in `abc-2.html`
const PAGE_NUMBER_SEPARATORS: &[u8] = b"-_;,";

/// A page pattern whose page parameter sits in the path, e.g.
/// `http://host/a/page/[*!]/abc.html`.
///
/// Offsets index the pattern string. `segment_start` is the `/` that opens
/// the component holding the placeholder; the prefix is everything before
/// it and the suffix everything after the placeholder.
#[derive(Debug, Clone)]
pub struct PathComponentPattern {
    url: UrlView,
    page_param_value: i32,
    path_start: usize,
    placeholder_start: usize,
    segment_start: usize,
    param_index: usize,
}

impl PathComponentPattern {
    /// Abstract the digits at `digit_start..digit_end` of `url`'s serialized
    /// form. Returns `None` when they are not a usable page parameter.
    pub fn new(url: &UrlView, filter: &PageParamFilter, digit_start: usize, digit_end: usize) -> Option<Self> {
        let href = url.as_str();
        let path_start = url.path_start();
        if digit_start < path_start {
            return None;
        }
        let page_param_value = to_number(href.get(digit_start..digit_end)?)?;

        if filter.is_bad_numeric_component(url.path(), digit_start - path_start, digit_end - path_start) {
            return None;
        }

        let pattern = format!("{}{}{}", &href[..digit_start], PAGE_PARAM_PLACEHOLDER, &href[digit_end..]);
        let url = UrlView::parse(&pattern).ok()?;

        let pattern = url.as_str();
        let placeholder_start = pattern.find(PAGE_PARAM_PLACEHOLDER)?;
        let segment_start = pattern[..placeholder_start].rfind('/')?;
        let path_start = url.path_start();
        if segment_start < path_start {
            return None;
        }
        let param_index = url
            .path_components()
            .iter()
            .position(|component| component.contains(PAGE_PARAM_PLACEHOLDER))?;

        Some(Self {
            page_param_value,
            path_start,
            placeholder_start,
            segment_start,
            param_index,
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn page_param_value(&self) -> i32 {
        self.page_param_value
    }

    fn prefix(&self) -> &str {
        &self.as_str()[..self.segment_start]
    }

    fn suffix(&self) -> &str {
        &self.as_str()[self.placeholder_start + PAGE_PARAM_PLACEHOLDER.len()..]
    }

    fn at_start_of_component(&self) -> bool {
        self.segment_start + 1 == self.placeholder_start
    }

    /// The document URL must share every path component with the pattern,
    /// apart from the placeholder's, and must not look like a calendar.
    pub fn is_valid_for(&self, doc_url: &UrlView) -> bool {
        let doc_components = doc_url.path_components();
        let components = self.url.path_components();
        if doc_components.len() > components.len() {
            return false;
        }

        // With a single component each, e.g. `forum-12` and `forum-12-[*!]`,
        // the two must mostly overlap.
        if doc_components.len() == 1 && components.len() == 1 {
            let doc_component = doc_components[0].as_bytes();
            let component = components[0].as_bytes();
            let prefix = common_prefix_len(doc_component, component);
            let suffix = common_suffix_len(doc_component, component, prefix);
            return (prefix + suffix) * 2 >= doc_component.len();
        }

        if !self.has_same_path_components(&doc_components, &components) {
            return false;
        }

        !self.is_calendar_page(&components)
    }

    fn has_same_path_components(&self, doc_components: &[&str], components: &[&str]) -> bool {
        let mut i = 0;
        let mut j = 0;
        let mut passed_param = false;
        while i < doc_components.len() && j < components.len() {
            if i == self.param_index && !passed_param {
                passed_param = true;
                // The document may omit the page component altogether
                if doc_components.len() < components.len() {
                    j += 1;
                    continue;
                }
            } else if !doc_components[i].eq_ignore_ascii_case(components[j]) {
                return false;
            }
            i += 1;
            j += 1;
        }
        true
    }

    /// `.../2012/01/[*!]`: the placeholder is a day of a year/month archive.
    fn is_calendar_page(&self, components: &[&str]) -> bool {
        if self.param_index < 2 || components[self.param_index] != PAGE_PARAM_PLACEHOLDER {
            return false;
        }

        let is_month = to_number(components[self.param_index - 1]).is_some_and(|month| (1..=12).contains(&month));
        let is_year = to_number(components[self.param_index - 2]).is_some_and(|year| year > 1970 && year < 3000);
        if is_month && is_year {
            ::log::debug!("Rejecting calendar-like pattern {}", self.as_str());
        }
        is_month && is_year
    }

    /// `url` matches when it differs from the pattern only in the page
    /// number, or leaves out the number (and its component or separator).
    pub fn is_paging_url(&self, url: &str) -> bool {
        let suffix = self.suffix();
        if !suffix.is_empty() && !url.ends_with(suffix) {
            return false;
        }
        if self.at_start_of_component() {
            self.is_paging_url_at_component_start(url)
        } else {
            self.is_paging_url_inside_component(url)
        }
    }

    fn is_paging_url_at_component_start(&self, url: &str) -> bool {
        let url_bytes = url.as_bytes();
        let pattern = self.as_str().as_bytes();
        let suffix_len = self.suffix().len();
        let Some(suffix_start) = url.len().checked_sub(suffix_len) else {
            return false;
        };

        // Whole page component left out, e.g. `/a/abc.html` for `/a/[*!]/abc.html`,
        // or the parent of a `/page/[*!]` pair
        if let Some(pos) = self.as_str()[self.path_start..self.segment_start].rfind('/') {
            let prev_component = self.path_start + pos;
            if prev_component + suffix_len == url.len() {
                return url_bytes[..prev_component] == pattern[..prev_component];
            }
        }

        if !url.starts_with(self.prefix()) {
            return false;
        }
        let accepted_len = self.segment_start + suffix_len;
        if accepted_len == url.len() {
            return true;
        }
        if accepted_len > url.len() || url_bytes[self.segment_start] != b'/' {
            return false;
        }
        url.get(self.segment_start + 1..suffix_start).is_some_and(is_plain_number)
    }

    fn is_paging_url_inside_component(&self, url: &str) -> bool {
        if !url.starts_with(self.prefix()) {
            return false;
        }
        let url_bytes = url.as_bytes();
        let pattern = self.as_str().as_bytes();
        let Some(suffix_start) = url.len().checked_sub(self.suffix().len()) else {
            return false;
        };

        let end = self.placeholder_start.min(suffix_start);
        let first_diff = (self.segment_start..end)
            .find(|&i| url_bytes[i] != pattern[i])
            .unwrap_or(end);

        if first_diff == suffix_start {
            // Number and its separator left out, e.g. `abc.html` for `abc-[*!].html`
            first_diff + 1 == self.placeholder_start && PAGE_NUMBER_SEPARATORS.contains(&pattern[first_diff])
        } else if first_diff == self.placeholder_start {
            url.get(first_diff..suffix_start).is_some_and(is_plain_number)
        } else {
            false
        }
    }
}
