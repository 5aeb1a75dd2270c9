#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::DetectorConfig;
use crate::error::Result;
use crate::evaluate::{PageLinkInfo, evaluate};
use crate::filter::PageParamFilter;
use crate::grouping::{Group, NumberSequenceGrouper};
use crate::pattern::{PagePattern, extract_candidates};
use crate::results::{PageInfo, PaginationResult};
use crate::scan::{ScanEvent, feed_events};
use crate::url_view::UrlView;

/// A page pattern with the outlinks of one group that produced it
struct Candidate {
    pattern: PagePattern,
    links: Vec<PageLinkInfo>,
}

/// Detects whether a document is one page of a paginated article
#[derive(Debug, Clone, Default)]
pub struct PaginationDetector {
    config: DetectorConfig,
    filter: PageParamFilter,
}

impl PaginationDetector {
    /// Create a detector from a configuration
    pub fn new(config: DetectorConfig) -> Self {
        let filter = PageParamFilter::from_config(&config);
        Self { config, filter }
    }

    /// Set the maximum number of distinct paging outlinks
    pub fn with_max_paging_docs(mut self, max_paging_docs: usize) -> Self {
        self.config.max_paging_docs = max_paging_docs;
        self
    }

    /// Set the largest number the event feeder accepts as a page number
    pub fn with_max_page_number(mut self, max_page_number: i32) -> Self {
        self.config.max_page_number = max_page_number;
        self
    }

    /// Add names to the bad page parameter denylist
    pub fn with_bad_param_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_bad_param_names.extend(names.into_iter().map(Into::into));
        self.filter = PageParamFilter::from_config(&self.config);
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = DetectorConfig::from_file(path)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Group the scanner's events and detect pagination in one go
    pub fn detect_events(&self, events: &[ScanEvent], doc_url: &str) -> PaginationResult {
        let mut grouper = NumberSequenceGrouper::new();
        feed_events(events, &mut grouper, &self.config);
        self.detect(grouper.groups(), doc_url)
    }

    /// Detect pagination from the monotonic groups of numbers found in the
    /// document at `doc_url`.
    ///
    /// Each group with at least two numbers is searched for the page pattern
    /// its outlinks share; the best result over all groups wins, ties going
    /// to the earlier group. Anything inconclusive yields an unset result.
    pub fn detect<'a, I>(&self, groups: I, doc_url: &str) -> PaginationResult
    where
        I: IntoIterator<Item = &'a Group>,
    {
        let doc_url = strip_trailing_slash(doc_url);
        let doc = match UrlView::parse(doc_url) {
            Ok(doc) => doc,
            Err(e) => {
                ::log::debug!("Cannot detect pagination: {}", e);
                return PaginationResult::unset();
            }
        };

        let groups: Vec<Vec<PageInfo>> = groups.into_iter().map(|group| clean_pages(group.ascending())).collect();
        let paging_links: HashSet<&PageInfo> = groups
            .iter()
            .flatten()
            .filter(|page| !page.is_plain() && is_same_host(&page.url, &doc))
            .collect();
        if paging_links.len() > self.config.max_paging_docs {
            ::log::debug!(
                "Too many paging links ({} > {}) on {}",
                paging_links.len(),
                self.config.max_paging_docs,
                doc_url
            );
            return PaginationResult::unset();
        }

        let mut best: Option<(PaginationResult, Vec<PageInfo>)> = None;
        for ascending in groups.into_iter().filter(|pages| pages.len() >= 2) {
            let Some(result) = self.detect_in_group(&ascending, &doc, doc_url) else {
                continue;
            };
            if best.as_ref().is_none_or(|(current, _)| result.beats(current)) {
                best = Some((result, ascending));
            }
        }

        let Some((mut result, ascending)) = best else {
            ::log::debug!("No pagination detected for {}", doc_url);
            return PaginationResult::unset();
        };

        if result.can_insert_first_page(doc_url, &ascending) {
            result.insert_first_page(doc_url);
        }
        result.determine_next_paging_url(doc_url);

        ::log::debug!(
            "Detected {} pages for {} with pattern {}",
            result.pages.len(),
            doc_url,
            result.page_pattern
        );
        result
    }

    /// Best result among the page patterns of one ascending group
    fn detect_in_group(&self, ascending: &[PageInfo], doc: &UrlView, doc_url: &str) -> Option<PaginationResult> {
        // A plain "1" is the current document
        let first_page_url = ascending
            .iter()
            .find(|page| page.page_num == 1)
            .map_or("", |page| if page.is_plain() { doc_url } else { page.url.as_str() });

        let mut best: Option<PaginationResult> = None;
        for candidate in self.collect_candidates(ascending, doc) {
            if !candidate.pattern.is_valid_for(doc) {
                ::log::debug!("Pattern {} is not valid for {}", candidate.pattern, doc_url);
                continue;
            }
            let Some(result) = evaluate(&candidate.pattern, &candidate.links, ascending, first_page_url) else {
                continue;
            };
            if best.as_ref().is_none_or(|current| result.beats(current)) {
                best = Some(result);
            }
        }
        best
    }

    /// Extract the page patterns of every outlink in the group that stays
    /// on the document's host, merging identical patterns in the order they
    /// are first seen.
    fn collect_candidates(&self, ascending: &[PageInfo], doc: &UrlView) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut by_pattern: HashMap<String, usize> = HashMap::new();

        for (pos, page) in ascending.iter().enumerate() {
            if page.is_plain() {
                continue;
            }
            let mut url = match UrlView::parse(&page.url) {
                Ok(url) => url,
                Err(e) => {
                    ::log::trace!("Skipping page link: {}", e);
                    continue;
                }
            };
            if !url.host().eq_ignore_ascii_case(&doc.host()) {
                ::log::trace!("Skipping page link to another host: {}", page.url);
                continue;
            }
            if let Err(e) = url.strip_for_matching() {
                ::log::trace!("Skipping page link: {}", e);
                continue;
            }

            for pattern in extract_candidates(&url, &self.filter) {
                let link = PageLinkInfo::new(page.page_num, pattern.page_param_value(), pos);
                match by_pattern.get(pattern.as_str()) {
                    Some(&index) => candidates[index].links.push(link),
                    None => {
                        by_pattern.insert(pattern.as_str().to_string(), candidates.len());
                        candidates.push(Candidate {
                            pattern,
                            links: vec![link],
                        });
                    }
                }
            }
        }
        candidates
    }
}

/// Drop one trailing '/', so "/foo/2/" and "/foo/2" are the same page
fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

fn clean_pages(pages: Vec<PageInfo>) -> Vec<PageInfo> {
    pages
        .into_iter()
        .map(|page| {
            let url = strip_trailing_slash(&page.url).to_string();
            PageInfo::new(page.page_num, url)
        })
        .collect()
}

/// Whether `url` parses and points at the document's host
fn is_same_host(url: &str, doc: &UrlView) -> bool {
    UrlView::parse(url).is_ok_and(|url| url.host().eq_ignore_ascii_case(&doc.host()))
}
