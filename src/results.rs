use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A page number paired with the URL it links to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number as shown in the document
    pub page_num: i32,

    /// Target URL, empty for a plain-text number
    pub url: String,
}

impl PageInfo {
    /// Create a new page info
    pub fn new(page_num: i32, url: impl Into<String>) -> Self {
        Self {
            page_num,
            url: url.into(),
        }
    }

    /// A number shown without a link
    pub fn plain(page_num: i32) -> Self {
        Self::new(page_num, "")
    }

    pub fn is_plain(&self) -> bool {
        self.url.is_empty()
    }
}

/// Linear map from page number to the value carried by the URL:
/// `param_value = coefficient * page_num + delta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub coefficient: i32,
    pub delta: i32,
}

impl Formula {
    pub fn new(coefficient: i32, delta: i32) -> Self {
        Self { coefficient, delta }
    }

    /// Parameter value the formula predicts for a page number, `None` if
    /// it does not fit in an `i32`
    pub fn param_value(&self, page_num: i32) -> Option<i32> {
        self.coefficient.checked_mul(page_num)?.checked_add(self.delta)
    }

    /// A unit step means the URL counts pages; any other step means it counts items.
    pub fn implied_type(&self) -> ParamType {
        if self.coefficient.unsigned_abs() == 1 {
            ParamType::PageNumber
        } else {
            ParamType::PageSize
        }
    }
}

/// What the detected page parameter counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamType {
    /// Nothing detected
    #[default]
    Unset,
    PageNumber,
    PageSize,
}

/// Outcome of pagination detection for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult {
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// The winning URL pattern, with the page parameter replaced by a placeholder
    pub page_pattern: String,

    /// Pages in ascending page-number order
    pub pages: Vec<PageInfo>,

    pub formula: Option<Formula>,

    /// URL of the page after the current document, empty if unknown
    pub next_paging_url: String,
}

impl PaginationResult {
    /// The "nothing detected" result
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_detected(&self) -> bool {
        self.param_type != ParamType::Unset
    }

    /// Rank two candidate results for the same document.
    ///
    /// A fitted formula beats none. Between two formulas, page-number
    /// semantics beat page-size semantics, and with equal coefficients the
    /// smaller delta wins. Otherwise a page-number type wins.
    pub fn rank_against(&self, other: &Self) -> Ordering {
        match (&self.formula, &other.formula) {
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(ours), Some(theirs)) => {
                let ours_is_page_number = ours.implied_type() == ParamType::PageNumber;
                let theirs_is_page_number = theirs.implied_type() == ParamType::PageNumber;
                match ours_is_page_number.cmp(&theirs_is_page_number) {
                    Ordering::Equal => {}
                    decided => return decided,
                }
                if ours.coefficient == theirs.coefficient && ours.delta != theirs.delta {
                    return theirs.delta.cmp(&ours.delta);
                }
            }
            (None, None) => {}
        }

        if self.param_type == other.param_type {
            return Ordering::Equal;
        }
        match (self.param_type, other.param_type) {
            (ParamType::PageNumber, _) => Ordering::Greater,
            (_, ParamType::PageNumber) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }

    /// True if this result should replace `best`: it ranks higher, or ranks
    /// the same and covers more pages.
    pub fn beats(&self, best: &Self) -> bool {
        match self.rank_against(best) {
            Ordering::Greater => true,
            Ordering::Equal => self.pages.len() > best.pages.len(),
            Ordering::Less => false,
        }
    }

    /// Check whether `doc_url` can be prepended as page 1.
    ///
    /// The first page of a paginated article usually carries no page
    /// parameter, so it never shows up among the detected pages. It may be
    /// inserted when the detected pages are exactly 2, 3, ... , the document
    /// URL is shorter than theirs and is none of them, and no linked "1" in
    /// `ascending` points elsewhere (which would make this the last page).
    pub fn can_insert_first_page(&self, doc_url: &str, ascending: &[PageInfo]) -> bool {
        let Some(first) = self.pages.first() else {
            return false;
        };
        if self.pages.len() < 2 || first.page_num == 1 {
            return false;
        }

        // A URL at least as long probably carries its own page parameter
        if doc_url.len() >= first.url.len() {
            return false;
        }

        let pages_follow_first = self
            .pages
            .iter()
            .zip(2..)
            .all(|(page, expected)| page.page_num == expected && page.url != doc_url);
        if !pages_follow_first {
            return false;
        }

        !ascending
            .iter()
            .any(|page| page.page_num == 1 && !page.is_plain() && page.url != doc_url)
    }

    /// Prepend `doc_url` as page 1. Only call after [`Self::can_insert_first_page`].
    pub fn insert_first_page(&mut self, doc_url: &str) {
        self.pages.insert(0, PageInfo::new(1, doc_url));
    }

    /// Fill in the next paging URL, if not already known, with the page
    /// following the one whose URL is `doc_url`.
    pub fn determine_next_paging_url(&mut self, doc_url: &str) {
        if !self.next_paging_url.is_empty() {
            return;
        }
        if let Some(pos) = self.pages.iter().position(|page| page.url == doc_url) {
            if let Some(next) = self.pages.get(pos + 1) {
                self.next_paging_url = next.url.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pages: &[(i32, &str)], formula: Option<Formula>) -> PaginationResult {
        PaginationResult {
            param_type: ParamType::PageNumber,
            page_pattern: "http://a.com/list?page=[*!]".to_string(),
            pages: pages.iter().map(|&(num, url)| PageInfo::new(num, url)).collect(),
            formula,
            next_paging_url: String::new(),
        }
    }

    #[test]
    fn test_formula() {
        let formula = Formula::new(10, -10);
        assert_eq!(formula.param_value(1), Some(0));
        assert_eq!(formula.param_value(3), Some(20));
        assert_eq!(formula.param_value(i32::MAX), None);
        assert_eq!(Formula::new(i32::MIN, 0).implied_type(), ParamType::PageSize);
        assert_eq!(formula.implied_type(), ParamType::PageSize);
        assert_eq!(Formula::new(-1, 0).implied_type(), ParamType::PageNumber);
    }

    #[test]
    fn test_ranking() {
        let unit = result(&[(2, "u2"), (3, "u3")], Some(Formula::new(1, 0)));
        let zero_based = result(&[(2, "u2"), (3, "u3")], Some(Formula::new(1, -1)));
        let sized = result(&[(2, "u2"), (3, "u3"), (4, "u4")], Some(Formula::new(10, -10)));
        let unfitted = result(&[(2, "u2"), (3, "u3"), (4, "u4")], None);

        assert_eq!(unit.rank_against(&unfitted), Ordering::Greater);
        assert_eq!(unfitted.rank_against(&unit), Ordering::Less);
        assert_eq!(unit.rank_against(&sized), Ordering::Greater);
        assert_eq!(zero_based.rank_against(&unit), Ordering::Greater);
        assert_eq!(unit.rank_against(&unit.clone()), Ordering::Equal);

        assert!(!unfitted.beats(&unit));
        assert!(sized.beats(&unfitted));

        // Equal rank: more pages wins, otherwise the incumbent stays
        let longer = result(&[(2, "u2"), (3, "u3"), (4, "u4")], Some(Formula::new(1, 0)));
        assert!(longer.beats(&unit));
        assert!(!unit.beats(&longer));
        assert!(!unit.beats(&unit.clone()));
    }

    #[test]
    fn test_unset_ranks_below_page_number() {
        let unit = result(&[(2, "u2"), (3, "u3")], None);
        assert_eq!(PaginationResult::unset().rank_against(&unit), Ordering::Less);
        assert!(!PaginationResult::unset().is_detected());
    }

    #[test]
    fn test_insert_first_page() {
        let doc = "http://a.com/list";
        let ascending = vec![PageInfo::plain(1), PageInfo::new(2, "http://a.com/list?page=2")];
        let mut detected = result(
            &[(2, "http://a.com/list?page=2"), (3, "http://a.com/list?page=3")],
            Some(Formula::new(1, 0)),
        );
        assert!(detected.can_insert_first_page(doc, &ascending));
        detected.insert_first_page(doc);
        assert_eq!(detected.pages[0], PageInfo::new(1, doc));
        assert_eq!(detected.pages.len(), 3);

        // Page 1 is already there now
        assert!(!detected.can_insert_first_page(doc, &ascending));
    }

    #[test]
    fn test_cannot_insert_first_page() {
        let pages = [(2, "http://a.com/list?page=2"), (3, "http://a.com/list?page=3")];
        let detected = result(&pages, None);

        // Same length as the other pages
        assert!(!detected.can_insert_first_page("http://a.com/list?page=9", &[]));

        // Not starting at page 2
        let gapped = result(&[(3, "http://a.com/list?page=3"), (4, "http://a.com/list?page=4")], None);
        assert!(!gapped.can_insert_first_page("http://a.com/list", &[]));

        // A linked "1" elsewhere means this is a later page
        let ascending = vec![PageInfo::new(1, "http://a.com/list?page=1")];
        assert!(!detected.can_insert_first_page("http://a.com/list", &ascending));

        // A single page says too little
        let single = result(&[(2, "http://a.com/list?page=2")], None);
        assert!(!single.can_insert_first_page("http://a.com/list", &[]));
    }

    #[test]
    fn test_next_paging_url() {
        let mut detected = result(&[(1, "u1"), (2, "u2"), (3, "u3")], None);
        detected.determine_next_paging_url("u2");
        assert_eq!(detected.next_paging_url, "u3");

        // Already known
        detected.determine_next_paging_url("u1");
        assert_eq!(detected.next_paging_url, "u3");

        // Last page and unknown page leave it empty
        let mut detected = result(&[(1, "u1"), (2, "u2")], None);
        detected.determine_next_paging_url("u2");
        assert_eq!(detected.next_paging_url, "");
        detected.determine_next_paging_url("elsewhere");
        assert_eq!(detected.next_paging_url, "");
    }

    #[test]
    fn test_serialization() {
        let detected = result(&[(1, "u1"), (2, "u2")], Some(Formula::new(1, 0)));
        let json = serde_json::to_value(&detected).unwrap();
        assert_eq!(json["type"], "PAGE_NUMBER");
        assert_eq!(json["formula"]["coefficient"], 1);
        assert_eq!(json["pages"][1]["url"], "u2");

        let unset = serde_json::to_value(PaginationResult::unset()).unwrap();
        assert_eq!(unset["type"], "UNSET");
        assert!(unset["formula"].is_null());
    }
}
