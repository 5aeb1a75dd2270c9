use std::cmp::Ordering;
use std::mem;

use crate::results::PageInfo;

/// Receiver of the numbers a document scanner finds, in reading order.
pub trait NumberCollector {
    /// Mark a boundary that monotonic grouping must not bridge
    fn add_group(&mut self);

    /// Record a plain-text number (empty `url`) or a numeric outlink
    fn add_number(&mut self, value: i32, url: &str);
}

/// A monotonic run of page numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pages: Vec<PageInfo>,
    sign: i8,
}

impl Group {
    fn seeded(pages: Vec<PageInfo>, sign: i8) -> Self {
        Self { pages, sign }
    }

    /// Pages in the order they were observed
    pub fn pages(&self) -> &[PageInfo] {
        &self.pages
    }

    /// Direction of the run: +1 ascending, -1 descending, 0 for a single value
    pub fn sign(&self) -> i8 {
        self.sign
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The page numbers of the run, for inspection and tests
    pub fn numbers(&self) -> Vec<i32> {
        self.pages.iter().map(|page| page.page_num).collect()
    }

    /// Pages in ascending page-number order
    pub fn ascending(&self) -> Vec<PageInfo> {
        let mut pages = self.pages.clone();
        if self.sign < 0 {
            pages.reverse();
        }
        pages
    }
}

/// Partitions a stream of numbers into maximal monotonic runs.
///
/// A run continues while numbers keep the direction set by its first two
/// values. A number that reverses the direction starts a new run seeded
/// with the previous peak or trough, so `1 3 5 4 2` yields `[1,3,5]` and
/// `[5,4,2]`. A repeated number closes the run and starts a new one with
/// just that number, except that a repeat of a lone value is dropped.
#[derive(Debug, Default)]
pub struct NumberSequenceGrouper {
    finished: Vec<Group>,
    current: Group,
}

impl NumberSequenceGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current run, if it has anything in it
    pub fn add_group(&mut self) {
        if !self.current.is_empty() {
            self.finished.push(mem::take(&mut self.current));
        }
    }

    /// Add a number to the current run, opening a new run when it breaks the trend.
    pub fn add_page_info(&mut self, page: PageInfo) {
        let Some(last) = self.current.pages.last() else {
            self.current.pages.push(page);
            return;
        };

        let delta_sign: i8 = match page.page_num.cmp(&last.page_num) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        };

        match (self.current.sign, delta_sign) {
            // Repeat of a lone value
            (0, 0) => {}
            (0, sign) => {
                self.current.sign = sign;
                self.current.pages.push(page);
            }
            (trend, sign) if trend == sign => self.current.pages.push(page),
            (_, 0) => {
                self.add_group();
                self.current = Group::seeded(vec![page], 0);
            }
            (_, sign) => {
                let peak = last.clone();
                self.add_group();
                self.current = Group::seeded(vec![peak, page], sign);
            }
        }
    }

    /// Finished runs followed by the current one, if non-empty
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.finished.iter().collect();
        if !self.current.is_empty() {
            groups.push(&self.current);
        }
        groups
    }

    /// Consume the grouper, returning all non-empty runs
    pub fn into_groups(mut self) -> Vec<Group> {
        self.add_group();
        self.finished
    }
}

impl NumberCollector for NumberSequenceGrouper {
    fn add_group(&mut self) {
        NumberSequenceGrouper::add_group(self);
    }

    fn add_number(&mut self, value: i32, url: &str) {
        self.add_page_info(PageInfo::new(value, url));
    }
}
