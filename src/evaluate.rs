use std::collections::HashSet;

use crate::pattern::PagePattern;
use crate::results::{Formula, PageInfo, PaginationResult, ParamType};

/// An outlink whose URL matched a page pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinkInfo {
    /// Page number shown in the document
    pub page_num: i32,
    /// Value of the page parameter in the link's URL
    pub page_param_value: i32,
    /// Index of the link in its group's ascending page list
    pub pos: usize,
}

impl PageLinkInfo {
    pub fn new(page_num: i32, page_param_value: i32, pos: usize) -> Self {
        Self {
            page_num,
            page_param_value,
            pos,
        }
    }
}

/// How the links of one pattern sit among all the numbers of their group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageNumbersState {
    /// Links are next to each other in the ascending list, except for at
    /// most one skipped number (normally the current page in plain text)
    pub is_adjacent: bool,
    /// The numbers around the links step by one somewhere
    pub is_consecutive: bool,
    /// URL of the page after the current one, when the state reveals it
    pub next_paging_url: String,
}

impl PageNumbersState {
    /// Compute adjacency and consecutiveness of `links` within `ascending`.
    pub fn compute(links: &[PageLinkInfo], ascending: &[PageInfo]) -> Self {
        let mut state = Self::default();
        let Some(first) = links.first() else {
            return state;
        };
        let first_pos = first.pos;

        let mut last_pos = first_pos;
        let mut gap_pos = None;
        let mut param_values = HashSet::new();
        for (i, link) in links.iter().enumerate() {
            if i > 0 && link.pos != last_pos + 1 {
                // Positions must ascend, skipping at most one number once
                if link.pos != last_pos + 2 || gap_pos.is_some() {
                    return state;
                }
                gap_pos = Some(link.pos - 1);
            }
            if !param_values.insert(link.page_param_value) {
                return state;
            }
            last_pos = link.pos;
        }
        state.is_adjacent = true;

        let page_num = |pos: usize| ascending.get(pos).map(|page| page.page_num);

        // The skipped number must sit right between its neighbours
        if let Some(gap) = gap_pos {
            if gap == 0 || gap + 1 >= ascending.len() {
                return state;
            }
            let current = ascending[gap].page_num;
            if current.checked_sub(1).is_some_and(|prev| page_num(gap - 1) == Some(prev))
                && current.checked_add(1).is_some_and(|next| page_num(gap + 1) == Some(next))
            {
                state.is_consecutive = true;
                state.next_paging_url = ascending[gap + 1].url.clone();
            }
            return state;
        }

        // Links start at page 1 or 2 with 1 and 2 in front
        if first_pos <= 1 && page_num(0) == Some(1) && page_num(1) == Some(2) {
            state.is_consecutive = true;
            return state;
        }

        // "[1] 2 [3]...": linked 1, plain 2, links from 3
        if first_pos == 2
            && page_num(2) == Some(3)
            && ascending[1].is_plain()
            && !ascending[0].is_plain()
        {
            state.is_consecutive = true;
            return state;
        }

        // Links run to the end of the list, which ends with a unit step
        let len = ascending.len();
        if len >= 2
            && (last_pos + 1 == len || last_pos + 2 == len)
            && is_step(ascending[len - 2].page_num, ascending[len - 1].page_num, 1)
        {
            state.is_consecutive = true;
            return state;
        }

        // Some link sits between numbers two apart
        state.is_consecutive = (first_pos + 1..last_pos)
            .any(|i| is_step(ascending[i - 1].page_num, ascending[i + 1].page_num, 2));
        state
    }

    /// Compute the state of a selection of plain numbers within all numbers
    /// observed. A selected number that was never observed is not adjacent.
    pub fn for_numbers(selected: &[i32], all: &[i32]) -> Self {
        let mut links = Vec::with_capacity(selected.len());
        for &number in selected {
            let Some(pos) = all.iter().position(|&n| n == number) else {
                return Self::default();
            };
            links.push(PageLinkInfo::new(number, number, pos));
        }
        let ascending: Vec<PageInfo> = all.iter().map(|&n| PageInfo::plain(n)).collect();
        Self::compute(&links, &ascending)
    }
}

/// `to` is exactly `step` above `from`
fn is_step(from: i32, to: i32, step: i32) -> bool {
    from.checked_add(step) == Some(to)
}

/// Check that `ascending` reads like a pager: it starts with a link or the
/// first page, has at most one plain-text number (the current page), and
/// only skips page numbers right after the first entry or before the last.
/// The first link after the plain-text number is recorded as the next page.
fn is_page_number_sequence(ascending: &[PageInfo], state: &mut PageNumbersState) -> bool {
    let Some(first) = ascending.first() else {
        return false;
    };
    if ascending.len() < 2 || (first.page_num != 1 && first.is_plain()) {
        return false;
    }

    let mut seen_plain = false;
    for page in ascending {
        if page.is_plain() {
            if seen_plain {
                return false;
            }
            seen_plain = true;
        } else if seen_plain && state.next_paging_url.is_empty() {
            state.next_paging_url = page.url.clone();
        }
    }

    // Two pages must be siblings
    if ascending.len() == 2 {
        return is_step(first.page_num, ascending[1].page_num, 1);
    }

    let last = ascending.len() - 1;
    for (i, pair) in ascending.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        if !is_step(prev.page_num, curr.page_num, 1) {
            if i + 1 != 1 && i + 1 != last {
                return false;
            }
            if curr.is_plain() || prev.is_plain() {
                return false;
            }
        }
    }
    true
}

/// The two first links must step the parameter by a whole multiple of the page step.
fn has_integral_step(links: &[PageLinkInfo]) -> bool {
    match links {
        [first, second, ..] => {
            let (Some(delta_x), Some(delta_y)) = (
                second.page_num.checked_sub(first.page_num),
                second.page_param_value.checked_sub(first.page_param_value),
            ) else {
                return false;
            };
            delta_x == 0 || delta_y.checked_rem(delta_x) == Some(0)
        }
        _ => true,
    }
}

/// Fit `param_value = coefficient * page_num + delta` through the links.
///
/// Only formulas where the first page's value is 0 or the coefficient
/// itself (delta 0 or -coefficient) count, and every link must fit. Two
/// links are not enough evidence beyond page 4. Values whose arithmetic
/// overflows an `i32` fit no formula.
pub fn linear_formula(links: &[PageLinkInfo]) -> Option<Formula> {
    let [first, second, rest @ ..] = links else {
        return None;
    };
    if rest.is_empty() && first.page_num.max(second.page_num) > 4 {
        return None;
    }

    let delta_x = second.page_num.checked_sub(first.page_num)?;
    let delta_y = second.page_param_value.checked_sub(first.page_param_value)?;
    let coefficient = delta_y.checked_div(delta_x)?;
    if coefficient == 0 {
        return None;
    }

    let delta = first
        .page_param_value
        .checked_sub(coefficient.checked_mul(first.page_num)?)?;
    if delta != 0 && Some(delta) != coefficient.checked_neg() {
        return None;
    }

    let formula = Formula::new(coefficient, delta);
    rest.iter()
        .all(|link| formula.param_value(link.page_num) == Some(link.page_param_value))
        .then_some(formula)
}

/// Evaluate whether `links`, the outlinks of one group matching `pattern`,
/// are the pages of a paginated document.
///
/// Two or more links must be adjacent and consecutive within `ascending`
/// and form a page number sequence. A single link is accepted only when
/// the group starts at page 1 whose URL (`first_page_url`) the pattern
/// matches, and the link is page 2, or page 3 right after a page 2.
pub fn evaluate(
    pattern: &PagePattern,
    links: &[PageLinkInfo],
    ascending: &[PageInfo],
    first_page_url: &str,
) -> Option<PaginationResult> {
    if links.len() >= 2 {
        let mut state = PageNumbersState::compute(links, ascending);
        if !state.is_adjacent || !state.is_consecutive {
            ::log::debug!(
                "Pattern {} rejected: adjacent={} consecutive={}",
                pattern,
                state.is_adjacent,
                state.is_consecutive
            );
            return None;
        }
        if !is_page_number_sequence(ascending, &mut state) {
            ::log::debug!("Pattern {} rejected: not a page number sequence", pattern);
            return None;
        }
        if !has_integral_step(links) {
            ::log::debug!("Pattern {} rejected: fractional parameter step", pattern);
            return None;
        }

        let pages = links
            .iter()
            .map(|link| PageInfo::new(link.page_num, ascending[link.pos].url.clone()))
            .collect();
        return Some(PaginationResult {
            param_type: ParamType::PageNumber,
            page_pattern: pattern.to_string(),
            pages,
            formula: linear_formula(links),
            next_paging_url: state.next_paging_url,
        });
    }

    // Short articles often have a bare first page and links to pages 2 or 3
    let [only] = links else {
        return None;
    };
    if first_page_url.is_empty() {
        return None;
    }
    let second_page_is_link = only.page_num == 2 && only.pos == 1;
    let third_page_is_link = only.page_num == 3
        && only.pos == 2
        && ascending.get(1).is_some_and(|page| page.page_num == 2);
    let starts_at_first_page = ascending.first().is_some_and(|page| page.page_num == 1);
    if !starts_at_first_page
        || !(second_page_is_link || third_page_is_link)
        || !pattern.is_paging_url(first_page_url)
    {
        return None;
    }

    let delta = only.page_param_value.checked_sub(only.page_num)?;
    let formula = if delta == 0 || delta == 1 {
        Formula::new(1, delta)
    } else {
        Formula::new(only.page_param_value, 0)
    };
    let link_url = ascending[only.pos].url.clone();
    let next_paging_url = if third_page_is_link { link_url.clone() } else { String::new() };

    Some(PaginationResult {
        param_type: ParamType::PageNumber,
        page_pattern: pattern.to_string(),
        pages: vec![PageInfo::new(1, first_page_url), PageInfo::new(only.page_num, link_url)],
        formula: Some(formula),
        next_paging_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(selected: &[i32], all: &[i32]) -> (bool, bool) {
        let state = PageNumbersState::for_numbers(selected, all);
        (state.is_adjacent, state.is_consecutive)
    }

    fn links(pairs: &[(i32, i32)]) -> Vec<PageLinkInfo> {
        pairs
            .iter()
            .enumerate()
            .map(|(pos, &(page_num, value))| PageLinkInfo::new(page_num, value, pos))
            .collect()
    }

    #[test]
    fn test_adjacent_and_consecutive() {
        assert_eq!(state(&[1, 2], &[1, 2]), (true, true));
        assert_eq!(state(&[2, 3], &[1, 2, 3]), (true, true));
        assert_eq!(state(&[1, 5, 7, 10], &[1, 5, 6, 7, 10]), (true, true));
        assert_eq!(state(&[10, 25, 50], &[10, 25, 50]), (true, false));
        assert_eq!(state(&[23, 24, 30], &[23, 24, 30]), (true, false));
        assert_eq!(state(&[1, 3, 5], &[1, 2, 3, 4, 5]), (false, false));
        assert_eq!(state(&[2, 5], &[2, 3, 4, 5]), (false, false));
    }

    #[test]
    fn test_state_edge_cases() {
        // Unobserved or repeated selections
        assert_eq!(state(&[1, 9], &[1, 2]), (false, false));
        assert_eq!(state(&[2, 1], &[1, 2]), (false, false));
        assert_eq!(state(&[], &[1, 2]), (false, false));

        // The skipped number must be the one in between
        assert_eq!(state(&[1, 3], &[1, 2, 3]), (true, true));
        assert_eq!(state(&[1, 4], &[1, 2, 4]), (true, false));
    }

    #[test]
    fn test_gap_reveals_next_page() {
        let ascending = vec![
            PageInfo::new(1, "u1"),
            PageInfo::new(2, "u2"),
            PageInfo::plain(3),
            PageInfo::new(4, "u4"),
        ];
        let links = vec![
            PageLinkInfo::new(1, 1, 0),
            PageLinkInfo::new(2, 2, 1),
            PageLinkInfo::new(4, 4, 3),
        ];
        let state = PageNumbersState::compute(&links, &ascending);
        assert!(state.is_adjacent && state.is_consecutive);
        assert_eq!(state.next_paging_url, "u4");
    }

    #[test]
    fn test_page_number_sequence() {
        let mut state = PageNumbersState::default();
        let pages = vec![PageInfo::plain(1), PageInfo::new(2, "u2"), PageInfo::new(3, "u3")];
        assert!(is_page_number_sequence(&pages, &mut state));
        assert_eq!(state.next_paging_url, "u2");

        // Two plain numbers
        let pages = vec![PageInfo::plain(1), PageInfo::plain(2), PageInfo::new(3, "u3")];
        assert!(!is_page_number_sequence(&pages, &mut PageNumbersState::default()));

        // Plain first number that is not page 1
        let pages = vec![PageInfo::plain(2), PageInfo::new(3, "u3")];
        assert!(!is_page_number_sequence(&pages, &mut PageNumbersState::default()));

        // Two pages that are not siblings
        let pages = vec![PageInfo::new(1, "u1"), PageInfo::new(3, "u3")];
        assert!(!is_page_number_sequence(&pages, &mut PageNumbersState::default()));

        // Jumps are fine at the ends only, between links
        let pages = vec![
            PageInfo::new(1, "u1"),
            PageInfo::new(2, "u2"),
            PageInfo::plain(3),
            PageInfo::new(4, "u4"),
            PageInfo::new(48, "u48"),
        ];
        assert!(is_page_number_sequence(&pages, &mut PageNumbersState::default()));
        let pages = vec![
            PageInfo::new(1, "u1"),
            PageInfo::new(2, "u2"),
            PageInfo::new(9, "u9"),
            PageInfo::new(10, "u10"),
        ];
        assert!(!is_page_number_sequence(&pages, &mut PageNumbersState::default()));
    }

    #[test]
    fn test_linear_formula() {
        assert_eq!(linear_formula(&links(&[(2, 2), (3, 3), (4, 4)])), Some(Formula::new(1, 0)));
        assert_eq!(linear_formula(&links(&[(2, 1), (3, 2), (4, 3)])), Some(Formula::new(1, -1)));
        assert_eq!(linear_formula(&links(&[(2, 10), (3, 20), (4, 30)])), Some(Formula::new(10, -10)));
        assert_eq!(linear_formula(&links(&[(1, 0), (2, 20), (3, 40)])), Some(Formula::new(20, -20)));

        // Offset that is neither 0 nor one step
        assert_eq!(linear_formula(&links(&[(2, 7), (3, 8), (4, 9)])), None);
        // A later link off the line
        assert_eq!(linear_formula(&links(&[(2, 2), (3, 3), (4, 7)])), None);
        // Two links beyond page 4
        assert_eq!(linear_formula(&links(&[(5, 5), (6, 6)])), None);
        assert_eq!(linear_formula(&links(&[(2, 2), (3, 3)])), Some(Formula::new(1, 0)));
        // Constant parameter
        assert_eq!(linear_formula(&links(&[(2, 5), (3, 5), (4, 5)])), None);
        assert_eq!(linear_formula(&links(&[(2, 2)])), None);
    }

    #[test]
    fn test_huge_values_fit_no_formula() {
        assert_eq!(linear_formula(&links(&[(2, 0), (3, 2_000_000_000)])), None);
        assert_eq!(linear_formula(&links(&[(2, 0), (3, 2_000_000_000), (4, 4)])), None);
        assert_eq!(linear_formula(&links(&[(i32::MIN, 1), (i32::MAX, 2), (0, 3)])), None);
        assert_eq!(linear_formula(&links(&[(1, i32::MIN), (2, 0), (3, 1)])), None);
        assert!(!has_integral_step(&links(&[(i32::MIN, 0), (i32::MAX, 1)])));
        assert!(!has_integral_step(&links(&[(1, i32::MIN), (2, i32::MAX)])));
    }

    #[test]
    fn test_extreme_page_numbers_are_no_sequence() {
        let pages = vec![PageInfo::new(i32::MAX - 1, "a"), PageInfo::new(i32::MAX, "b")];
        assert!(is_page_number_sequence(&pages, &mut PageNumbersState::default()));
        let pages = vec![PageInfo::new(i32::MIN, "a"), PageInfo::new(i32::MAX, "b")];
        assert!(!is_page_number_sequence(&pages, &mut PageNumbersState::default()));

        let ascending = vec![PageInfo::new(i32::MAX - 1, "a"), PageInfo::plain(i32::MAX), PageInfo::new(i32::MAX, "c")];
        let links = vec![PageLinkInfo::new(i32::MAX - 1, 1, 0), PageLinkInfo::new(i32::MAX, 2, 2)];
        let state = PageNumbersState::compute(&links, &ascending);
        assert!(state.is_adjacent && !state.is_consecutive);
    }

    #[test]
    fn test_integral_step() {
        assert!(has_integral_step(&links(&[(2, 10), (3, 20)])));
        assert!(has_integral_step(&links(&[(2, 10), (4, 30)])));
        assert!(!has_integral_step(&links(&[(2, 10), (4, 15)])));
        assert!(has_integral_step(&links(&[(2, 10)])));
    }
}
