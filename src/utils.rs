/// Returns true if the string is non-empty and made only of ASCII digits.
pub fn is_plain_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a plain number into a page number or page parameter value
///
/// Signs, whitespace and values that overflow `i32` are rejected.
pub fn to_number(s: &str) -> Option<i32> {
    if !is_plain_number(s) {
        return None;
    }
    s.parse().ok()
}

/// Length of the longest common prefix of two byte strings
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the longest common suffix of two byte strings.
///
/// The suffix never reaches index `start` of either string, so a prefix
/// already counted is not counted twice.
pub fn common_suffix_len(a: &[u8], b: &[u8], start: usize) -> usize {
    let mut len = 0;
    while a.len() > start + 1 + len
        && b.len() > start + 1 + len
        && a[a.len() - 1 - len] == b[b.len() - 1 - len]
    {
        len += 1;
    }
    len
}
