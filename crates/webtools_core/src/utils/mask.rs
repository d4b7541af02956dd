//! Masking of sensitive strings (phone numbers, ID numbers, names).

/// Mask the middle of `s` with `*`, keeping `begin_len` leading and `end_len`
/// trailing characters.
///
/// A length of `0` means the default of `1`. Lengths count characters, not
/// bytes. When the kept ends overlap on a short string they are both kept
/// in full, so `"a"` becomes `"aa"`.
///
/// ```
/// use webtools_core::utils::desensitize;
///
/// assert_eq!(desensitize("13812345678", 3, 4), "138****5678");
/// assert_eq!(desensitize("张三丰", 0, 0), "张*丰");
/// ```
pub fn desensitize(s: &str, begin_len: usize, end_len: usize) -> String {
    let begin_len = if begin_len == 0 { 1 } else { begin_len };
    let end_len = if end_len == 0 { 1 } else { end_len };

    let chars: Vec<char> = s.chars().collect();
    let total = chars.len();
    let hidden = total.saturating_sub(begin_len.saturating_add(end_len));

    let head = &chars[..begin_len.min(total)];
    let tail = &chars[total.saturating_sub(end_len)..];

    head.iter()
        .chain(std::iter::repeat_n(&'*', hidden))
        .chain(tail.iter())
        .collect()
}
