//! Desirability rules for `(source, result)` pairs.

/// Quote characters recognized by [`strip_matching_quotes`].
const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Remove exactly one leading and one trailing quote character when both are present and
/// identical. Anything else (no quotes, unmatched quotes, a lone quote) is returned as is.
pub fn strip_matching_quotes(s: &str) -> &str {
    let mut chars = s.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return s;
    };
    if first == last && QUOTES.contains(&first) {
        &s[first.len_utf8()..s.len() - last.len_utf8()]
    } else {
        s
    }
}

/// Returns `true` if `result` is worth reporting for `source`.
///
/// Rejected results:
/// - the trimmed source itself (`"42"` evaluating to `"42"`)
/// - the trimmed source with one layer of matching quotes removed (`'foo'` -> `foo`)
/// - a callable representation (a result starting with `function`)
pub fn is_desirable(source: &str, result: &str) -> bool {
    let source = source.trim();
    if result == source {
        return false;
    }
    if result == strip_matching_quotes(source) {
        return false;
    }
    !result.trim_start().starts_with("function")
}
