//! String parsing utilities

/// Placeholder for an unavailable or unparseable metric
pub const PLACEHOLDER: &str = "-";

/// Strip leading spaces and trailing CR/LF, nothing else
pub fn trim_pseudo_file(raw: &str) -> &str {
    raw.trim_start_matches(' ')
        .trim_end_matches(&['\r', '\n'][..])
}

/// Parse a base-10 integer, tolerating surrounding whitespace
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Scale an integer reading with truncating division
pub fn scale_int(text: &str, divisor: i64) -> String {
    parse_int(text)
        .and_then(|value| value.checked_div(divisor))
        .map(|value| value.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Busy percentage from a `"busy_cycles total_cycles"` pair.
///
/// Fields may be separated by any run of whitespace, so kgsl's padded
/// columns (`"   30   60"`) are accepted. Unparseable but present content,
/// or a pair whose `busy * 100` overflows, is returned verbatim. A zero total
/// or an empty reading yields the placeholder.
pub fn busy_percent_from_cycles(text: &str) -> String {
    if text.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let mut parts = text.split_whitespace();
    let pair = match (parts.next(), parts.next(), parts.next()) {
        (Some(busy), Some(total), None) => parse_int(busy).zip(parse_int(total)),
        _ => None,
    };

    match pair {
        Some((_, 0)) => PLACEHOLDER.to_string(),
        Some((busy, total)) => busy
            .checked_mul(100)
            .map(|scaled| (scaled / total).to_string())
            .unwrap_or_else(|| text.to_string()),
        None => text.to_string(),
    }
}
