//! Character-class filters applied to identifiers before they are
//! interpolated into a URL path or an option value.

/// PSN online ids: letters, digits, `_` and `-`.
pub fn clean_psn(username: &str) -> String {
    username
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Message group ids and comma-separated id lists. Group ids look like
/// `~25C4C5406FD6D50E.763F9A1EEC8F2DE2`, so `~` and `.` survive.
pub fn clean_psn_list(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ',' | '~' | '.'))
        .collect()
}

/// NP communication ids (`NPWR00132_00`) and trophy group ids (`default`, `001`).
pub fn clean_np_comm_id(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Activity story ids are lower-case hex in 8-4-4-4-12 groups.
pub fn clean_story_id(story_id: &str) -> String {
    story_id
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Leading-integer parse: optional whitespace and sign, then digits up to the
/// first non-digit. `None` when no digit is found.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
