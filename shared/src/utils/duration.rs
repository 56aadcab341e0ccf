//! Parsing of human-friendly durations used in token lifetime settings

/// Parse a duration into whole seconds
///
/// Accepts a bare integer (`"900"`) or an integer followed by one of
/// `s`, `m`, `h`, `d` (`"15m"`, `"7d"`). Returns `None` for anything else,
/// including zero or negative values.
pub fn parse_duration_secs(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 3600),
        'd' => (&value[..value.len() - 1], 86400),
        c if c.is_ascii_digit() => (value, 1),
        _ => return None,
    };

    let amount: i64 = digits.trim().parse().ok()?;
    if amount <= 0 {
        return None;
    }
    amount.checked_mul(multiplier)
}
