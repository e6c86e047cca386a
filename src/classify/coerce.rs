pub fn to_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

pub fn to_points(value: &str) -> f64 {
    to_number(value)
        .filter(|points| *points >= 0.0)
        .unwrap_or(0.0)
}

pub fn to_count(value: &str) -> u32 {
    to_number(value)
        .filter(|count| *count >= 0.0)
        .map(|count| count.trunc().min(f64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Finishing position or rank from the leading digits of `value`.
///
/// `None` means not classified: empty, non-numeric, zero and negative input never
/// become a position.
pub fn to_position(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..digits_end]
        .parse::<u32>()
        .ok()
        .filter(|position| *position >= 1)
}

pub fn to_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

pub fn split_highlights(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
