//! Central case-insensitive string predicates used for layout and role matching.

/// True if `haystack` contains `needle`, ignoring ASCII case.
/// All substring-based classification (layout selection, reserve roles,
/// legacy gender categories) goes through this so the rules stay in one place.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

/// True if a team role name marks the member as a reserve (excluded from auto-draw).
pub fn is_reserve_role(role_name: &str) -> bool {
    contains_ignore_case(role_name, "reserve")
}

/// Parse a sport-specific skill label as a numeric rating.
/// Labels are free-form strings ("4.0", "3.5", "Advanced", ""); non-numeric
/// labels have no numeric value.
pub fn parse_skill(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok()
}
