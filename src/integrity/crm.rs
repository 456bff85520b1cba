//! CRM (medical license) format validation.

use std::sync::LazyLock;

use regex::Regex;

/// `CRM/UF NNNNNN`: registry prefix, slash, two-letter state code,
/// whitespace, 4 to 6 digits. Matched against the uppercased input.
static CRM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CRM/[A-Z]{2}\s+\d{4,6}$").unwrap());

/// Format check only; uniqueness against the roster is a separate
/// concern. Empty input is invalid.
pub fn is_valid_crm(raw: &str) -> bool {
    !raw.is_empty() && CRM_PATTERN.is_match(&normalize_crm(raw))
}

/// Canonical stored form: uppercase.
pub fn normalize_crm(raw: &str) -> String {
    raw.to_uppercase()
}
