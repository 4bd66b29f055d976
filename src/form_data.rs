//! Decoding of submitted enrollment rows.
//!
//! Each row submits `prefix[n][user]` and `prefix[n][role]`. Removing rows
//! leaves gaps in `n`, and a row whose role was never chosen submits no role
//! at all (the placeholder option is disabled), so decoding groups by index
//! and orders by it. Checking that a row names both a user and a role is
//! left to whoever consumes the entries.

use std::collections::BTreeMap;

use crate::models::AdditionalEnrollment;

/// Splits an `application/x-www-form-urlencoded` body into ordered pairs.
///
/// ```
/// use enrollrows::form_data::parse_urlencoded;
///
/// let pairs = parse_urlencoded("a=1&b=two+words&c=%5Bx%5D");
/// assert_eq!(pairs[1], ("b".to_string(), "two words".to_string()));
/// assert_eq!(pairs[2].1, "[x]");
/// ```
pub fn parse_urlencoded(body: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for pair in body.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let key_enc = parts.next().unwrap_or("").replace('+', " ");
        let val_enc = parts.next().unwrap_or("").replace('+', " ");
        let key = urlencoding::decode(&key_enc)
            .map(|k| k.into_owned())
            .unwrap_or(key_enc);
        let val = urlencoding::decode(&val_enc)
            .map(|v| v.into_owned())
            .unwrap_or(val_enc);
        pairs.push((key, val));
    }
    pairs
}

/// Splits `prefix[index][field]` into its index and field.
///
/// Returns `None` for keys that belong to some other form field or whose
/// index is not a number.
fn split_field<'a>(key: &'a str, prefix: &str) -> Option<(u32, &'a str)> {
    // Older markup quoted the whole name attribute.
    let key = key.trim_matches('\'');
    let rest = key.strip_prefix(prefix)?.strip_prefix('[')?;
    let (index, rest) = rest.split_once(']')?;
    let field = rest.strip_prefix('[')?.strip_suffix(']')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!(field = key, "ignoring field with non-numeric row index");
        return None;
    }
    let index = index.parse().ok()?;
    Some((index, field))
}

/// Decodes the additional enrollments out of a submitted form body.
///
/// Rows come back in index order. A row is dropped when any of its fields
/// is blank; users are lowercased.
pub fn decode_additional_enrollments(body: &str, prefix: &str) -> Vec<AdditionalEnrollment> {
    let mut grouped: BTreeMap<u32, BTreeMap<String, String>> = BTreeMap::new();
    for (key, value) in parse_urlencoded(body) {
        if let Some((index, field)) = split_field(&key, prefix) {
            grouped
                .entry(index)
                .or_default()
                .insert(field.to_string(), value.trim().to_string());
        }
    }

    let mut out = Vec::new();
    for (index, mut fields) in grouped {
        if fields.values().any(|v| v.is_empty()) {
            tracing::debug!(index, "skipping incomplete enrollment row");
            continue;
        }
        out.push(AdditionalEnrollment {
            index,
            user: fields.remove("user").map(|user| user.to_lowercase()),
            role: fields.remove("role"),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_field_ignores_other_fields() {
        assert_eq!(split_field("title", "additional_enrollments"), None);
        assert_eq!(
            split_field("additional_enrollments_extra[1][user]", "additional_enrollments"),
            None
        );
        assert_eq!(split_field("additional_enrollments[1]", "additional_enrollments"), None);
    }

    #[test]
    fn split_field_accepts_quoted_names() {
        assert_eq!(
            split_field("'additional_enrollments[4][role]'", "additional_enrollments"),
            Some((4, "role"))
        );
    }

    #[test]
    fn split_field_skips_non_numeric_index() {
        assert_eq!(split_field("additional_enrollments[x][user]", "additional_enrollments"), None);
        assert_eq!(split_field("additional_enrollments[][user]", "additional_enrollments"), None);
        assert_eq!(split_field("additional_enrollments[+1][user]", "additional_enrollments"), None);
    }
}
