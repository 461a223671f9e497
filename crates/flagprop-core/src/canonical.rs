//! Operator name canonicalization
//!
//! Bridges the two naming conventions an operator appears under: the
//! PascalCase variant name of an enum (`IsNotSet`, `SemverGt`) and the
//! snake_case wire name (`is_not_set`, `semver_gt`).
//!
//! The conversion matches serde's `rename_all = "snake_case"` for names made
//! of single-capital word boundaries. It does NOT treat runs of consecutive
//! capitals as acronyms: `ParseURL` becomes `parse_url` but `URLParse`
//! becomes `urlparse`, and `IContains` becomes `icontains`. Use
//! [`acronym_run`] to detect names where the result is likely wrong.

/// Convert a PascalCase identifier to snake_case.
///
/// An underscore is inserted before every ASCII uppercase letter that
/// directly follows an ASCII lowercase letter or digit; the result is then
/// lowercased.
pub fn pascal_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if let Some(p) = prev {
                if p.is_ascii_lowercase() || p.is_ascii_digit() {
                    out.push('_');
                }
            }
        }
        out.push(ch);
        prev = Some(ch);
    }

    out.to_lowercase()
}

/// Return the first run of two or more consecutive ASCII capitals, if any.
///
/// Such names under-split in [`pascal_to_snake`]. The run is the whole
/// uppercase stretch, so it includes the capital that starts the following
/// word: `HTTPStatusCode` reports `HTTPS` and `IContains` reports `IC`.
pub fn acronym_run(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    let mut start = None;

    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_uppercase() {
            let s = *start.get_or_insert(i);
            let next_upper = bytes.get(i + 1).is_some_and(|n| n.is_ascii_uppercase());
            if !next_upper && i > s {
                return Some(&name[s..=i]);
            }
            if !next_upper {
                start = None;
            }
        } else {
            start = None;
        }
    }

    None
}
