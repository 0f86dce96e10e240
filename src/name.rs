//! Wire-name resolution
//!
//! Bridges naming-convention mismatches between target field identifiers
//! and payload keys. A target field like `home_page` may arrive on the
//! wire as `homePage`, `HomePage`, `home-page`, or a legacy
//! underscore-prefixed spelling; `variants` produces the candidate
//! spellings in priority order and `resolve` picks the first one present
//! among the payload's keys.
//!
//! All comparisons are ordinal (byte-wise) to avoid locale-dependent
//! casing bugs.

use std::collections::HashSet;

/// Candidate wire spellings for a field identifier, in priority order.
///
/// Order: the identifier itself, its PascalCase form, the lower-cased
/// spaced form, the camelCase form, camelCase with a leading underscore,
/// the spaced form with a leading underscore, and the dash-joined
/// lower-case form. Duplicates are removed, keeping the first occurrence.
pub fn variants(identifier: &str) -> Vec<String> {
    let spaced_lower = add_spaces(identifier).to_lowercase();
    let camel = make_initial_lowercase(&to_pascal_case(identifier));

    let candidates = [
        identifier.to_string(),
        to_pascal_case(identifier),
        spaced_lower.clone(),
        camel.clone(),
        add_underscore_prefix(&camel),
        add_underscore_prefix(&spaced_lower),
        add_dashes(identifier).to_lowercase(),
    ];

    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Resolve a field identifier against the available payload keys.
///
/// Returns the first name variant present in `keys`, or `None` when no
/// spelling matches. Absence is not an error; the caller decides what a
/// missing field means.
pub fn resolve<'a>(identifier: &str, keys: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let keys: HashSet<&str> = keys.into_iter().collect();
    variants(identifier)
        .into_iter()
        .find(|candidate| keys.contains(candidate.as_str()))
}

/// Convert an identifier to PascalCase, removing separators.
///
/// Words already mixed-case keep their interior casing; all-uppercase
/// words are folded so `WORD` becomes `Word`.
pub fn to_pascal_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());

    for word in identifier.split([' ', '_', '-']) {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let rest: String = chars.collect();

        out.extend(first.to_uppercase());
        if !rest.is_empty() && rest.chars().all(|c| !c.is_lowercase()) {
            out.push_str(&rest.to_lowercase());
        } else {
            out.push_str(&rest);
        }
    }
    out
}

/// Lowercase only the first character of an identifier.
pub fn make_initial_lowercase(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insert spaces at word boundaries: `PascalCased` becomes `Pascal Cased`,
/// `home_page` becomes `home page`.
pub fn add_spaces(identifier: &str) -> String {
    add_separator(identifier, ' ')
}

/// Insert dashes at word boundaries: `PascalCased` becomes `Pascal-Cased`,
/// `home_page` becomes `home-page`.
pub fn add_dashes(identifier: &str) -> String {
    add_separator(identifier, '-')
}

/// Prefix an identifier with an underscore (legacy wire convention).
pub fn add_underscore_prefix(identifier: &str) -> String {
    format!("_{identifier}")
}

fn add_separator(identifier: &str, separator: char) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            out.push(separator);
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let prev_is_separator = matches!(prev, '_' | '-' | ' ');
            // Break before an uppercase letter that follows a lowercase
            // letter or digit, and before the last uppercase of a run that
            // is followed by a lowercase letter (HTTPServer -> HTTP Server).
            let follows_word = prev.is_lowercase() || prev.is_ascii_digit();
            let ends_upper_run = prev.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if !prev_is_separator && (follows_word || ends_upper_run) {
                out.push(separator);
            }
        }
        out.push(c);
    }
    out
}
