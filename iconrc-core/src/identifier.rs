//! Derivation of C++ identifiers from icon and category names.

/// Replaces every character not accepted by `keep` with `_`, collapses runs
/// of `_` and trims them from both ends.
fn scrub(s: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = if keep(c) { c } else { '_' };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Derives a constant name matching `[A-Z0-9_]+` from an icon file stem.
///
/// Names starting with a digit get `leading_digit_prefix` prepended. Returns
/// `None` if nothing usable is left of the name.
pub fn sanitize(name: &str, leading_digit_prefix: &str) -> Option<String> {
    let identifier = scrub(&name.to_uppercase(), |c| {
        c.is_ascii_uppercase() || c.is_ascii_digit()
    });
    if identifier.is_empty() {
        None
    } else if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        Some(format!("{}{}", leading_digit_prefix, identifier))
    } else {
        Some(identifier)
    }
}

/// Uppercases the first letter of every run of cased letters and lowercases
/// the rest, so `settings-gear` becomes `Settings-Gear` and `3d` becomes `3D`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_cased = false;
    for c in s.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

/// Namespace name for a category: title-cased, then reduced to a valid
/// identifier.
pub fn namespace_name(category: &str) -> String {
    let name = scrub(&title_case(category), |c| c.is_ascii_alphanumeric());
    if name.is_empty() {
        "General".to_owned()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Category_{}", name)
    } else {
        name
    }
}

/// Whether `s` can be used as a constant name: `[A-Z0-9_]+`, no leading
/// digit, no leading, trailing or doubled underscore.
pub fn is_constant_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit() || c == '_')
        && !s.ends_with('_')
        && !s.contains("__")
}

/// Whether `s` is a plain C++ identifier or a `::`-separated path of them.
pub fn is_namespace_path(s: &str) -> bool {
    s.split("::").all(|part| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
