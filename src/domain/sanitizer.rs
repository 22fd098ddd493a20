//! Turn free-form project names into DNS-safe labels

/// Longest label DNS accepts (RFC 1035)
pub const MAX_LABEL_LEN: usize = 63;

/// Sanitize a raw candidate name into a domain label.
///
/// Whitespace runs become a single hyphen, anything that is not an ASCII
/// alphanumeric or hyphen is dropped, edge hyphens are trimmed and the result
/// is lowercased. Hyphens inside the name are kept as written (`xn--` labels). The output is either empty or a valid
/// DNS label; callers must discard empty labels.
pub fn sanitize(raw: &str) -> String {
    let hyphenated = raw.split_whitespace().collect::<Vec<_>>().join("-");

    let mut label = String::with_capacity(hyphenated.len());
    for c in hyphenated.chars() {
        if c.is_ascii_alphanumeric() {
            label.push(c.to_ascii_lowercase());
        } else if c == '-' {
            label.push('-');
        }
    }

    let mut label = label.trim_matches('-').to_string();
    if label.len() > MAX_LABEL_LEN {
        // ASCII only at this point, byte truncation is safe
        label.truncate(MAX_LABEL_LEN);
        label = label.trim_end_matches('-').to_string();
    }
    label
}

/// Check that a string is a syntactically valid DNS label
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_word_names_are_hyphenated() {
        assert_eq!(sanitize("My Cool App!"), "my-cool-app");
        assert_eq!(sanitize("  Acme   Rockets "), "acme-rockets");
        assert_eq!(sanitize("Acme\tRockets"), "acme-rockets");
    }

    #[test]
    fn test_special_characters_are_stripped() {
        assert_eq!(sanitize("\"FlyCheap\""), "flycheap");
        assert_eq!(sanitize("Jet.Set"), "jetset");
        assert_eq!(sanitize("Zoom & Go"), "zoom--go");
        assert_eq!(sanitize("Café Air"), "caf-air");
    }

    #[test]
    fn test_edge_hyphens_are_trimmed() {
        assert_eq!(sanitize("-fly-"), "fly");
        assert_eq!(sanitize("--- fly high ---"), "fly-high");
    }

    #[test]
    fn test_internal_hyphens_are_kept() {
        assert_eq!(sanitize("xn--80ak6aa92e"), "xn--80ak6aa92e");
        assert_eq!(sanitize("fly--high"), "fly--high");
        assert_eq!(sanitize("Fly - High"), "fly---high");
        assert!(is_valid_label(&sanitize("xn--80ak6aa92e")));
    }

    #[test]
    fn test_garbage_becomes_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("!!!"), "");
        assert_eq!(sanitize("- - -"), "");
    }

    #[test]
    fn test_long_names_are_cut_to_label_limit() {
        let raw = format!("{} tail", "a".repeat(62));
        let label = sanitize(&raw);
        assert_eq!(label.len(), 62);
        assert!(is_valid_label(&label));

        let label = sanitize(&"b".repeat(100));
        assert_eq!(label.len(), MAX_LABEL_LEN);
    }

    #[test]
    fn test_output_is_always_a_valid_label_or_empty() {
        let inputs = [
            "My Cool App!",
            "  -- Sky  Scanner --  ",
            "UPPER lower 123",
            "ünïcödé näme",
            "a_b_c",
            "1. Foo",
            "\"Quoted\", name",
            "-",
        ];
        for raw in inputs {
            let label = sanitize(raw);
            assert!(label.is_empty() || is_valid_label(&label), "{raw:?} -> {label:?}");
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = ["My Cool App!", "--x--", "A  B  C", "Fly_High 2024", "", "ÆØÅ air"];
        for raw in inputs {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_label_validation() {
        assert!(is_valid_label("acme-rockets"));
        assert!(is_valid_label("a1"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("-acme"));
        assert!(!is_valid_label("acme-"));
        assert!(!is_valid_label("Acme"));
        assert!(!is_valid_label("acme.com"));
        assert!(!is_valid_label(&"a".repeat(64)));
    }
}
