//! Normalize generator replies into a flat list of candidate names
//!
//! Models answer either with a comma-separated line or with a numbered list
//! (`1. Foo\n2. Bar`). Both end up as the same list of names.

use regex::Regex;

const NUMBERED_ITEM: &str = r"^\s*\d+\s*[.)]\s*(.*)$";
const ITEM_MARKER: &str = r"^\d+\s*[.)]\s*";

/// Rewrite a numbered list into the flat comma-separated form.
///
/// Text that is not a numbered list is returned unchanged. Lines without a
/// number (preamble such as "Here are some names:") are dropped once at least
/// one numbered line is found.
pub fn normalize_numbered_list(content: &str) -> String {
    let Ok(item) = Regex::new(NUMBERED_ITEM) else {
        return content.to_string();
    };

    let items: Vec<&str> = content
        .lines()
        .filter_map(|line| item.captures(line).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .collect();

    if items.is_empty() {
        content.to_string()
    } else {
        items.join(",")
    }
}

/// Split a flat comma-separated reply into trimmed, non-empty names
pub fn split_names(flat: &str) -> Vec<String> {
    flat.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a generator reply of either shape into candidate names.
///
/// List markers left inside a flat line (`1. Foo, 2. Bar`) are stripped too.
pub fn parse_name_list(content: &str) -> Vec<String> {
    let names = split_names(&normalize_numbered_list(content.trim()));
    let Ok(marker) = Regex::new(ITEM_MARKER) else {
        return names;
    };

    names
        .iter()
        .map(|name| marker.replace(name, "").trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
