//! Shared utility functions for code generation.

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.' | ' ')
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
///
/// Existing capitals are kept, so "PagedExpand" stays "PagedExpand".
pub fn to_pascal_case(s: &str) -> String {
    s.split(is_separator)
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to camelCase (e.g., "page_token" -> "pageToken")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world")
///
/// Runs of capitals are treated as one word: "GetIAMPolicy" -> "get_iam_policy".
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Convert a string to SCREAMING_SNAKE_CASE (e.g., "defaultHost" -> "DEFAULT_HOST")
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Convert a string to kebab-case (e.g., "PagedExpand" -> "paged-expand")
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}
