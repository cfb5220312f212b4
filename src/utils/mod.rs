/// Convert an identifier to SCREAMING_SNAKE_CASE, the conventional shape for
/// environment variable names. Handles camelCase, snake_case and digits.
#[must_use]
pub fn to_screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev_lower = false;
    for ch in ident.chars() {
        if ch == '_' || ch == '-' {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch);
            prev_lower = false;
        } else {
            out.extend(ch.to_uppercase());
            prev_lower = ch.is_lowercase();
        }
    }
    out
}

/// Truncate a snippet for display, appending an ellipsis when cut.
#[must_use]
pub fn truncate_snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_camel_case() {
        assert_eq!(to_screaming_snake("apiKey"), "API_KEY");
        assert_eq!(to_screaming_snake("dbPassword"), "DB_PASSWORD");
        assert_eq!(to_screaming_snake("secretAccessToken"), "SECRET_ACCESS_TOKEN");
    }

    #[test]
    fn test_screaming_snake_already_snake() {
        assert_eq!(to_screaming_snake("api_key"), "API_KEY");
        assert_eq!(to_screaming_snake("API_KEY"), "API_KEY");
    }

    #[test]
    fn test_screaming_snake_plain_word() {
        assert_eq!(to_screaming_snake("password"), "PASSWORD");
        assert_eq!(to_screaming_snake("token2"), "TOKEN2");
    }

    #[test]
    fn test_truncate_snippet() {
        assert_eq!(truncate_snippet("short", 10), "short");
        assert_eq!(truncate_snippet("abcdefghij", 4), "abcd...");
    }
}
