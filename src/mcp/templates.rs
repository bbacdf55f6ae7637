//! Resource URI template matching
//!
//! Supports a single `{param}` placeholder per pattern: the URI matches when
//! it starts with the fixed prefix before `{`, and extraction binds the one
//! named parameter to the remainder of the URI.

use std::collections::HashMap;

pub fn matches_template(uri: &str, pattern: &str) -> bool {
    match pattern.split_once('{') {
        Some((prefix, _)) => uri.starts_with(prefix),
        None => uri == pattern,
    }
}

pub fn extract_params(uri: &str, pattern: &str) -> Option<HashMap<String, String>> {
    let (prefix, rest) = pattern.split_once('{')?;
    let (name, _) = rest.split_once('}')?;
    let value = uri.strip_prefix(prefix)?;
    Some(HashMap::from([(name.to_string(), value.to_string())]))
}

#[cfg(test)]
mod tests {
    use super::{extract_params, matches_template};

    #[test]
    fn parameterless_pattern_requires_exact_match() {
        assert!(matches_template("zammad://groups", "zammad://groups"));
        assert!(!matches_template("zammad://groups/1", "zammad://groups"));
    }

    #[test]
    fn parameterized_pattern_matches_on_prefix() {
        assert!(matches_template(
            "zammad://ticket/42",
            "zammad://ticket/{ticket_id}"
        ));
        assert!(!matches_template(
            "zammad://user/42",
            "zammad://ticket/{ticket_id}"
        ));
    }

    #[test]
    fn extracts_the_named_parameter() {
        let params = extract_params("zammad://ticket/42", "zammad://ticket/{ticket_id}")
            .expect("uri should match");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("ticket_id").map(String::as_str), Some("42"));
    }

    #[test]
    fn extraction_fails_on_prefix_mismatch() {
        assert!(extract_params("zammad://user/42", "zammad://ticket/{ticket_id}").is_none());
        assert!(extract_params("zammad://ticket/42", "zammad://groups").is_none());
    }

    #[test]
    fn remainder_is_bound_verbatim() {
        let params = extract_params(
            "zammad://ticket/42/extra?x=1",
            "zammad://ticket/{ticket_id}",
        )
        .expect("uri should match");
        assert_eq!(
            params.get("ticket_id").map(String::as_str),
            Some("42/extra?x=1")
        );
    }
}
