//! Name utilities.
//!
//! Category names are matched exactly, so the only normalization applied is
//! trimming surrounding whitespace. Schema identifiers (node labels and
//! relation types) are spliced into query text and must therefore be plain
//! identifiers.

use crate::{Error, Result};

/// Trim a raw category name, returning `None` for blank input.
///
/// # Examples
///
/// ```
/// use taxo_core::util::ids::clean_name;
///
/// assert_eq!(clean_name("  1880s_films "), Some("1880s_films"));
/// assert_eq!(clean_name("   "), None);
/// ```
pub fn clean_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns `true` if `s` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a schema identifier, naming the setting in the error.
///
/// # Examples
///
/// ```
/// use taxo_core::util::ids::validate_identifier;
///
/// assert!(validate_identifier("neo4j.label", "Category").is_ok());
/// assert!(validate_identifier("neo4j.relation", "IS PARENT").is_err());
/// ```
pub fn validate_identifier(setting: &str, value: &str) -> Result<()> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(Error::config(format!(
            "{setting} must be a plain identifier ([A-Za-z_][A-Za-z0-9_]*), got '{value}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_name_keeps_inner_whitespace() {
        assert_eq!(clean_name(" Films of 1880 "), Some("Films of 1880"));
    }

    #[test]
    fn test_clean_name_empty() {
        assert_eq!(clean_name(""), None);
        assert_eq!(clean_name("\t\n"), None);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Category"));
        assert!(is_identifier("IS_PARENT_OF"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("Cat:egory"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("x`) DETACH DELETE n //"));
    }

    #[test]
    fn test_validate_identifier_message_names_setting() {
        let err = validate_identifier("neo4j.label", "bad label").unwrap_err();
        assert!(err.to_string().contains("neo4j.label"));
        assert!(err.to_string().contains("bad label"));
    }

    proptest! {
        #[test]
        fn prop_identifiers_accepted(s in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
            prop_assert!(is_identifier(&s));
        }

        #[test]
        fn prop_clean_name_has_no_outer_whitespace(s in "\\PC{0,30}") {
            if let Some(cleaned) = clean_name(&s) {
                prop_assert_eq!(cleaned, cleaned.trim());
                prop_assert!(!cleaned.is_empty());
            }
        }
    }
}
