//! Parsing of semicolon-delimited identifier lists (`"1;2;3"`).
//!
//! Empty segments and surrounding whitespace are tolerated. Any other token
//! that is not a positive `i32` rejects the whole list. Duplicates are
//! removed, keeping the first occurrence.

use std::collections::HashSet;

/// Separator between identifiers.
pub const ID_SEPARATOR: char = ';';

/// Reasons an identifier list can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdListError {
    /// The list contained no identifiers at all.
    #[error("at least one id is required")]
    Empty,

    /// A token was not an integer.
    #[error("'{0}' is not a valid id")]
    Malformed(String),

    /// A token was an integer but not a positive one.
    #[error("id {0} must be greater than zero")]
    NonPositive(i64),
}

/// Parse a `;`-delimited list of positive identifiers.
///
/// # Errors
///
/// Returns [`IdListError`] when the list is empty or a token is not a
/// positive integer.
///
/// # Examples
///
/// ```
/// use commerce_api_core::id_list::parse_id_list;
///
/// assert_eq!(parse_id_list(" 3; 1;;3 ").unwrap(), vec![3, 1]);
/// assert!(parse_id_list("1;x").is_err());
/// ```
pub fn parse_id_list(raw: &str) -> Result<Vec<i32>, IdListError> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for token in raw.split(ID_SEPARATOR).map(str::trim).filter(|t| !t.is_empty()) {
        let value: i64 = token
            .parse()
            .map_err(|_| IdListError::Malformed(token.to_string()))?;
        if value <= 0 {
            return Err(IdListError::NonPositive(value));
        }
        let id = i32::try_from(value).map_err(|_| IdListError::Malformed(token.to_string()))?;
        if seen.insert(id) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        return Err(IdListError::Empty);
    }
    Ok(ids)
}

/// Split a `;`-delimited list of free-form codes (coupon codes, SKUs).
///
/// Blank segments are dropped; the remaining codes are trimmed.
#[must_use]
pub fn split_codes(raw: &str) -> Vec<String> {
    raw.split(ID_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_simple_list() {
        assert_eq!(parse_id_list("1;2;3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_tolerates_whitespace_and_empty_segments() {
        assert_eq!(parse_id_list(";; 7 ;\t8;").unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_dedups_preserving_order() {
        assert_eq!(parse_id_list("5;2;5;2;9").unwrap(), vec![5, 2, 9]);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(parse_id_list(""), Err(IdListError::Empty));
        assert_eq!(parse_id_list(" ; ;"), Err(IdListError::Empty));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            parse_id_list("1;two;3"),
            Err(IdListError::Malformed("two".to_string()))
        );
        assert_eq!(
            parse_id_list("99999999999"),
            Err(IdListError::Malformed("99999999999".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(parse_id_list("1;0"), Err(IdListError::NonPositive(0)));
        assert_eq!(parse_id_list("-4"), Err(IdListError::NonPositive(-4)));
    }

    #[test]
    fn test_split_codes() {
        assert_eq!(split_codes(" SAVE10 ;;FREESHIP"), vec!["SAVE10", "FREESHIP"]);
        assert!(split_codes(" ; ").is_empty());
    }

    proptest! {
        #[test]
        fn prop_round_trips_positive_ids(ids in proptest::collection::vec(1i32..=i32::MAX, 1..20)) {
            let raw = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(";");
            let parsed = parse_id_list(&raw).unwrap();
            let mut expected = Vec::new();
            for id in ids {
                if !expected.contains(&id) {
                    expected.push(id);
                }
            }
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn prop_never_panics(raw in ".{0,64}") {
            let _ = parse_id_list(&raw);
        }
    }
}
