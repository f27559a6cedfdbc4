//! Field rules a record must satisfy before it is submitted.

use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted star ratings.
pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// A record failed the input-layer checks. Raised before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The rating lies outside [`RATING_RANGE`].
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),
}

pub(crate) fn validate_fields(title: &str, author: &str, rating: i64) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingField("Title"));
    }
    if author.trim().is_empty() {
        return Err(ValidationError::MissingField("Author"));
    }
    if !RATING_RANGE.contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_complete_fields() {
        assert_eq!(validate_fields("Dune", "Herbert", 1), Ok(()));
        assert_eq!(validate_fields("Dune", "Herbert", 5), Ok(()));
    }

    #[test]
    fn test_title_checked_before_author() {
        assert_eq!(
            validate_fields("", "", 3),
            Err(ValidationError::MissingField("Title"))
        );
        assert_eq!(
            validate_fields("Dune", "  ", 3),
            Err(ValidationError::MissingField("Author"))
        );
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(
            validate_fields("Dune", "Herbert", 0),
            Err(ValidationError::RatingOutOfRange(0))
        );
        assert_eq!(
            validate_fields("Dune", "Herbert", 6),
            Err(ValidationError::RatingOutOfRange(6))
        );
    }
}
