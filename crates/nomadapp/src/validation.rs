//! Review input validation.
//!
//! The review store accepts any draft; these checks belong to whoever collects
//! the input (the CLI, a form handler). A valid review:
//! - Has a rating that was actually chosen (non-zero) and lies in `1..=5`
//! - Has a title that is not blank
//! - Has content that is not blank

use crate::model::{ReviewDraft, ReviewPatch};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Validates the user-supplied parts of a review.
///
/// # Examples
/// ```
/// use nomadapp::validation::validate_review;
///
/// assert!(validate_review(5, "Great city", "Fast internet").is_ok());
///
/// assert!(validate_review(0, "Great city", "Fast internet").is_err());
/// assert!(validate_review(6, "Great city", "Fast internet").is_err());
/// assert!(validate_review(4, "   ", "Fast internet").is_err());
/// assert!(validate_review(4, "Great city", "").is_err());
/// ```
pub fn validate_review(rating: u8, title: &str, content: &str) -> Result<(), ValidationError> {
    validate_rating(rating)?;
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

pub fn validate_draft(draft: &ReviewDraft) -> Result<(), ValidationError> {
    validate_review(draft.rating, &draft.title, &draft.content)
}

/// Only the fields present in the patch are checked.
pub fn validate_patch(patch: &ReviewPatch) -> Result<(), ValidationError> {
    if let Some(rating) = patch.rating {
        validate_rating(rating)?;
    }
    if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
        return Err(ValidationError::EmptyTitle);
    }
    if matches!(&patch.content, Some(content) if content.trim().is_empty()) {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    match rating {
        0 => Err(ValidationError::MissingRating),
        MIN_RATING..=MAX_RATING => Ok(()),
        other => Err(ValidationError::RatingOutOfRange(other)),
    }
}

/// Error type for review validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No rating was selected
    MissingRating,
    /// Rating outside 1..=5
    RatingOutOfRange(u8),
    /// Title is empty or whitespace
    EmptyTitle,
    /// Content is empty or whitespace
    EmptyContent,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRating => write!(f, "a rating must be selected"),
            ValidationError::RatingOutOfRange(rating) => write!(
                f,
                "rating must be between {} and {}, found {}",
                MIN_RATING, MAX_RATING, rating
            ),
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::EmptyContent => write!(f, "content cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
