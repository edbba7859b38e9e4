//! Common validation utilities.

use validator::ValidationError;

/// Holes on a regulation golf course.
pub const MAX_HOLES: i32 = 18;

/// Upper bound on strokes recorded for a single hole.
pub const MAX_STROKES: i32 = 15;

/// Validates that a hole number is within valid range (1 to 18).
pub fn validate_hole_number(hole_number: i32) -> Result<(), ValidationError> {
    if (1..=MAX_HOLES).contains(&hole_number) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hole_number_range");
        err.message = Some("Hole number must be between 1 and 18".into());
        Err(err)
    }
}

/// Validates that a holes_played count is within valid range (1 to 18).
pub fn validate_holes_played(holes_played: i32) -> Result<(), ValidationError> {
    if (1..=MAX_HOLES).contains(&holes_played) {
        Ok(())
    } else {
        let mut err = ValidationError::new("holes_played_range");
        err.message = Some("Holes played must be between 1 and 18".into());
        Err(err)
    }
}

/// Validates that a stroke count is within valid range (1 to 15).
pub fn validate_strokes(strokes: i32) -> Result<(), ValidationError> {
    if (1..=MAX_STROKES).contains(&strokes) {
        Ok(())
    } else {
        let mut err = ValidationError::new("strokes_range");
        err.message = Some("Strokes must be between 1 and 15".into());
        Err(err)
    }
}

/// Validates that a title is non-empty after trimming.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title_empty");
        err.message = Some("Title must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
