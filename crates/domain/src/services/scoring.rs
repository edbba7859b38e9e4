//! Golf scoring rules: batch validation and totals.

use thiserror::Error;

use crate::models::golf::{GolfHoleScore, HoleScoreEntry};

/// Par assumed per hole when computing to_par. Hole scores carry no
/// per-hole par, so totals are relative to a par-4 baseline.
pub const PAR_PER_HOLE: i32 = 4;

/// Error raised by score batch validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Hole {0} appears more than once in the submission")]
    DuplicateHole(i32),

    #[error("Hole {hole_number}: putts ({putts}) cannot exceed strokes ({strokes})")]
    PuttsExceedStrokes {
        hole_number: i32,
        putts: i32,
        strokes: i32,
    },

    #[error("Hole {hole_number}: putts cannot be negative")]
    NegativePutts { hole_number: i32 },
}

/// Aggregate totals over a participant's recorded holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub total_score: i32,
    pub to_par: i32,
    pub holes_completed: i32,
}

/// Validates the cross-field rules of a score submission: no duplicate
/// hole numbers, putts within [0, strokes]. Field ranges (hole 1-18,
/// strokes 1-15) are enforced by the request DTO.
pub fn validate_entries(entries: &[HoleScoreEntry]) -> Result<(), ScoringError> {
    let mut seen = std::collections::HashSet::new();

    for entry in entries {
        if !seen.insert(entry.hole_number) {
            return Err(ScoringError::DuplicateHole(entry.hole_number));
        }
        if let Some(putts) = entry.putts {
            if putts < 0 {
                return Err(ScoringError::NegativePutts {
                    hole_number: entry.hole_number,
                });
            }
            if putts > entry.strokes {
                return Err(ScoringError::PuttsExceedStrokes {
                    hole_number: entry.hole_number,
                    putts,
                    strokes: entry.strokes,
                });
            }
        }
    }

    Ok(())
}

/// Computes totals from the recorded holes.
pub fn compute_totals(hole_scores: &[GolfHoleScore]) -> Totals {
    let total_score: i32 = hole_scores.iter().map(|h| h.strokes).sum();
    let holes_completed = hole_scores.len() as i32;
    let to_par = total_score - PAR_PER_HOLE * holes_completed;

    Totals {
        total_score,
        to_par,
        holes_completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(hole_number: i32, strokes: i32, putts: Option<i32>) -> HoleScoreEntry {
        HoleScoreEntry {
            hole_number,
            strokes,
            putts,
            fairway_hit: None,
            green_in_regulation: None,
        }
    }

    fn hole(hole_number: i32, strokes: i32) -> GolfHoleScore {
        GolfHoleScore {
            id: Uuid::new_v4(),
            participant_scores_id: Uuid::new_v4(),
            hole_number,
            strokes,
            putts: None,
            fairway_hit: None,
            green_in_regulation: None,
        }
    }

    #[test]
    fn test_valid_batch() {
        let entries = vec![entry(1, 4, Some(2)), entry(2, 5, None), entry(3, 3, Some(1))];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn test_duplicate_hole_rejected() {
        let entries = vec![entry(7, 4, None), entry(7, 5, None)];
        assert_eq!(
            validate_entries(&entries),
            Err(ScoringError::DuplicateHole(7))
        );
    }

    #[test]
    fn test_putts_exceeding_strokes_rejected() {
        let entries = vec![entry(3, 4, Some(5))];
        assert!(matches!(
            validate_entries(&entries),
            Err(ScoringError::PuttsExceedStrokes { hole_number: 3, .. })
        ));
    }

    #[test]
    fn test_putts_equal_strokes_allowed() {
        let entries = vec![entry(3, 4, Some(4))];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn test_zero_putts_allowed() {
        let entries = vec![entry(1, 1, Some(0))];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn test_totals_empty() {
        let totals = compute_totals(&[]);
        assert_eq!(
            totals,
            Totals {
                total_score: 0,
                to_par: 0,
                holes_completed: 0
            }
        );
    }

    #[test]
    fn test_totals_even_par() {
        let holes: Vec<_> = (1..=9).map(|n| hole(n, 4)).collect();
        let totals = compute_totals(&holes);
        assert_eq!(totals.total_score, 36);
        assert_eq!(totals.to_par, 0);
        assert_eq!(totals.holes_completed, 9);
    }

    #[test]
    fn test_totals_over_and_under() {
        let holes = vec![hole(1, 5), hole(2, 3), hole(3, 6)];
        let totals = compute_totals(&holes);
        assert_eq!(totals.total_score, 14);
        assert_eq!(totals.to_par, 2);
        assert_eq!(totals.holes_completed, 3);
    }
}
