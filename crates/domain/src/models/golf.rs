//! Golf extension data models: the scorecard attached to a golf round
//! post and each participant's hole-by-hole scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Where a round was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GolfRoundType {
    Outdoor,
    Indoor,
}

impl GolfRoundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GolfRoundType::Outdoor => "outdoor",
            GolfRoundType::Indoor => "indoor",
        }
    }
}

impl FromStr for GolfRoundType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outdoor" => Ok(GolfRoundType::Outdoor),
            "indoor" => Ok(GolfRoundType::Indoor),
            _ => Err(format!("Invalid golf round type: {}", s)),
        }
    }
}

impl fmt::Display for GolfRoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The scorecard aggregate attached to a golf round post.
/// At most one exists per group post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GolfScorecard {
    pub id: Uuid,
    pub group_post_id: Uuid,
    pub course_name: String,
    pub course_id: Option<String>,
    pub round_type: GolfRoundType,
    pub holes_played: i32,
    pub tee_color: Option<String>,
    pub slope_rating: Option<i32>,
    pub course_rating: Option<f64>,
    pub weather_conditions: Option<String>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A participant's score record for the round. One-to-one with a
/// Participant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GolfParticipantScores {
    pub id: Uuid,
    pub participant_id: Uuid,
    /// Profile that entered the scores (may differ from the player).
    pub entered_by: Uuid,
    pub scores_confirmed: bool,
    pub total_score: i32,
    pub to_par: i32,
    pub holes_completed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The smallest unit of golf performance data: one participant's result
/// on one hole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GolfHoleScore {
    pub id: Uuid,
    pub participant_scores_id: Uuid,
    pub hole_number: i32,
    pub strokes: i32,
    pub putts: Option<i32>,
    pub fairway_hit: Option<bool>,
    pub green_in_regulation: Option<bool>,
}

/// Request payload for creating a scorecard.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateScorecardRequest {
    pub group_post_id: Uuid,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Course name must be between 1 and 200 characters"
    ))]
    pub course_name: String,

    #[validate(length(max = 100, message = "Course ID must be at most 100 characters"))]
    pub course_id: Option<String>,

    pub round_type: GolfRoundType,

    #[validate(custom(function = shared::validation::validate_holes_played))]
    pub holes_played: i32,

    #[validate(length(max = 50, message = "Tee color must be at most 50 characters"))]
    pub tee_color: Option<String>,

    #[validate(range(min = 55, max = 155, message = "Slope rating must be between 55 and 155"))]
    pub slope_rating: Option<i32>,

    pub course_rating: Option<f64>,

    #[validate(length(max = 200, message = "Weather must be at most 200 characters"))]
    pub weather_conditions: Option<String>,

    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// One hole's entry in a score submission.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct HoleScoreEntry {
    #[validate(custom(function = shared::validation::validate_hole_number))]
    pub hole_number: i32,

    #[validate(custom(function = shared::validation::validate_strokes))]
    pub strokes: i32,

    /// Putts are a subset of strokes; checked against `strokes` by the
    /// scoring rules, not here.
    pub putts: Option<i32>,

    pub fairway_hit: Option<bool>,
    pub green_in_regulation: Option<bool>,
}

/// Request payload for recording hole scores. Upserts by hole number.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RecordHoleScoresRequest {
    pub group_post_id: Uuid,

    /// Whose scores these are. Defaults to the caller's own
    /// participant row when omitted.
    pub participant_id: Option<Uuid>,

    #[validate(nested, length(min = 1, message = "At least one hole score is required"))]
    pub scores: Vec<HoleScoreEntry>,
}

/// Request payload for confirming (locking) a participant's scores.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConfirmScoresRequest {
    pub group_post_id: Uuid,
    pub participant_id: Option<Uuid>,
}

/// Request payload for unlocking a confirmed score record. Creator only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UnlockScoresRequest {
    pub group_post_id: Uuid,
    pub participant_id: Uuid,
}

/// Query parameters for fetching golf data by post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GolfDataQuery {
    pub group_post_id: Uuid,
}

/// Response wrapper for a scorecard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScorecardResponse {
    pub golf_data: GolfScorecard,
}

/// A participant's score record with its hole scores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ParticipantScoresResponse {
    pub participant_scores: GolfParticipantScores,
    pub hole_scores: Vec<GolfHoleScore>,
}

/// Response for listing all score records on a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListScoresResponse {
    pub scores: Vec<ParticipantScoresResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_scorecard_request() -> CreateScorecardRequest {
        CreateScorecardRequest {
            group_post_id: Uuid::new_v4(),
            course_name: "Pebble Beach".to_string(),
            course_id: None,
            round_type: GolfRoundType::Outdoor,
            holes_played: 18,
            tee_color: Some("blue".to_string()),
            slope_rating: Some(130),
            course_rating: Some(72.5),
            weather_conditions: None,
            temperature: None,
            wind_speed: None,
        }
    }

    #[test]
    fn test_round_type_from_str() {
        assert_eq!(
            GolfRoundType::from_str("outdoor").unwrap(),
            GolfRoundType::Outdoor
        );
        assert_eq!(
            GolfRoundType::from_str("Indoor").unwrap(),
            GolfRoundType::Indoor
        );
        assert!(GolfRoundType::from_str("simulator").is_err());
    }

    #[test]
    fn test_scorecard_request_valid() {
        assert!(base_scorecard_request().validate().is_ok());
    }

    #[test]
    fn test_scorecard_request_holes_out_of_range() {
        let mut request = base_scorecard_request();
        request.holes_played = 19;
        assert!(request.validate().is_err());

        request.holes_played = 0;
        assert!(request.validate().is_err());

        request.holes_played = 9;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_scorecard_request_empty_course_name() {
        let mut request = base_scorecard_request();
        request.course_name = "".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_hole_score_entry_bounds() {
        let entry = HoleScoreEntry {
            hole_number: 1,
            strokes: 4,
            putts: Some(2),
            fairway_hit: Some(true),
            green_in_regulation: None,
        };
        assert!(entry.validate().is_ok());

        let bad_hole = HoleScoreEntry {
            hole_number: 19,
            ..entry.clone()
        };
        assert!(bad_hole.validate().is_err());

        let bad_strokes = HoleScoreEntry {
            strokes: 16,
            ..entry
        };
        assert!(bad_strokes.validate().is_err());
    }

    #[test]
    fn test_record_request_requires_scores() {
        let request = RecordHoleScoresRequest {
            group_post_id: Uuid::new_v4(),
            participant_id: None,
            scores: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_record_request_validates_nested_entries() {
        let request = RecordHoleScoresRequest {
            group_post_id: Uuid::new_v4(),
            participant_id: None,
            scores: vec![HoleScoreEntry {
                hole_number: 0,
                strokes: 4,
                putts: None,
                fairway_hit: None,
                green_in_regulation: None,
            }],
        };
        assert!(request.validate().is_err());
    }
}
