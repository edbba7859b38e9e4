//! Golf extension entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::golf::GolfRoundType;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the golf_round_type PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "golf_round_type", rename_all = "lowercase")]
pub enum GolfRoundTypeDb {
    Outdoor,
    Indoor,
}

impl From<GolfRoundTypeDb> for GolfRoundType {
    fn from(db: GolfRoundTypeDb) -> Self {
        match db {
            GolfRoundTypeDb::Outdoor => GolfRoundType::Outdoor,
            GolfRoundTypeDb::Indoor => GolfRoundType::Indoor,
        }
    }
}

impl From<GolfRoundType> for GolfRoundTypeDb {
    fn from(t: GolfRoundType) -> Self {
        match t {
            GolfRoundType::Outdoor => GolfRoundTypeDb::Outdoor,
            GolfRoundType::Indoor => GolfRoundTypeDb::Indoor,
        }
    }
}

/// Database row mapping for the golf_scorecards table.
#[derive(Debug, Clone, FromRow)]
pub struct GolfScorecardEntity {
    pub id: Uuid,
    pub group_post_id: Uuid,
    pub course_name: String,
    pub course_id: Option<String>,
    pub round_type: GolfRoundTypeDb,
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

impl From<GolfScorecardEntity> for domain::models::GolfScorecard {
    fn from(entity: GolfScorecardEntity) -> Self {
        Self {
            id: entity.id,
            group_post_id: entity.group_post_id,
            course_name: entity.course_name,
            course_id: entity.course_id,
            round_type: entity.round_type.into(),
            holes_played: entity.holes_played,
            tee_color: entity.tee_color,
            slope_rating: entity.slope_rating,
            course_rating: entity.course_rating,
            weather_conditions: entity.weather_conditions,
            temperature: entity.temperature,
            wind_speed: entity.wind_speed,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the golf_participant_scores table.
#[derive(Debug, Clone, FromRow)]
pub struct GolfParticipantScoresEntity {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub entered_by: Uuid,
    pub scores_confirmed: bool,
    pub total_score: i32,
    pub to_par: i32,
    pub holes_completed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GolfParticipantScoresEntity> for domain::models::GolfParticipantScores {
    fn from(entity: GolfParticipantScoresEntity) -> Self {
        Self {
            id: entity.id,
            participant_id: entity.participant_id,
            entered_by: entity.entered_by,
            scores_confirmed: entity.scores_confirmed,
            total_score: entity.total_score,
            to_par: entity.to_par,
            holes_completed: entity.holes_completed,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the golf_hole_scores table.
#[derive(Debug, Clone, FromRow)]
pub struct GolfHoleScoreEntity {
    pub id: Uuid,
    pub participant_scores_id: Uuid,
    pub hole_number: i32,
    pub strokes: i32,
    pub putts: Option<i32>,
    pub fairway_hit: Option<bool>,
    pub green_in_regulation: Option<bool>,
}

impl From<GolfHoleScoreEntity> for domain::models::GolfHoleScore {
    fn from(entity: GolfHoleScoreEntity) -> Self {
        Self {
            id: entity.id,
            participant_scores_id: entity.participant_scores_id,
            hole_number: entity.hole_number,
            strokes: entity.strokes,
            putts: entity.putts,
            fairway_hit: entity.fairway_hit,
            green_in_regulation: entity.green_in_regulation,
        }
    }
}
