//! Golf extension repository: scorecards, participant score records and
//! hole scores.

use domain::models::golf::HoleScoreEntry;
use domain::services::scoring::Totals;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    GolfHoleScoreEntity, GolfParticipantScoresEntity, GolfRoundTypeDb, GolfScorecardEntity,
};
use crate::metrics::QueryTimer;

/// Repository for golf extension data database operations.
#[derive(Clone)]
pub struct GolfRepository {
    pool: PgPool,
}

impl GolfRepository {
    /// Creates a new GolfRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the scorecard for a post.
    ///
    /// The unique constraint on group_post_id makes a second attempt fail
    /// with a uniqueness violation; the caller surfaces it as a conflict.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_scorecard(
        &self,
        group_post_id: Uuid,
        course_name: &str,
        course_id: Option<&str>,
        round_type: GolfRoundTypeDb,
        holes_played: i32,
        tee_color: Option<&str>,
        slope_rating: Option<i32>,
        course_rating: Option<f64>,
        weather_conditions: Option<&str>,
        temperature: Option<f64>,
        wind_speed: Option<f64>,
    ) -> Result<GolfScorecardEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_golf_scorecard");
        let result = sqlx::query_as::<_, GolfScorecardEntity>(
            r#"
            INSERT INTO golf_scorecards (group_post_id, course_name, course_id, round_type, holes_played, tee_color, slope_rating, course_rating, weather_conditions, temperature, wind_speed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, group_post_id, course_name, course_id, round_type, holes_played, tee_color, slope_rating, course_rating, weather_conditions, temperature, wind_speed, created_at, updated_at
            "#,
        )
        .bind(group_post_id)
        .bind(course_name)
        .bind(course_id)
        .bind(round_type)
        .bind(holes_played)
        .bind(tee_color)
        .bind(slope_rating)
        .bind(course_rating)
        .bind(weather_conditions)
        .bind(temperature)
        .bind(wind_speed)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get the scorecard attached to a post.
    pub async fn get_scorecard_by_post(
        &self,
        group_post_id: Uuid,
    ) -> Result<Option<GolfScorecardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_golf_scorecard");
        let result = sqlx::query_as::<_, GolfScorecardEntity>(
            r#"
            SELECT id, group_post_id, course_name, course_id, round_type, holes_played, tee_color, slope_rating, course_rating, weather_conditions, temperature, wind_speed, created_at, updated_at
            FROM golf_scorecards
            WHERE group_post_id = $1
            "#,
        )
        .bind(group_post_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get a participant's score record.
    pub async fn get_scores_for_participant(
        &self,
        participant_id: Uuid,
    ) -> Result<Option<GolfParticipantScoresEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_participant_scores");
        let result = sqlx::query_as::<_, GolfParticipantScoresEntity>(
            r#"
            SELECT id, participant_id, entered_by, scores_confirmed, total_score, to_par, holes_completed, created_at, updated_at
            FROM golf_participant_scores
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get the score record for a participant, creating an empty one on
    /// first use. `entered_by` is only written on creation; an existing
    /// record keeps its original recorder.
    pub async fn get_or_create_scores(
        &self,
        participant_id: Uuid,
        entered_by: Uuid,
    ) -> Result<GolfParticipantScoresEntity, sqlx::Error> {
        let timer = QueryTimer::new("get_or_create_participant_scores");
        let result = sqlx::query_as::<_, GolfParticipantScoresEntity>(
            r#"
            INSERT INTO golf_participant_scores (participant_id, entered_by)
            VALUES ($1, $2)
            ON CONFLICT (participant_id) DO UPDATE SET updated_at = NOW()
            RETURNING id, participant_id, entered_by, scores_confirmed, total_score, to_par, holes_completed, created_at, updated_at
            "#,
        )
        .bind(participant_id)
        .bind(entered_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert hole scores keyed by (participant_scores_id, hole_number).
    ///
    /// Resubmitting a hole overwrites the previous entry rather than
    /// duplicating it. The batch runs in one transaction.
    pub async fn upsert_hole_scores(
        &self,
        participant_scores_id: Uuid,
        entries: &[HoleScoreEntry],
    ) -> Result<Vec<GolfHoleScoreEntity>, sqlx::Error> {
        let timer = QueryTimer::new("upsert_hole_scores");

        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(entries.len());

        for entry in entries {
            let row = sqlx::query_as::<_, GolfHoleScoreEntity>(
                r#"
                INSERT INTO golf_hole_scores (participant_scores_id, hole_number, strokes, putts, fairway_hit, green_in_regulation)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (participant_scores_id, hole_number) DO UPDATE
                SET strokes = EXCLUDED.strokes,
                    putts = EXCLUDED.putts,
                    fairway_hit = EXCLUDED.fairway_hit,
                    green_in_regulation = EXCLUDED.green_in_regulation
                RETURNING id, participant_scores_id, hole_number, strokes, putts, fairway_hit, green_in_regulation
                "#,
            )
            .bind(participant_scores_id)
            .bind(entry.hole_number)
            .bind(entry.strokes)
            .bind(entry.putts)
            .bind(entry.fairway_hit)
            .bind(entry.green_in_regulation)
            .fetch_one(&mut *tx)
            .await?;

            rows.push(row);
        }

        tx.commit().await?;
        timer.record();
        Ok(rows)
    }

    /// List a score record's hole scores in course order.
    pub async fn list_hole_scores(
        &self,
        participant_scores_id: Uuid,
    ) -> Result<Vec<GolfHoleScoreEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_hole_scores");
        let result = sqlx::query_as::<_, GolfHoleScoreEntity>(
            r#"
            SELECT id, participant_scores_id, hole_number, strokes, putts, fairway_hit, green_in_regulation
            FROM golf_hole_scores
            WHERE participant_scores_id = $1
            ORDER BY hole_number ASC
            "#,
        )
        .bind(participant_scores_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Persist recomputed totals and lock the record.
    pub async fn confirm_scores(
        &self,
        participant_scores_id: Uuid,
        totals: Totals,
    ) -> Result<GolfParticipantScoresEntity, sqlx::Error> {
        let timer = QueryTimer::new("confirm_participant_scores");
        let result = sqlx::query_as::<_, GolfParticipantScoresEntity>(
            r#"
            UPDATE golf_participant_scores
            SET scores_confirmed = TRUE,
                total_score = $2,
                to_par = $3,
                holes_completed = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, participant_id, entered_by, scores_confirmed, total_score, to_par, holes_completed, created_at, updated_at
            "#,
        )
        .bind(participant_scores_id)
        .bind(totals.total_score)
        .bind(totals.to_par)
        .bind(totals.holes_completed)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Unlock a confirmed score record for correction.
    pub async fn unlock_scores(
        &self,
        participant_scores_id: Uuid,
    ) -> Result<GolfParticipantScoresEntity, sqlx::Error> {
        let timer = QueryTimer::new("unlock_participant_scores");
        let result = sqlx::query_as::<_, GolfParticipantScoresEntity>(
            r#"
            UPDATE golf_participant_scores
            SET scores_confirmed = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, participant_id, entered_by, scores_confirmed, total_score, to_par, holes_completed, created_at, updated_at
            "#,
        )
        .bind(participant_scores_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List every score record on a post, joined through participants.
    pub async fn list_scores_for_post(
        &self,
        group_post_id: Uuid,
    ) -> Result<Vec<GolfParticipantScoresEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_scores_for_post");
        let result = sqlx::query_as::<_, GolfParticipantScoresEntity>(
            r#"
            SELECT s.id, s.participant_id, s.entered_by, s.scores_confirmed, s.total_score, s.to_par, s.holes_completed, s.created_at, s.updated_at
            FROM golf_participant_scores s
            JOIN participants p ON s.participant_id = p.id
            WHERE p.group_post_id = $1
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(group_post_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
