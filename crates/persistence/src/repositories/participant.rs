//! Participant repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ParticipantEntity, ParticipantRoleDb, ParticipantStatusDb};
use crate::metrics::QueryTimer;

/// Repository for participant database operations.
#[derive(Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    /// Creates a new ParticipantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile's participant row on a post.
    pub async fn get_by_post_and_profile(
        &self,
        group_post_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<ParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_participant");
        let result = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            SELECT id, group_post_id, profile_id, role, status, attested_at, data_contributed, last_contribution, created_at, updated_at
            FROM participants
            WHERE group_post_id = $1 AND profile_id = $2
            "#,
        )
        .bind(group_post_id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get a participant row by its ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_participant_by_id");
        let result = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            SELECT id, group_post_id, profile_id, role, status, attested_at, data_contributed, last_contribution, created_at, updated_at
            FROM participants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all participants of a post, oldest membership first.
    pub async fn list_for_post(
        &self,
        group_post_id: Uuid,
    ) -> Result<Vec<ParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_participants");
        let result = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            SELECT id, group_post_id, profile_id, role, status, attested_at, data_contributed, last_contribution, created_at, updated_at
            FROM participants
            WHERE group_post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(group_post_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Bulk-insert pending participant rows.
    ///
    /// Runs in one transaction: if any profile is already on the post,
    /// the unique constraint aborts the whole batch and no row from the
    /// set is kept.
    pub async fn add_participants(
        &self,
        group_post_id: Uuid,
        profile_ids: &[Uuid],
        role: ParticipantRoleDb,
    ) -> Result<Vec<ParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("add_participants");

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(profile_ids.len());

        for profile_id in profile_ids {
            let participant = sqlx::query_as::<_, ParticipantEntity>(
                r#"
                INSERT INTO participants (group_post_id, profile_id, role)
                VALUES ($1, $2, $3)
                RETURNING id, group_post_id, profile_id, role, status, attested_at, data_contributed, last_contribution, created_at, updated_at
                "#,
            )
            .bind(group_post_id)
            .bind(profile_id)
            .bind(role)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(participant);
        }

        tx.commit().await?;
        timer.record();
        Ok(inserted)
    }

    /// Remove a participant row. Score data cascades via foreign keys.
    /// Callers guard against removing the creator row.
    pub async fn remove_participant(
        &self,
        group_post_id: Uuid,
        profile_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_participant");
        let result = sqlx::query(
            r#"
            DELETE FROM participants
            WHERE group_post_id = $1 AND profile_id = $2
            "#,
        )
        .bind(group_post_id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Persist an attestation transition computed by the state machine.
    pub async fn attest(
        &self,
        participant_id: Uuid,
        status: ParticipantStatusDb,
        attested_at: Option<DateTime<Utc>>,
    ) -> Result<ParticipantEntity, sqlx::Error> {
        let timer = QueryTimer::new("attest_participant");
        let result = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            UPDATE participants
            SET status = $2, attested_at = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, group_post_id, profile_id, role, status, attested_at, data_contributed, last_contribution, created_at, updated_at
            "#,
        )
        .bind(participant_id)
        .bind(status)
        .bind(attested_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark that the participant has contributed activity data.
    pub async fn mark_contributed(&self, participant_id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("mark_participant_contributed");
        sqlx::query(
            r#"
            UPDATE participants
            SET data_contributed = TRUE, last_contribution = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(participant_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }
}
