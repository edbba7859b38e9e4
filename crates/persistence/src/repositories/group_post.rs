//! Group post repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GroupPostEntity, GroupPostStatusDb, GroupPostTypeDb, GroupPostVisibilityDb};
use crate::metrics::QueryTimer;

/// Repository for group post database operations.
#[derive(Clone)]
pub struct GroupPostRepository {
    pool: PgPool,
}

impl GroupPostRepository {
    /// Creates a new GroupPostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new group post and its creator participant row.
    ///
    /// The two inserts are separate writes, not one transaction: a post
    /// whose creator-participant insert failed still exists, and a
    /// concurrent reader may observe the post before the creator row.
    /// The second-write failure is logged and swallowed; callers must
    /// tolerate a post temporarily missing its creator participant.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_post(
        &self,
        creator_id: Uuid,
        post_type: GroupPostTypeDb,
        title: &str,
        description: Option<&str>,
        date: DateTime<Utc>,
        location: Option<&str>,
        visibility: GroupPostVisibilityDb,
        social_post_id: Option<Uuid>,
    ) -> Result<GroupPostEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_group_post");

        let post = sqlx::query_as::<_, GroupPostEntity>(
            r#"
            INSERT INTO group_posts (creator_id, post_type, title, description, date, location, visibility, social_post_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, creator_id, post_type, title, description, date, location, visibility, status, social_post_id, created_at, updated_at
            "#,
        )
        .bind(creator_id)
        .bind(post_type)
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(location)
        .bind(visibility)
        .bind(social_post_id)
        .fetch_one(&self.pool)
        .await?;

        let creator_row = sqlx::query(
            r#"
            INSERT INTO participants (group_post_id, profile_id, role, status, attested_at)
            VALUES ($1, $2, 'creator', 'confirmed', NOW())
            "#,
        )
        .bind(post.id)
        .bind(creator_id)
        .execute(&self.pool)
        .await;

        if let Err(e) = creator_row {
            tracing::warn!(
                group_post_id = %post.id,
                creator_id = %creator_id,
                error = %e,
                "Creator participant insert failed after post creation"
            );
        }

        timer.record();
        Ok(post)
    }

    /// Find a group post by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupPostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_group_post_by_id");
        let result = sqlx::query_as::<_, GroupPostEntity>(
            r#"
            SELECT id, creator_id, post_type, title, description, date, location, visibility, status, social_post_id, created_at, updated_at
            FROM group_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List group posts the viewer may see, newest activity date first.
    ///
    /// Visibility: public posts, the viewer's own posts, and
    /// participants_only posts where the viewer has a participant row.
    /// Private posts of other creators never appear.
    ///
    /// The cursor is an exclusive `(date, id)` anchor; pass `limit + 1`
    /// to detect whether more rows follow.
    pub async fn list_visible(
        &self,
        viewer_id: Uuid,
        type_filter: Option<&str>,
        status_filter: Option<&str>,
        cursor: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<GroupPostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_visible_group_posts");
        let (cursor_date, cursor_id) = match cursor {
            Some((date, id)) => (Some(date), Some(id)),
            None => (None, None),
        };

        let result = sqlx::query_as::<_, GroupPostEntity>(
            r#"
            SELECT g.id, g.creator_id, g.post_type, g.title, g.description, g.date, g.location,
                   g.visibility, g.status, g.social_post_id, g.created_at, g.updated_at
            FROM group_posts g
            WHERE (
                g.visibility = 'public'
                OR g.creator_id = $1
                OR (
                    g.visibility = 'participants_only'
                    AND EXISTS (
                        SELECT 1 FROM participants p
                        WHERE p.group_post_id = g.id AND p.profile_id = $1
                    )
                )
            )
            AND ($2::text IS NULL OR g.post_type::text = $2)
            AND ($3::text IS NULL OR g.status::text = $3)
            AND ($4::timestamptz IS NULL OR (g.date, g.id) < ($4, $5))
            ORDER BY g.date DESC, g.id DESC
            LIMIT $6
            "#,
        )
        .bind(viewer_id)
        .bind(type_filter)
        .bind(status_filter)
        .bind(cursor_date)
        .bind(cursor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Partial update of the mutable fields. `creator_id` and
    /// `post_type` are never touched.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_post(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        date: Option<DateTime<Utc>>,
        location: Option<&str>,
        visibility: Option<GroupPostVisibilityDb>,
        status: Option<GroupPostStatusDb>,
    ) -> Result<GroupPostEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_group_post");

        let result = sqlx::query_as::<_, GroupPostEntity>(
            r#"
            UPDATE group_posts
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                location = COALESCE($5, location),
                visibility = COALESCE($6, visibility),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, creator_id, post_type, title, description, date, location, visibility, status, social_post_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(location)
        .bind(visibility)
        .bind(status)
        .fetch_one(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Delete a group post. Foreign keys cascade the delete to
    /// participants, the scorecard and all score data.
    pub async fn delete_post(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_group_post");
        let result = sqlx::query(
            r#"
            DELETE FROM group_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
