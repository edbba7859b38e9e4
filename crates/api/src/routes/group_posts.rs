//! Group post routes: creation, listing, detail, update and deletion.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::group_post::{
    CreateGroupPostRequest, GroupPost, GroupPostResponse, GroupPostStatus, GroupPostType,
    GroupPostVisibility, ListGroupPostsQuery, ListGroupPostsResponse, UpdateGroupPostRequest,
};
use domain::models::participant::Participant;
use domain::services::authorization::{can, Operation};
use domain::services::notification::GroupActivityEvent;
use persistence::repositories::{GroupPostRepository, ParticipantRepository};
use shared::pagination::{decode_cursor, encode_cursor};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_group_post_created;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Loads a post with the actor's participant row, as domain models.
///
/// Returns not-found when the post does not exist; visibility is the
/// guard's concern.
pub(crate) async fn load_post_and_membership(
    state: &AppState,
    group_post_id: Uuid,
    profile_id: Uuid,
) -> Result<(GroupPost, Option<Participant>), ApiError> {
    let posts = GroupPostRepository::new(state.pool.clone());
    let participants = ParticipantRepository::new(state.pool.clone());

    let post = posts
        .find_by_id(group_post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group post not found".to_string()))?;

    let membership = participants
        .get_by_post_and_profile(group_post_id, profile_id)
        .await?;

    Ok((post.into(), membership.map(Into::into)))
}

/// Create a new group post.
///
/// POST /api/v1/group-posts
///
/// The creator's participant row is written as a second, non-atomic
/// step; its failure is logged by the repository and does not fail the
/// request.
pub async fn create_group_post(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateGroupPostRequest>,
) -> Result<(StatusCode, Json<GroupPostResponse>), ApiError> {
    request.validate()?;
    can(user_auth.profile_id, &Operation::CreateGroupPost)?;

    let posts = GroupPostRepository::new(state.pool.clone());

    let visibility = request
        .visibility
        .unwrap_or(GroupPostVisibility::Public);

    let post = posts
        .create_post(
            user_auth.profile_id,
            request.post_type.into(),
            &request.title,
            request.description.as_deref(),
            request.date,
            request.location.as_deref(),
            visibility.into(),
            request.social_post_id,
        )
        .await?;

    // Invite any profiles named at creation time. The batch is
    // best-effort: the post already exists, so a failed invite batch is
    // logged rather than failing the request.
    let mut seen = std::collections::HashSet::new();
    let invited: Vec<Uuid> = request
        .participant_ids
        .unwrap_or_default()
        .into_iter()
        .filter(|id| *id != user_auth.profile_id && seen.insert(*id))
        .collect();

    if !invited.is_empty() {
        let participants = ParticipantRepository::new(state.pool.clone());
        match participants
            .add_participants(
                post.id,
                &invited,
                domain::models::ParticipantRole::Participant.into(),
            )
            .await
        {
            Ok(_) => {
                let notifier = state.notifier.clone();
                let event = GroupActivityEvent::ParticipantsInvited {
                    group_post_id: post.id,
                    invited_by: user_auth.profile_id,
                    profile_ids: invited,
                };
                tokio::spawn(async move { notifier.publish(event).await });
            }
            Err(e) => {
                tracing::warn!(
                    group_post_id = %post.id,
                    error = %e,
                    "Failed to invite participants at post creation"
                );
            }
        }
    }

    record_group_post_created(request.post_type.as_str());

    info!(
        group_post_id = %post.id,
        creator_id = %user_auth.profile_id,
        post_type = %request.post_type,
        "Group post created"
    );

    Ok((
        StatusCode::CREATED,
        Json(GroupPostResponse {
            group_post: post.into(),
        }),
    ))
}

/// List group posts visible to the caller.
///
/// GET /api/v1/group-posts?type&status&limit&cursor
pub async fn list_group_posts(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<ListGroupPostsQuery>,
) -> Result<Json<ListGroupPostsResponse>, ApiError> {
    // Reject unknown filter values up front rather than returning an
    // empty list.
    if let Some(ref t) = query.post_type {
        GroupPostType::from_str(t).map_err(ApiError::Validation)?;
    }
    if let Some(ref s) = query.status {
        GroupPostStatus::from_str(s).map_err(ApiError::Validation)?;
    }

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let cursor = match query.cursor.as_deref() {
        Some(raw) => Some(decode_cursor(raw)?),
        None => None,
    };

    let posts = GroupPostRepository::new(state.pool.clone());
    let mut rows = posts
        .list_visible(
            user_auth.profile_id,
            query.post_type.as_deref(),
            query.status.as_deref(),
            cursor,
            limit + 1,
        )
        .await?;

    let has_more = rows.len() as i64 > limit;
    rows.truncate(limit as usize);

    let next_cursor = if has_more {
        rows.last().map(|p| encode_cursor(p.date, p.id))
    } else {
        None
    };

    let group_posts: Vec<GroupPost> = rows.into_iter().map(Into::into).collect();

    info!(
        profile_id = %user_auth.profile_id,
        count = group_posts.len(),
        has_more = has_more,
        "Listed group posts"
    );

    Ok(Json(ListGroupPostsResponse {
        group_posts,
        has_more,
        next_cursor,
    }))
}

/// Get a group post.
///
/// GET /api/v1/group-posts/:group_post_id
pub async fn get_group_post(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
) -> Result<Json<GroupPostResponse>, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::ViewGroupPost {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    Ok(Json(GroupPostResponse { group_post: post }))
}

/// Update a group post. Creator only; type and creator never change.
///
/// PATCH /api/v1/group-posts/:group_post_id
pub async fn update_group_post(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
    Json(request): Json<UpdateGroupPostRequest>,
) -> Result<Json<GroupPostResponse>, ApiError> {
    request.validate()?;
    if request.is_empty() {
        return Err(ApiError::Validation(
            "At least one field must be provided".to_string(),
        ));
    }

    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::UpdateGroupPost {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    let posts = GroupPostRepository::new(state.pool.clone());
    let updated = posts
        .update_post(
            group_post_id,
            request.title.as_deref(),
            request.description.as_deref(),
            request.date,
            request.location.as_deref(),
            request.visibility.map(Into::into),
            request.status.map(Into::into),
        )
        .await?;

    info!(
        group_post_id = %group_post_id,
        profile_id = %user_auth.profile_id,
        "Group post updated"
    );

    Ok(Json(GroupPostResponse {
        group_post: updated.into(),
    }))
}

/// Delete a group post. Cascades to participants, extension data and
/// all score data.
///
/// DELETE /api/v1/group-posts/:group_post_id
pub async fn delete_group_post(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::DeleteGroupPost {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    let posts = GroupPostRepository::new(state.pool.clone());
    let rows_affected = posts.delete_post(group_post_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Group post not found".to_string()));
    }

    info!(
        group_post_id = %group_post_id,
        profile_id = %user_auth.profile_id,
        "Group post deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
