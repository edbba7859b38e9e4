//! Participant routes: listing, invitation and removal.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::participant::{
    AddParticipantsRequest, Participant, ParticipantRole, ParticipantsResponse,
    RemoveParticipantRequest,
};
use domain::services::authorization::{can, Operation};
use domain::services::notification::GroupActivityEvent;
use persistence::repositories::ParticipantRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::group_posts::load_post_and_membership;

/// List participants of a group post.
///
/// GET /api/v1/group-posts/:group_post_id/participants
pub async fn list_participants(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
) -> Result<Json<ParticipantsResponse>, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::ViewGroupPost {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    let repo = ParticipantRepository::new(state.pool.clone());
    let rows = repo.list_for_post(group_post_id).await?;

    Ok(Json(ParticipantsResponse {
        participants: rows.into_iter().map(Into::into).collect(),
    }))
}

/// Invite participants to a group post.
///
/// POST /api/v1/group-posts/:group_post_id/participants
///
/// A profile already on the post makes the whole batch fail with 409;
/// no id from the same request is inserted.
pub async fn add_participants(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
    Json(request): Json<AddParticipantsRequest>,
) -> Result<(StatusCode, Json<ParticipantsResponse>), ApiError> {
    if request.participant_ids.is_empty() {
        return Err(ApiError::Validation(
            "participant_ids must not be empty".to_string(),
        ));
    }

    let role = request.role.unwrap_or(ParticipantRole::Participant);
    if role == ParticipantRole::Creator {
        return Err(ApiError::Validation(
            "The creator role cannot be assigned".to_string(),
        ));
    }

    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::AddParticipants {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    let repo = ParticipantRepository::new(state.pool.clone());
    let inserted = repo
        .add_participants(group_post_id, &request.participant_ids, role.into())
        .await?;

    let notifier = state.notifier.clone();
    let event = GroupActivityEvent::ParticipantsInvited {
        group_post_id,
        invited_by: user_auth.profile_id,
        profile_ids: request.participant_ids.clone(),
    };
    tokio::spawn(async move { notifier.publish(event).await });

    info!(
        group_post_id = %group_post_id,
        invited_by = %user_auth.profile_id,
        invited_count = inserted.len(),
        role = %role,
        "Participants added"
    );

    let participants: Vec<Participant> = inserted.into_iter().map(Into::into).collect();

    Ok((StatusCode::CREATED, Json(ParticipantsResponse { participants })))
}

/// Remove a participant from a group post.
///
/// DELETE /api/v1/group-posts/:group_post_id/participants
///
/// The creator's row can never be removed. Score data owned by the
/// removed participant cascades away with the row.
pub async fn remove_participant(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
    Json(request): Json<RemoveParticipantRequest>,
) -> Result<StatusCode, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::RemoveParticipant {
            post: &post,
            membership: membership.as_ref(),
            target_profile_id: request.participant_id,
        },
    )?;

    let repo = ParticipantRepository::new(state.pool.clone());
    let rows_affected = repo
        .remove_participant(group_post_id, request.participant_id)
        .await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Participant not found".to_string()));
    }

    info!(
        group_post_id = %group_post_id,
        removed_profile_id = %request.participant_id,
        removed_by = %user_auth.profile_id,
        "Participant removed"
    );

    Ok(StatusCode::NO_CONTENT)
}
