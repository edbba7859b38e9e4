//! Attestation routes: a participant confirming, declining or
//! tentatively acknowledging their participation.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use domain::models::participant::{AttestRequest, AttestResponse, Participant};
use domain::services::attestation::apply_attestation;
use domain::services::authorization::{can, Operation};
use domain::services::notification::GroupActivityEvent;
use persistence::repositories::ParticipantRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_attestation;
use crate::routes::group_posts::load_post_and_membership;

/// Response wrapper for the caller's own attestation state.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttestationStateResponse {
    pub participant: Participant,
}

/// Get the caller's attestation state on a post.
///
/// GET /api/v1/group-posts/:group_post_id/attest
///
/// 404 when the caller is not a participant; membership is not
/// distinguished from absence.
pub async fn get_attestation(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
) -> Result<Json<AttestationStateResponse>, ApiError> {
    let (_post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::Attest {
            membership: membership.as_ref(),
        },
    )?;

    let participant = membership.ok_or_else(|| {
        ApiError::NotFound("You are not a participant of this group post".to_string())
    })?;

    Ok(Json(AttestationStateResponse { participant }))
}

/// Attest participation.
///
/// POST /api/v1/group-posts/:group_post_id/attest
///
/// Re-attestation is always allowed; there is no terminal state.
pub async fn attest(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_post_id): Path<Uuid>,
    Json(request): Json<AttestRequest>,
) -> Result<Json<AttestResponse>, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::Attest {
            membership: membership.as_ref(),
        },
    )?;

    let participant = membership.ok_or_else(|| {
        ApiError::NotFound("You are not a participant of this group post".to_string())
    })?;

    let transition = apply_attestation(&participant, request.status, Utc::now())?;

    let repo = ParticipantRepository::new(state.pool.clone());
    let updated = repo
        .attest(
            participant.id,
            transition.status.into(),
            transition.attested_at,
        )
        .await?;

    record_attestation(transition.status.as_str());

    let notifier = state.notifier.clone();
    let event = GroupActivityEvent::ParticipantAttested {
        group_post_id,
        profile_id: user_auth.profile_id,
        status: transition.status,
    };
    tokio::spawn(async move { notifier.publish(event).await });

    info!(
        group_post_id = %group_post_id,
        profile_id = %user_auth.profile_id,
        status = %transition.status,
        "Participant attested"
    );

    Ok(Json(AttestResponse {
        participant: updated.into(),
        group_post: post,
    }))
}
