//! Golf extension routes: the scorecard attached to a golf round post
//! and each participant's hole-by-hole scores.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::golf::{
    ConfirmScoresRequest, CreateScorecardRequest, GolfDataQuery, ListScoresResponse,
    ParticipantScoresResponse, RecordHoleScoresRequest, ScorecardResponse, UnlockScoresRequest,
};
use domain::models::group_post::GroupPost;
use domain::models::participant::Participant;
use domain::services::authorization::{can, Operation};
use domain::services::scoring::{compute_totals, validate_entries};
use persistence::repositories::{GolfRepository, ParticipantRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::routes::group_posts::load_post_and_membership;

/// Resolves which participant a score operation targets: the explicit
/// `participant_id` when given, otherwise the caller's own row.
async fn resolve_target_participant(
    state: &AppState,
    post: &GroupPost,
    actor: Uuid,
    participant_id: Option<Uuid>,
) -> Result<Participant, ApiError> {
    let repo = ParticipantRepository::new(state.pool.clone());

    match participant_id {
        Some(id) => {
            let participant = repo
                .get_by_id(id)
                .await?
                .filter(|p| p.group_post_id == post.id)
                .ok_or_else(|| ApiError::NotFound("Participant not found".to_string()))?;
            Ok(participant.into())
        }
        None => {
            let participant = repo
                .get_by_post_and_profile(post.id, actor)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(
                        "You are not a participant of this group post".to_string(),
                    )
                })?;
            Ok(participant.into())
        }
    }
}

/// Create the scorecard for a golf round post.
///
/// POST /api/v1/golf/scorecards
///
/// Exactly one scorecard may exist per post; a second attempt is a 409,
/// never an overwrite.
pub async fn create_scorecard(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateScorecardRequest>,
) -> Result<(StatusCode, Json<ScorecardResponse>), ApiError> {
    request.validate()?;

    let (post, _membership) =
        load_post_and_membership(&state, request.group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::CreateExtensionData { post: &post },
    )?;

    if !post.post_type.supports_golf_scorecard() {
        return Err(ApiError::Validation(format!(
            "Golf scorecards require a golf_round post, got {}",
            post.post_type
        )));
    }

    let repo = GolfRepository::new(state.pool.clone());
    let scorecard = repo
        .create_scorecard(
            request.group_post_id,
            &request.course_name,
            request.course_id.as_deref(),
            request.round_type.into(),
            request.holes_played,
            request.tee_color.as_deref(),
            request.slope_rating,
            request.course_rating,
            request.weather_conditions.as_deref(),
            request.temperature,
            request.wind_speed,
        )
        .await?;

    info!(
        group_post_id = %request.group_post_id,
        creator_id = %user_auth.profile_id,
        course_name = %request.course_name,
        "Golf scorecard created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ScorecardResponse {
            golf_data: scorecard.into(),
        }),
    ))
}

/// Get the scorecard attached to a post.
///
/// GET /api/v1/golf/scorecards?group_post_id
pub async fn get_scorecard(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<GolfDataQuery>,
) -> Result<Json<ScorecardResponse>, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, query.group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::ReadExtensionData {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    let repo = GolfRepository::new(state.pool.clone());
    let scorecard = repo
        .get_scorecard_by_post(query.group_post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Scorecard not found".to_string()))?;

    Ok(Json(ScorecardResponse {
        golf_data: scorecard.into(),
    }))
}

/// Record hole scores for a participant. Upserts by hole number.
///
/// POST /api/v1/golf/scores
///
/// Rejected once the participant's scores are confirmed.
pub async fn record_scores(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<RecordHoleScoresRequest>,
) -> Result<Json<ParticipantScoresResponse>, ApiError> {
    request.validate()?;
    validate_entries(&request.scores)?;

    let (post, _membership) =
        load_post_and_membership(&state, request.group_post_id, user_auth.profile_id).await?;

    if !post.post_type.supports_golf_scorecard() {
        return Err(ApiError::Validation(format!(
            "Golf scores require a golf_round post, got {}",
            post.post_type
        )));
    }

    let participant =
        resolve_target_participant(&state, &post, user_auth.profile_id, request.participant_id)
            .await?;

    let golf = GolfRepository::new(state.pool.clone());
    let existing = golf.get_scores_for_participant(participant.id).await?;
    let existing_record: Option<domain::models::GolfParticipantScores> =
        existing.clone().map(Into::into);

    can(
        user_auth.profile_id,
        &Operation::RecordScores {
            participant: &participant,
            score_record: existing_record.as_ref(),
        },
    )?;

    if existing.as_ref().is_some_and(|r| r.scores_confirmed) {
        return Err(ApiError::Forbidden(
            "Scores are confirmed and locked".to_string(),
        ));
    }

    let record = golf
        .get_or_create_scores(participant.id, user_auth.profile_id)
        .await?;

    golf.upsert_hole_scores(record.id, &request.scores).await?;

    let participants = ParticipantRepository::new(state.pool.clone());
    participants.mark_contributed(participant.id).await?;

    let hole_scores = golf.list_hole_scores(record.id).await?;

    info!(
        group_post_id = %request.group_post_id,
        participant_id = %participant.id,
        entered_by = %user_auth.profile_id,
        holes = request.scores.len(),
        "Hole scores recorded"
    );

    Ok(Json(ParticipantScoresResponse {
        participant_scores: record.into(),
        hole_scores: hole_scores.into_iter().map(Into::into).collect(),
    }))
}

/// Confirm (lock) a participant's scores, recomputing totals.
///
/// POST /api/v1/golf/scores/confirm
pub async fn confirm_scores(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<ConfirmScoresRequest>,
) -> Result<Json<ParticipantScoresResponse>, ApiError> {
    let (post, _membership) =
        load_post_and_membership(&state, request.group_post_id, user_auth.profile_id).await?;

    let participant =
        resolve_target_participant(&state, &post, user_auth.profile_id, request.participant_id)
            .await?;

    let golf = GolfRepository::new(state.pool.clone());
    let record = golf
        .get_scores_for_participant(participant.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No scores recorded".to_string()))?;

    let record_domain: domain::models::GolfParticipantScores = record.clone().into();
    can(
        user_auth.profile_id,
        &Operation::ConfirmScores {
            participant: &participant,
            score_record: Some(&record_domain),
        },
    )?;

    let hole_scores: Vec<domain::models::GolfHoleScore> = golf
        .list_hole_scores(record.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let totals = compute_totals(&hole_scores);
    let confirmed = golf.confirm_scores(record.id, totals).await?;

    info!(
        group_post_id = %request.group_post_id,
        participant_id = %participant.id,
        total_score = totals.total_score,
        to_par = totals.to_par,
        "Scores confirmed"
    );

    Ok(Json(ParticipantScoresResponse {
        participant_scores: confirmed.into(),
        hole_scores,
    }))
}

/// Unlock a confirmed score record for correction. Creator only.
///
/// POST /api/v1/golf/scores/unlock
pub async fn unlock_scores(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<UnlockScoresRequest>,
) -> Result<Json<ParticipantScoresResponse>, ApiError> {
    let (post, _membership) =
        load_post_and_membership(&state, request.group_post_id, user_auth.profile_id).await?;

    can(user_auth.profile_id, &Operation::UnlockScores { post: &post })?;

    let participant = resolve_target_participant(
        &state,
        &post,
        user_auth.profile_id,
        Some(request.participant_id),
    )
    .await?;

    let golf = GolfRepository::new(state.pool.clone());
    let record = golf
        .get_scores_for_participant(participant.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No scores recorded".to_string()))?;

    let unlocked = golf.unlock_scores(record.id).await?;
    let hole_scores = golf.list_hole_scores(record.id).await?;

    info!(
        group_post_id = %request.group_post_id,
        participant_id = %participant.id,
        unlocked_by = %user_auth.profile_id,
        "Scores unlocked"
    );

    Ok(Json(ParticipantScoresResponse {
        participant_scores: unlocked.into(),
        hole_scores: hole_scores.into_iter().map(Into::into).collect(),
    }))
}

/// List every participant's score record on a post.
///
/// GET /api/v1/golf/scores?group_post_id
pub async fn list_scores(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<GolfDataQuery>,
) -> Result<Json<ListScoresResponse>, ApiError> {
    let (post, membership) =
        load_post_and_membership(&state, query.group_post_id, user_auth.profile_id).await?;

    can(
        user_auth.profile_id,
        &Operation::ReadExtensionData {
            post: &post,
            membership: membership.as_ref(),
        },
    )?;

    let golf = GolfRepository::new(state.pool.clone());
    let records = golf.list_scores_for_post(query.group_post_id).await?;

    let mut scores = Vec::with_capacity(records.len());
    for record in records {
        let hole_scores = golf.list_hole_scores(record.id).await?;
        scores.push(ParticipantScoresResponse {
            participant_scores: record.into(),
            hole_scores: hole_scores.into_iter().map(Into::into).collect(),
        });
    }

    Ok(Json(ListScoresResponse { scores }))
}
