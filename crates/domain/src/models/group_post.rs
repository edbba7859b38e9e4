//! Group post domain models for shared activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Kind of shared activity a group post represents.
///
/// Closed enum; the type of a post never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPostType {
    GolfRound,
    HockeyGame,
    VolleyballMatch,
    BasketballGame,
    SocialEvent,
    PracticeSession,
    TournamentRound,
    WatchParty,
}

impl GroupPostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupPostType::GolfRound => "golf_round",
            GroupPostType::HockeyGame => "hockey_game",
            GroupPostType::VolleyballMatch => "volleyball_match",
            GroupPostType::BasketballGame => "basketball_game",
            GroupPostType::SocialEvent => "social_event",
            GroupPostType::PracticeSession => "practice_session",
            GroupPostType::TournamentRound => "tournament_round",
            GroupPostType::WatchParty => "watch_party",
        }
    }

    /// Returns true if golf scorecard extension data may be attached to
    /// posts of this type.
    pub fn supports_golf_scorecard(&self) -> bool {
        matches!(self, GroupPostType::GolfRound)
    }
}

impl FromStr for GroupPostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "golf_round" => Ok(GroupPostType::GolfRound),
            "hockey_game" => Ok(GroupPostType::HockeyGame),
            "volleyball_match" => Ok(GroupPostType::VolleyballMatch),
            "basketball_game" => Ok(GroupPostType::BasketballGame),
            "social_event" => Ok(GroupPostType::SocialEvent),
            "practice_session" => Ok(GroupPostType::PracticeSession),
            "tournament_round" => Ok(GroupPostType::TournamentRound),
            "watch_party" => Ok(GroupPostType::WatchParty),
            _ => Err(format!("Invalid group post type: {}", s)),
        }
    }
}

impl fmt::Display for GroupPostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who may see a group post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPostVisibility {
    Public,
    Private,
    ParticipantsOnly,
}

impl GroupPostVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupPostVisibility::Public => "public",
            GroupPostVisibility::Private => "private",
            GroupPostVisibility::ParticipantsOnly => "participants_only",
        }
    }
}

impl FromStr for GroupPostVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(GroupPostVisibility::Public),
            "private" => Ok(GroupPostVisibility::Private),
            "participants_only" => Ok(GroupPostVisibility::ParticipantsOnly),
            _ => Err(format!("Invalid visibility: {}", s)),
        }
    }
}

impl fmt::Display for GroupPostVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a group post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPostStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl GroupPostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupPostStatus::Pending => "pending",
            GroupPostStatus::Active => "active",
            GroupPostStatus::Completed => "completed",
            GroupPostStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for GroupPostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(GroupPostStatus::Pending),
            "active" => Ok(GroupPostStatus::Active),
            "completed" => Ok(GroupPostStatus::Completed),
            "cancelled" => Ok(GroupPostStatus::Cancelled),
            _ => Err(format!("Invalid group post status: {}", s)),
        }
    }
}

impl fmt::Display for GroupPostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a shared, dated activity with one creator and a bounded
/// set of invited participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupPost {
    pub id: Uuid,
    /// Immutable after creation.
    pub creator_id: Uuid,
    /// Immutable after creation.
    #[serde(rename = "type")]
    pub post_type: GroupPostType,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub visibility: GroupPostVisibility,
    pub status: GroupPostStatus,
    /// Optional link to a plain social post.
    pub social_post_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a group post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupPostRequest {
    #[serde(rename = "type")]
    pub post_type: GroupPostType,

    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = shared::validation::validate_title)
    )]
    pub title: String,

    pub date: DateTime<Utc>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub visibility: Option<GroupPostVisibility>,

    /// Profiles invited at creation time (pending participants).
    pub participant_ids: Option<Vec<Uuid>>,

    pub social_post_id: Option<Uuid>,
}

/// Request payload for updating a group post. All fields optional;
/// an entirely empty update is rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateGroupPostRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = shared::validation::validate_title)
    )]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub visibility: Option<GroupPostVisibility>,

    pub status: Option<GroupPostStatus>,
}

impl UpdateGroupPostRequest {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.visibility.is_none()
            && self.status.is_none()
    }
}

/// Query parameters for listing group posts.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListGroupPostsQuery {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// Response wrapper for a single group post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupPostResponse {
    pub group_post: GroupPost,
}

/// Response for listing group posts with cursor pagination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListGroupPostsResponse {
    pub group_posts: Vec<GroupPost>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
