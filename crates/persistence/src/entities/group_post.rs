//! Group post entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::group_post::{GroupPostStatus, GroupPostType, GroupPostVisibility};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the group_post_type PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_post_type", rename_all = "snake_case")]
pub enum GroupPostTypeDb {
    GolfRound,
    HockeyGame,
    VolleyballMatch,
    BasketballGame,
    SocialEvent,
    PracticeSession,
    TournamentRound,
    WatchParty,
}

impl From<GroupPostTypeDb> for GroupPostType {
    fn from(db: GroupPostTypeDb) -> Self {
        match db {
            GroupPostTypeDb::GolfRound => GroupPostType::GolfRound,
            GroupPostTypeDb::HockeyGame => GroupPostType::HockeyGame,
            GroupPostTypeDb::VolleyballMatch => GroupPostType::VolleyballMatch,
            GroupPostTypeDb::BasketballGame => GroupPostType::BasketballGame,
            GroupPostTypeDb::SocialEvent => GroupPostType::SocialEvent,
            GroupPostTypeDb::PracticeSession => GroupPostType::PracticeSession,
            GroupPostTypeDb::TournamentRound => GroupPostType::TournamentRound,
            GroupPostTypeDb::WatchParty => GroupPostType::WatchParty,
        }
    }
}

impl From<GroupPostType> for GroupPostTypeDb {
    fn from(t: GroupPostType) -> Self {
        match t {
            GroupPostType::GolfRound => GroupPostTypeDb::GolfRound,
            GroupPostType::HockeyGame => GroupPostTypeDb::HockeyGame,
            GroupPostType::VolleyballMatch => GroupPostTypeDb::VolleyballMatch,
            GroupPostType::BasketballGame => GroupPostTypeDb::BasketballGame,
            GroupPostType::SocialEvent => GroupPostTypeDb::SocialEvent,
            GroupPostType::PracticeSession => GroupPostTypeDb::PracticeSession,
            GroupPostType::TournamentRound => GroupPostTypeDb::TournamentRound,
            GroupPostType::WatchParty => GroupPostTypeDb::WatchParty,
        }
    }
}

/// Database enum mapping for the group_post_visibility PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_post_visibility", rename_all = "snake_case")]
pub enum GroupPostVisibilityDb {
    Public,
    Private,
    ParticipantsOnly,
}

impl From<GroupPostVisibilityDb> for GroupPostVisibility {
    fn from(db: GroupPostVisibilityDb) -> Self {
        match db {
            GroupPostVisibilityDb::Public => GroupPostVisibility::Public,
            GroupPostVisibilityDb::Private => GroupPostVisibility::Private,
            GroupPostVisibilityDb::ParticipantsOnly => GroupPostVisibility::ParticipantsOnly,
        }
    }
}

impl From<GroupPostVisibility> for GroupPostVisibilityDb {
    fn from(v: GroupPostVisibility) -> Self {
        match v {
            GroupPostVisibility::Public => GroupPostVisibilityDb::Public,
            GroupPostVisibility::Private => GroupPostVisibilityDb::Private,
            GroupPostVisibility::ParticipantsOnly => GroupPostVisibilityDb::ParticipantsOnly,
        }
    }
}

/// Database enum mapping for the group_post_status PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_post_status", rename_all = "snake_case")]
pub enum GroupPostStatusDb {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl From<GroupPostStatusDb> for GroupPostStatus {
    fn from(db: GroupPostStatusDb) -> Self {
        match db {
            GroupPostStatusDb::Pending => GroupPostStatus::Pending,
            GroupPostStatusDb::Active => GroupPostStatus::Active,
            GroupPostStatusDb::Completed => GroupPostStatus::Completed,
            GroupPostStatusDb::Cancelled => GroupPostStatus::Cancelled,
        }
    }
}

impl From<GroupPostStatus> for GroupPostStatusDb {
    fn from(s: GroupPostStatus) -> Self {
        match s {
            GroupPostStatus::Pending => GroupPostStatusDb::Pending,
            GroupPostStatus::Active => GroupPostStatusDb::Active,
            GroupPostStatus::Completed => GroupPostStatusDb::Completed,
            GroupPostStatus::Cancelled => GroupPostStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the group_posts table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupPostEntity {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub post_type: GroupPostTypeDb,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub visibility: GroupPostVisibilityDb,
    pub status: GroupPostStatusDb,
    pub social_post_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupPostEntity> for domain::models::GroupPost {
    fn from(entity: GroupPostEntity) -> Self {
        Self {
            id: entity.id,
            creator_id: entity.creator_id,
            post_type: entity.post_type.into(),
            title: entity.title,
            description: entity.description,
            date: entity.date,
            location: entity.location,
            visibility: entity.visibility.into(),
            status: entity.status.into(),
            social_post_id: entity.social_post_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
