//! Participant entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::participant::{ParticipantRole, ParticipantStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the participant_role PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "lowercase")]
pub enum ParticipantRoleDb {
    Creator,
    Organizer,
    Participant,
    Spectator,
}

impl From<ParticipantRoleDb> for ParticipantRole {
    fn from(db: ParticipantRoleDb) -> Self {
        match db {
            ParticipantRoleDb::Creator => ParticipantRole::Creator,
            ParticipantRoleDb::Organizer => ParticipantRole::Organizer,
            ParticipantRoleDb::Participant => ParticipantRole::Participant,
            ParticipantRoleDb::Spectator => ParticipantRole::Spectator,
        }
    }
}

impl From<ParticipantRole> for ParticipantRoleDb {
    fn from(role: ParticipantRole) -> Self {
        match role {
            ParticipantRole::Creator => ParticipantRoleDb::Creator,
            ParticipantRole::Organizer => ParticipantRoleDb::Organizer,
            ParticipantRole::Participant => ParticipantRoleDb::Participant,
            ParticipantRole::Spectator => ParticipantRoleDb::Spectator,
        }
    }
}

/// Database enum mapping for the participant_status PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_status", rename_all = "lowercase")]
pub enum ParticipantStatusDb {
    Pending,
    Confirmed,
    Declined,
    Maybe,
}

impl From<ParticipantStatusDb> for ParticipantStatus {
    fn from(db: ParticipantStatusDb) -> Self {
        match db {
            ParticipantStatusDb::Pending => ParticipantStatus::Pending,
            ParticipantStatusDb::Confirmed => ParticipantStatus::Confirmed,
            ParticipantStatusDb::Declined => ParticipantStatus::Declined,
            ParticipantStatusDb::Maybe => ParticipantStatus::Maybe,
        }
    }
}

impl From<ParticipantStatus> for ParticipantStatusDb {
    fn from(status: ParticipantStatus) -> Self {
        match status {
            ParticipantStatus::Pending => ParticipantStatusDb::Pending,
            ParticipantStatus::Confirmed => ParticipantStatusDb::Confirmed,
            ParticipantStatus::Declined => ParticipantStatusDb::Declined,
            ParticipantStatus::Maybe => ParticipantStatusDb::Maybe,
        }
    }
}

/// Database row mapping for the participants table.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantEntity {
    pub id: Uuid,
    pub group_post_id: Uuid,
    pub profile_id: Uuid,
    pub role: ParticipantRoleDb,
    pub status: ParticipantStatusDb,
    pub attested_at: Option<DateTime<Utc>>,
    pub data_contributed: bool,
    pub last_contribution: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ParticipantEntity> for domain::models::Participant {
    fn from(entity: ParticipantEntity) -> Self {
        Self {
            id: entity.id,
            group_post_id: entity.group_post_id,
            profile_id: entity.profile_id,
            role: entity.role.into(),
            status: entity.status.into(),
            attested_at: entity.attested_at,
            data_contributed: entity.data_contributed,
            last_contribution: entity.last_contribution,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
