//! Participant domain models: a profile's membership in a group post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::group_post::GroupPost;

/// Role within a group post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Creator,
    Organizer,
    Participant,
    Spectator,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Creator => "creator",
            ParticipantRole::Organizer => "organizer",
            ParticipantRole::Participant => "participant",
            ParticipantRole::Spectator => "spectator",
        }
    }

    /// Returns true if this role can invite further participants.
    pub fn can_add_participants(&self) -> bool {
        matches!(self, ParticipantRole::Creator | ParticipantRole::Organizer)
    }

    /// Returns true if this role can remove other participants.
    pub fn can_remove_participants(&self) -> bool {
        matches!(self, ParticipantRole::Creator | ParticipantRole::Organizer)
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creator" => Ok(ParticipantRole::Creator),
            "organizer" => Ok(ParticipantRole::Organizer),
            "participant" => Ok(ParticipantRole::Participant),
            "spectator" => Ok(ParticipantRole::Spectator),
            _ => Err(format!("Invalid participant role: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attestation status of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Pending,
    Confirmed,
    Declined,
    Maybe,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Pending => "pending",
            ParticipantStatus::Confirmed => "confirmed",
            ParticipantStatus::Declined => "declined",
            ParticipantStatus::Maybe => "maybe",
        }
    }

    /// Returns true if a participant may attest into this status.
    /// `pending` is the initial state only, never a target.
    pub fn is_attestable(&self) -> bool {
        !matches!(self, ParticipantStatus::Pending)
    }
}

impl FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ParticipantStatus::Pending),
            "confirmed" => Ok(ParticipantStatus::Confirmed),
            "declined" => Ok(ParticipantStatus::Declined),
            "maybe" => Ok(ParticipantStatus::Maybe),
            _ => Err(format!("Invalid participant status: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A profile's membership record in a group post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Participant {
    pub id: Uuid,
    pub group_post_id: Uuid,
    pub profile_id: Uuid,
    pub role: ParticipantRole,
    pub status: ParticipantStatus,
    pub attested_at: Option<DateTime<Utc>>,
    pub data_contributed: bool,
    pub last_contribution: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for inviting participants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AddParticipantsRequest {
    pub participant_ids: Vec<Uuid>,
    pub role: Option<ParticipantRole>,
}

/// Request payload for removing a participant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoveParticipantRequest {
    pub participant_id: Uuid,
}

/// Request payload for attesting participation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttestRequest {
    pub status: ParticipantStatus,
}

/// Response after a participant attests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttestResponse {
    pub participant: Participant,
    pub group_post: GroupPost,
}

/// Response wrapper for a participant batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ParticipantsResponse {
    pub participants: Vec<Participant>,
}
