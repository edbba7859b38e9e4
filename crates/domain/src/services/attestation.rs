//! Participant attestation state machine.
//!
//! States: pending -> {confirmed, declined, maybe}; once out of pending,
//! a participant may keep moving between confirmed, declined and maybe
//! indefinitely. There is no terminal state.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::participant::{Participant, ParticipantStatus};

/// Error raised for an invalid attestation target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttestationError {
    #[error("Cannot attest into status '{0}'")]
    InvalidTarget(ParticipantStatusName),
}

/// Status name carried by the error for message formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantStatusName(pub ParticipantStatus);

impl std::fmt::Display for ParticipantStatusName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_str())
    }
}

/// The computed result of an attestation: the new status and the new
/// attested_at value to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationTransition {
    pub status: ParticipantStatus,
    pub attested_at: Option<DateTime<Utc>>,
}

/// Applies an attestation to a participant row.
///
/// Effects on the attestation timestamp:
/// - entering `confirmed` sets it to `now`
/// - entering `declined` clears it
/// - entering `maybe` leaves it untouched
///
/// Re-applying the current status is permitted and idempotent (confirming
/// twice refreshes the timestamp but is otherwise observationally equal).
pub fn apply_attestation(
    participant: &Participant,
    target: ParticipantStatus,
    now: DateTime<Utc>,
) -> Result<AttestationTransition, AttestationError> {
    if !target.is_attestable() {
        return Err(AttestationError::InvalidTarget(ParticipantStatusName(
            target,
        )));
    }

    let attested_at = match target {
        ParticipantStatus::Confirmed => Some(now),
        ParticipantStatus::Declined => None,
        ParticipantStatus::Maybe => participant.attested_at,
        ParticipantStatus::Pending => unreachable!("pending rejected above"),
    };

    Ok(AttestationTransition {
        status: target,
        attested_at,
    })
}
