//! Domain services for Huddle.
//!
//! Services contain business logic that operates on domain models.

pub mod attestation;
pub mod authorization;
pub mod notification;
pub mod scoring;

pub use attestation::{apply_attestation, AttestationError, AttestationTransition};

pub use authorization::{can, Denial, Operation};

pub use notification::{
    GroupActivityEvent, MockNotificationPublisher, NotificationPublisher, TracingPublisher,
};

pub use scoring::{compute_totals, validate_entries, ScoringError, Totals, PAR_PER_HOLE};
