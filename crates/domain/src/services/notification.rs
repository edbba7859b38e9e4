//! Notification publishing for group activity events.
//!
//! Publishing is fire-and-forget: handlers spawn the publish call and
//! never await or inspect the outcome. Delivery (push, in-app fan-out)
//! belongs to the platform's notification service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::participant::ParticipantStatus;

/// A group activity event worth notifying about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupActivityEvent {
    /// Profiles were invited to a group post.
    ParticipantsInvited {
        group_post_id: Uuid,
        invited_by: Uuid,
        profile_ids: Vec<Uuid>,
    },
    /// A participant attested their status.
    ParticipantAttested {
        group_post_id: Uuid,
        profile_id: Uuid,
        status: ParticipantStatus,
    },
}

/// Publisher trait for group activity events.
#[async_trait::async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish an event. Implementations must not fail the request path;
    /// errors are swallowed and logged internally.
    async fn publish(&self, event: GroupActivityEvent);
}

/// Default publisher: emits the event to the log stream. Used until the
/// real notification service is wired in a deployment.
pub struct TracingPublisher;

#[async_trait::async_trait]
impl NotificationPublisher for TracingPublisher {
    async fn publish(&self, event: GroupActivityEvent) {
        match &event {
            GroupActivityEvent::ParticipantsInvited {
                group_post_id,
                invited_by,
                profile_ids,
            } => {
                tracing::info!(
                    group_post_id = %group_post_id,
                    invited_by = %invited_by,
                    invited_count = profile_ids.len(),
                    "Published participants invited event"
                );
            }
            GroupActivityEvent::ParticipantAttested {
                group_post_id,
                profile_id,
                status,
            } => {
                tracing::info!(
                    group_post_id = %group_post_id,
                    profile_id = %profile_id,
                    status = %status,
                    "Published participant attested event"
                );
            }
        }
    }
}

/// Test publisher that records every published event.
#[derive(Default)]
pub struct MockNotificationPublisher {
    events: std::sync::Mutex<Vec<GroupActivityEvent>>,
}

impl MockNotificationPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GroupActivityEvent> {
        self.events.lock().expect("events lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl NotificationPublisher for MockNotificationPublisher {
    async fn publish(&self, event: GroupActivityEvent) {
        self.events.lock().expect("events lock poisoned").push(event);
    }
}
