//! Capability evaluation for group activity operations.
//!
//! Every route handler consults this guard before touching the store.
//! The guard never mutates state; it maps an actor, an operation and the
//! already-loaded context rows to an allow/deny decision with a typed
//! reason the caller turns into a response.

use thiserror::Error;
use uuid::Uuid;

use crate::models::golf::GolfParticipantScores;
use crate::models::group_post::{GroupPost, GroupPostVisibility};
use crate::models::participant::Participant;

/// Typed denial reason.
///
/// `NotFound` is deliberate for membership checks: a caller probing a
/// post they cannot see learns nothing about who participates in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),
}

/// An operation under authorization, together with the context rows the
/// decision depends on. `membership` is the actor's own participant row
/// on the post, when one exists.
#[derive(Debug)]
pub enum Operation<'a> {
    CreateGroupPost,
    ViewGroupPost {
        post: &'a GroupPost,
        membership: Option<&'a Participant>,
    },
    UpdateGroupPost {
        post: &'a GroupPost,
        membership: Option<&'a Participant>,
    },
    DeleteGroupPost {
        post: &'a GroupPost,
        membership: Option<&'a Participant>,
    },
    AddParticipants {
        post: &'a GroupPost,
        membership: Option<&'a Participant>,
    },
    RemoveParticipant {
        post: &'a GroupPost,
        membership: Option<&'a Participant>,
        target_profile_id: Uuid,
    },
    Attest {
        membership: Option<&'a Participant>,
    },
    CreateExtensionData {
        post: &'a GroupPost,
    },
    ReadExtensionData {
        post: &'a GroupPost,
        membership: Option<&'a Participant>,
    },
    RecordScores {
        participant: &'a Participant,
        score_record: Option<&'a GolfParticipantScores>,
    },
    ConfirmScores {
        participant: &'a Participant,
        score_record: Option<&'a GolfParticipantScores>,
    },
    UnlockScores {
        post: &'a GroupPost,
    },
}

/// Evaluates whether `actor` may perform `operation`.
///
/// The actor has already been authenticated by the request layer; an
/// unauthenticated caller never reaches this point.
pub fn can(actor: Uuid, operation: &Operation<'_>) -> Result<(), Denial> {
    match operation {
        // Any authenticated profile may create a post.
        Operation::CreateGroupPost => Ok(()),

        Operation::ViewGroupPost { post, membership } => check_view(actor, post, *membership),

        Operation::UpdateGroupPost { post, membership }
        | Operation::DeleteGroupPost { post, membership } => {
            check_view(actor, post, *membership)?;
            if post.creator_id == actor {
                Ok(())
            } else {
                Err(Denial::Forbidden(
                    "Only the creator can modify a group post".to_string(),
                ))
            }
        }

        Operation::AddParticipants { post, membership } => {
            check_view(actor, post, *membership)?;
            if post.creator_id == actor {
                return Ok(());
            }
            match membership {
                Some(m) if m.role.can_add_participants() => Ok(()),
                _ => Err(Denial::Forbidden(
                    "Only the creator or an organizer can add participants".to_string(),
                )),
            }
        }

        Operation::RemoveParticipant {
            post,
            membership,
            target_profile_id,
        } => {
            check_view(actor, post, *membership)?;
            // The creator's own row can never be removed, by anyone.
            if *target_profile_id == post.creator_id {
                return Err(Denial::Forbidden(
                    "The creator cannot be removed from a group post".to_string(),
                ));
            }
            if post.creator_id == actor || *target_profile_id == actor {
                return Ok(());
            }
            match membership {
                Some(m) if m.role.can_remove_participants() => Ok(()),
                _ => Err(Denial::Forbidden(
                    "Only the creator, an organizer, or the participant themself can remove a participant"
                        .to_string(),
                )),
            }
        }

        // Attestation is strictly first-person. A caller without a
        // participant row gets not-found, not forbidden.
        Operation::Attest { membership } => match membership {
            Some(m) if m.profile_id == actor => Ok(()),
            _ => Err(Denial::NotFound(
                "You are not a participant of this group post".to_string(),
            )),
        },

        Operation::CreateExtensionData { post } => {
            if post.creator_id == actor {
                Ok(())
            } else {
                Err(Denial::Forbidden(
                    "Only the creator can attach extension data".to_string(),
                ))
            }
        }

        Operation::ReadExtensionData { post, membership } => check_view(actor, post, *membership),

        Operation::RecordScores {
            participant,
            score_record,
        }
        | Operation::ConfirmScores {
            participant,
            score_record,
        } => {
            if participant.profile_id == actor {
                return Ok(());
            }
            match score_record {
                Some(record) if record.entered_by == actor => Ok(()),
                _ => Err(Denial::Forbidden(
                    "Scores can only be entered by the participant or the profile that recorded them"
                        .to_string(),
                )),
            }
        }

        Operation::UnlockScores { post } => {
            if post.creator_id == actor {
                Ok(())
            } else {
                Err(Denial::Forbidden(
                    "Only the creator can unlock confirmed scores".to_string(),
                ))
            }
        }
    }
}

/// Visibility rules: public posts are readable by any authenticated
/// profile, participants_only by anyone with a participant row, private
/// by the creator alone. Invisible posts read as absent.
fn check_view(
    actor: Uuid,
    post: &GroupPost,
    membership: Option<&Participant>,
) -> Result<(), Denial> {
    if post.creator_id == actor {
        return Ok(());
    }
    match post.visibility {
        GroupPostVisibility::Public => Ok(()),
        GroupPostVisibility::ParticipantsOnly => match membership {
            Some(m) if m.profile_id == actor => Ok(()),
            _ => Err(Denial::NotFound("Group post not found".to_string())),
        },
        GroupPostVisibility::Private => {
            Err(Denial::NotFound("Group post not found".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::group_post::{GroupPostStatus, GroupPostType};
    use crate::models::participant::{ParticipantRole, ParticipantStatus};
    use chrono::Utc;

    fn post(creator_id: Uuid, visibility: GroupPostVisibility) -> GroupPost {
        GroupPost {
            id: Uuid::new_v4(),
            creator_id,
            post_type: GroupPostType::GolfRound,
            title: "Saturday Round".to_string(),
            description: None,
            date: Utc::now(),
            location: None,
            visibility,
            status: GroupPostStatus::Pending,
            social_post_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn member(post: &GroupPost, profile_id: Uuid, role: ParticipantRole) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            group_post_id: post.id,
            profile_id,
            role,
            status: ParticipantStatus::Pending,
            attested_at: None,
            data_contributed: false,
            last_contribution: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn scores(participant: &Participant, entered_by: Uuid) -> GolfParticipantScores {
        GolfParticipantScores {
            id: Uuid::new_v4(),
            participant_id: participant.id,
            entered_by,
            scores_confirmed: false,
            total_score: 0,
            to_par: 0,
            holes_completed: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_anyone_can_create_posts() {
        assert!(can(Uuid::new_v4(), &Operation::CreateGroupPost).is_ok());
    }

    #[test]
    fn test_public_post_viewable_by_stranger() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let op = Operation::ViewGroupPost {
            post: &p,
            membership: None,
        };
        assert!(can(Uuid::new_v4(), &op).is_ok());
    }

    #[test]
    fn test_participants_only_post_hidden_from_stranger() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::ParticipantsOnly);
        let op = Operation::ViewGroupPost {
            post: &p,
            membership: None,
        };
        assert!(matches!(can(Uuid::new_v4(), &op), Err(Denial::NotFound(_))));
    }

    #[test]
    fn test_participants_only_post_visible_to_member() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::ParticipantsOnly);
        let viewer = Uuid::new_v4();
        let m = member(&p, viewer, ParticipantRole::Spectator);
        let op = Operation::ViewGroupPost {
            post: &p,
            membership: Some(&m),
        };
        assert!(can(viewer, &op).is_ok());
    }

    #[test]
    fn test_private_post_visible_to_creator_only() {
        let creator = Uuid::new_v4();
        let p = post(creator, GroupPostVisibility::Private);
        let other = Uuid::new_v4();
        let m = member(&p, other, ParticipantRole::Participant);

        assert!(can(
            creator,
            &Operation::ViewGroupPost {
                post: &p,
                membership: None
            }
        )
        .is_ok());
        assert!(matches!(
            can(
                other,
                &Operation::ViewGroupPost {
                    post: &p,
                    membership: Some(&m)
                }
            ),
            Err(Denial::NotFound(_))
        ));
    }

    #[test]
    fn test_update_requires_creator() {
        let creator = Uuid::new_v4();
        let p = post(creator, GroupPostVisibility::Public);
        let other = Uuid::new_v4();

        assert!(can(
            creator,
            &Operation::UpdateGroupPost {
                post: &p,
                membership: None
            }
        )
        .is_ok());
        assert!(matches!(
            can(
                other,
                &Operation::UpdateGroupPost {
                    post: &p,
                    membership: None
                }
            ),
            Err(Denial::Forbidden(_))
        ));
    }

    #[test]
    fn test_update_invisible_post_reads_as_absent() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Private);
        let op = Operation::UpdateGroupPost {
            post: &p,
            membership: None,
        };
        assert!(matches!(can(Uuid::new_v4(), &op), Err(Denial::NotFound(_))));
    }

    #[test]
    fn test_organizer_can_add_participants() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let organizer = Uuid::new_v4();
        let m = member(&p, organizer, ParticipantRole::Organizer);
        let op = Operation::AddParticipants {
            post: &p,
            membership: Some(&m),
        };
        assert!(can(organizer, &op).is_ok());
    }

    #[test]
    fn test_plain_participant_cannot_add_participants() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let profile = Uuid::new_v4();
        let m = member(&p, profile, ParticipantRole::Participant);
        let op = Operation::AddParticipants {
            post: &p,
            membership: Some(&m),
        };
        assert!(matches!(can(profile, &op), Err(Denial::Forbidden(_))));
    }

    #[test]
    fn test_creator_row_can_never_be_removed() {
        let creator = Uuid::new_v4();
        let p = post(creator, GroupPostVisibility::Public);

        // Not even the creator removing themself.
        let op = Operation::RemoveParticipant {
            post: &p,
            membership: None,
            target_profile_id: creator,
        };
        assert!(matches!(can(creator, &op), Err(Denial::Forbidden(_))));
    }

    #[test]
    fn test_participant_can_remove_themself() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let profile = Uuid::new_v4();
        let m = member(&p, profile, ParticipantRole::Participant);
        let op = Operation::RemoveParticipant {
            post: &p,
            membership: Some(&m),
            target_profile_id: profile,
        };
        assert!(can(profile, &op).is_ok());
    }

    #[test]
    fn test_spectator_cannot_remove_others() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let profile = Uuid::new_v4();
        let m = member(&p, profile, ParticipantRole::Spectator);
        let op = Operation::RemoveParticipant {
            post: &p,
            membership: Some(&m),
            target_profile_id: Uuid::new_v4(),
        };
        assert!(matches!(can(profile, &op), Err(Denial::Forbidden(_))));
    }

    #[test]
    fn test_attest_requires_own_membership() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let profile = Uuid::new_v4();
        let m = member(&p, profile, ParticipantRole::Participant);

        assert!(can(profile, &Operation::Attest { membership: Some(&m) }).is_ok());
        assert!(matches!(
            can(Uuid::new_v4(), &Operation::Attest { membership: None }),
            Err(Denial::NotFound(_))
        ));
    }

    #[test]
    fn test_extension_data_creation_is_creator_only() {
        let creator = Uuid::new_v4();
        let p = post(creator, GroupPostVisibility::Public);

        assert!(can(creator, &Operation::CreateExtensionData { post: &p }).is_ok());
        assert!(matches!(
            can(Uuid::new_v4(), &Operation::CreateExtensionData { post: &p }),
            Err(Denial::Forbidden(_))
        ));
    }

    #[test]
    fn test_record_scores_self() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let profile = Uuid::new_v4();
        let m = member(&p, profile, ParticipantRole::Participant);
        let op = Operation::RecordScores {
            participant: &m,
            score_record: None,
        };
        assert!(can(profile, &op).is_ok());
    }

    #[test]
    fn test_record_scores_entered_by() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let player = Uuid::new_v4();
        let scorekeeper = Uuid::new_v4();
        let m = member(&p, player, ParticipantRole::Participant);
        let record = scores(&m, scorekeeper);
        let op = Operation::RecordScores {
            participant: &m,
            score_record: Some(&record),
        };
        assert!(can(scorekeeper, &op).is_ok());
    }

    #[test]
    fn test_record_scores_stranger_forbidden() {
        let p = post(Uuid::new_v4(), GroupPostVisibility::Public);
        let player = Uuid::new_v4();
        let m = member(&p, player, ParticipantRole::Participant);
        let record = scores(&m, player);
        let op = Operation::RecordScores {
            participant: &m,
            score_record: Some(&record),
        };
        assert!(matches!(can(Uuid::new_v4(), &op), Err(Denial::Forbidden(_))));
    }

    #[test]
    fn test_unlock_scores_is_creator_only() {
        let creator = Uuid::new_v4();
        let p = post(creator, GroupPostVisibility::Public);

        assert!(can(creator, &Operation::UnlockScores { post: &p }).is_ok());
        assert!(matches!(
            can(Uuid::new_v4(), &Operation::UnlockScores { post: &p }),
            Err(Denial::Forbidden(_))
        ));
    }
}
