//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod golf;
pub mod group_post;
pub mod participant;

pub use golf::{
    GolfHoleScoreEntity, GolfParticipantScoresEntity, GolfRoundTypeDb, GolfScorecardEntity,
};
pub use group_post::{
    GroupPostEntity, GroupPostStatusDb, GroupPostTypeDb, GroupPostVisibilityDb,
};
pub use participant::{ParticipantEntity, ParticipantRoleDb, ParticipantStatusDb};
