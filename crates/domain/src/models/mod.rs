//! Domain models for Huddle.

pub mod golf;
pub mod group_post;
pub mod participant;

pub use golf::{GolfHoleScore, GolfParticipantScores, GolfRoundType, GolfScorecard};
pub use group_post::{GroupPost, GroupPostStatus, GroupPostType, GroupPostVisibility};
pub use participant::{Participant, ParticipantRole, ParticipantStatus};
