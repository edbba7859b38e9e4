//! Repository implementations for database operations.

pub mod golf;
pub mod group_post;
pub mod participant;

pub use golf::GolfRepository;
pub use group_post::GroupPostRepository;
pub use participant::ParticipantRepository;
