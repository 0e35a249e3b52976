//! Team collaboration: shared workspaces, finalization, invites

pub mod engine;
pub mod types;

pub use engine::TeamEngine;
pub use types::{
    FileKind, InviteReceipt, Participant, TeamCollaboration, TeamFile, TeamMessage,
};
