//! Team collaboration records

use crate::types::{OfferId, ParticipantRole, TeamId, TeamStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Document categories shared in a collaboration space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Document,
    Transport,
    Invoice,
    Customs,
    Other,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileKind::Document => "document",
            FileKind::Transport => "transport",
            FileKind::Invoice => "invoice",
            FileKind::Customs => "customs",
            FileKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A file shared with the team. The URL points into an opaque blob store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamFile {
    pub id: String,
    pub team_id: TeamId,
    pub name: String,
    pub kind: FileKind,
    pub url: String,
    pub uploaded_by: UserId,
    pub uploaded_at: DateTime<Utc>,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TeamFile {
    pub(crate) fn new(
        team_id: TeamId,
        uploaded_by: UserId,
        name: String,
        kind: FileKind,
        size_bytes: u64,
        description: Option<String>,
    ) -> Self {
        let id = format!("file-{}", Uuid::new_v4());
        let url = format!("https://files.example.com/{}", id);
        Self {
            id,
            team_id,
            name,
            kind,
            url,
            uploaded_by,
            uploaded_at: Utc::now(),
            size_bytes,
            description,
        }
    }
}

/// One entry in the team's chat log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamMessage {
    pub id: String,
    pub team_id: TeamId,
    pub user_id: UserId,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<TeamFile>,
}

impl TeamMessage {
    pub(crate) fn new(
        team_id: TeamId,
        user_id: UserId,
        user_name: String,
        content: String,
        attachments: Vec<TeamFile>,
    ) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            team_id,
            user_id,
            user_name,
            content,
            created_at: Utc::now(),
            attachments,
        }
    }

    /// An engine-authored notice
    pub(crate) fn system(team_id: TeamId, content: String) -> Self {
        Self::new(
            team_id,
            UserId::system(),
            "System".to_string(),
            content,
            Vec::new(),
        )
    }
}

/// A member of the collaboration space
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub name: String,
    pub role: ParticipantRole,
    pub joined_at: DateTime<Utc>,
}

/// Receipt for an invite batch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InviteReceipt {
    pub invited_emails: Vec<String>,
}

/// A shared workspace created once an offer transaction is underway,
/// concluded by finalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamCollaboration {
    pub id: TeamId,
    pub offer_id: OfferId,
    pub name: String,
    pub participants: Vec<Participant>,
    pub messages: Vec<TeamMessage>,
    pub files: Vec<TeamFile>,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_reason: Option<String>,
}

impl TeamCollaboration {
    pub fn is_active(&self) -> bool {
        self.status == TeamStatus::Active
    }

    pub fn participant(&self, user_id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.user_id == user_id)
    }

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.participant(user_id).is_some()
    }
}
