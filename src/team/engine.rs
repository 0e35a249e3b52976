//! Team collaboration engine: shared workspaces for in-flight transactions

use crate::catalog::offer::Offer;
use crate::catalog::OfferStore;
use crate::error::{FreightlineError, Result};
use crate::types::{OfferId, OfferStatus, ParticipantRole, TeamId, TeamStatus, UserId};
use chrono::Utc;
use std::collections::HashMap;

use super::types::{
    FileKind, InviteReceipt, Participant, TeamCollaboration, TeamFile, TeamMessage,
};

/// Team engine: owns collaboration spaces, their messages and files.
pub struct TeamEngine {
    teams: HashMap<TeamId, TeamCollaboration>,
}

impl TeamEngine {
    /// Create new team engine
    pub fn new() -> Self {
        Self {
            teams: HashMap::new(),
        }
    }

    /// Open a collaboration space for an offer transaction, seeding the
    /// offer's owner and the buyer as participants plus a welcome notice.
    /// The owner joins as carrier.
    pub fn create(
        &mut self,
        offer: &Offer,
        buyer_user_id: UserId,
        buyer_name: &str,
        buyer_role: ParticipantRole,
    ) -> TeamCollaboration {
        let id = TeamId::generate();
        let now = Utc::now();

        let welcome = TeamMessage::system(
            id.clone(),
            format!(
                "Welcome to the collaboration space for \"{}\". You can share files, \
                 documents, and coordinate details here.",
                offer.title
            ),
        );

        let team = TeamCollaboration {
            id: id.clone(),
            offer_id: offer.id.clone(),
            name: format!("Collaboration: {}", offer.title),
            participants: vec![
                Participant {
                    user_id: offer.owner_id.clone(),
                    name: offer.contact.name.clone(),
                    role: ParticipantRole::Carrier,
                    joined_at: now,
                },
                Participant {
                    user_id: buyer_user_id,
                    name: buyer_name.to_string(),
                    role: buyer_role,
                    joined_at: now,
                },
            ],
            messages: vec![welcome],
            files: Vec::new(),
            status: TeamStatus::Active,
            created_at: now,
            updated_at: now,
            finalized_at: None,
            finalized_by: None,
            finalized_reason: None,
        };

        self.teams.insert(id, team.clone());
        team
    }

    /// Post a message to an active team
    pub fn add_message(
        &mut self,
        team_id: &TeamId,
        user_id: UserId,
        user_name: &str,
        content: &str,
        attachments: Vec<TeamFile>,
    ) -> Result<TeamMessage> {
        let team = self.active_team_mut(team_id)?;

        let message = TeamMessage::new(
            team_id.clone(),
            user_id,
            user_name.to_string(),
            content.to_string(),
            attachments,
        );
        team.messages.push(message.clone());
        team.updated_at = Utc::now();

        Ok(message)
    }

    /// Share a file with an active team
    pub fn upload_file(
        &mut self,
        team_id: &TeamId,
        user_id: UserId,
        name: &str,
        kind: FileKind,
        size_bytes: u64,
        description: Option<String>,
    ) -> Result<TeamFile> {
        let team = self.active_team_mut(team_id)?;

        let file = TeamFile::new(
            team_id.clone(),
            user_id,
            name.to_string(),
            kind,
            size_bytes,
            description,
        );
        team.files.push(file.clone());
        team.updated_at = Utc::now();

        Ok(file)
    }

    /// Conclude a collaboration. One-way: the team becomes finalized, a
    /// system notice names the finalizing participant, and the linked offer
    /// is marked finalized.
    pub fn finalize(
        &mut self,
        offers: &mut OfferStore,
        team_id: &TeamId,
        user_id: &UserId,
        reason: &str,
    ) -> Result<TeamCollaboration> {
        let team = self.team_mut(team_id)?;
        if team.status != TeamStatus::Active {
            return Err(FreightlineError::TeamClosed(team.status));
        }

        let now = Utc::now();
        team.status = TeamStatus::Finalized;
        team.finalized_at = Some(now);
        team.finalized_by = Some(user_id.clone());
        team.finalized_reason = Some(reason.to_string());
        team.updated_at = now;

        // The actor may not be listed; the notice still goes out
        let actor = team
            .participant(user_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "a participant".to_string());
        team.messages.push(TeamMessage::system(
            team_id.clone(),
            format!(
                "This collaboration has been finalized by {}. Reason: {}",
                actor, reason
            ),
        ));

        let offer_id = team.offer_id.clone();
        let team = team.clone();

        if let Some(offer) = offers.get_mut(&offer_id) {
            offer.status = OfferStatus::Finalized;
            offer.touch();
        }

        Ok(team)
    }

    /// Invite people to the team by email. Only a current participant may
    /// invite; the batch is summarized in one system message. No invite
    /// records are persisted.
    pub fn send_invites(
        &mut self,
        team_id: &TeamId,
        inviter_user_id: &UserId,
        emails: Vec<String>,
    ) -> Result<InviteReceipt> {
        let team = self.team_mut(team_id)?;

        let inviter = team
            .participant(inviter_user_id)
            .ok_or_else(|| FreightlineError::NotAParticipant {
                user_id: inviter_user_id.to_string(),
                team_id: team_id.to_string(),
            })?
            .name
            .clone();

        team.messages.push(TeamMessage::system(
            team_id.clone(),
            format!("{} invited {} people to join this team.", inviter, emails.len()),
        ));
        team.updated_at = Utc::now();

        Ok(InviteReceipt {
            invited_emails: emails,
        })
    }

    /// Get a team
    pub fn get(&self, team_id: &TeamId) -> Option<&TeamCollaboration> {
        self.teams.get(team_id)
    }

    /// Find the team attached to an offer, if any
    pub fn by_offer(&self, offer_id: &OfferId) -> Option<&TeamCollaboration> {
        self.teams.values().find(|t| &t.offer_id == offer_id)
    }

    /// All teams a user participates in
    pub fn for_user(&self, user_id: &UserId) -> Vec<&TeamCollaboration> {
        self.teams
            .values()
            .filter(|t| t.is_participant(user_id))
            .collect()
    }

    fn team_mut(&mut self, team_id: &TeamId) -> Result<&mut TeamCollaboration> {
        self.teams
            .get_mut(team_id)
            .ok_or_else(|| FreightlineError::TeamNotFound(team_id.to_string()))
    }

    fn active_team_mut(&mut self, team_id: &TeamId) -> Result<&mut TeamCollaboration> {
        let team = self.team_mut(team_id)?;
        if team.status.is_terminal() {
            return Err(FreightlineError::TeamClosed(team.status));
        }
        Ok(team)
    }
}

impl Default for TeamEngine {
    fn default() -> Self {
        Self::new()
    }
}
