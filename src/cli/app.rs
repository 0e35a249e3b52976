//! Freightline application integrating all components

use crate::catalog::offer::{Marketplace, Offer};
use crate::catalog::{seed, OfferStore};
use crate::error::{FreightlineError, Result};
use crate::negotiation::{
    advisor, Negotiation, NegotiationEngine, NegotiationOutcome, NegotiationStatus,
    RateSuggestion,
};
use crate::team::{
    FileKind, InviteReceipt, TeamCollaboration, TeamEngine, TeamFile, TeamMessage,
};
use crate::types::{
    NegotiationId, OfferId, OfferStatus, OfferType, ParticipantRole, TeamId, UserId,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// How long the simulated counterparty "thinks" before replying
const DEFAULT_AI_REPLY_DELAY: Duration = Duration::from_secs(2);

/// Main Freightline application.
///
/// Engines are synchronous state machines; this facade serializes access to
/// them. Lock order is engine first, then offer store, everywhere.
#[derive(Clone)]
pub struct FreightlineApp {
    offers: Arc<Mutex<OfferStore>>,
    negotiations: Arc<Mutex<NegotiationEngine>>,
    teams: Arc<Mutex<TeamEngine>>,
    ai_reply_delay: Duration,
}

/// Point-in-time snapshot of marketplace activity
#[derive(Clone, Debug, Serialize)]
pub struct MarketSummary {
    pub total_offers: usize,
    pub available_offers: usize,
    pub booked_offers: usize,
    pub active_negotiations: usize,
    pub concluded_negotiations: usize,
    /// Average percentage saved on accepted negotiations, listed price vs
    /// agreed rate
    pub average_savings_pct: f64,
}

impl FreightlineApp {
    /// Create an application over an offer store
    pub fn new(store: OfferStore) -> Self {
        Self {
            offers: Arc::new(Mutex::new(store)),
            negotiations: Arc::new(Mutex::new(NegotiationEngine::new())),
            teams: Arc::new(Mutex::new(TeamEngine::new())),
            ai_reply_delay: DEFAULT_AI_REPLY_DELAY,
        }
    }

    /// Create an application pre-loaded with the seed catalog
    pub fn seeded() -> Self {
        Self::new(seed::seed())
    }

    /// Override the simulated counterparty's reply delay
    pub fn with_ai_reply_delay(mut self, delay: Duration) -> Self {
        self.ai_reply_delay = delay;
        self
    }

    // Catalog

    /// All aggregated marketplaces
    pub async fn marketplaces(&self) -> Vec<Marketplace> {
        self.offers.lock().await.marketplaces().to_vec()
    }

    /// All offers in listing order
    pub async fn list_offers(&self) -> Vec<Offer> {
        self.offers.lock().await.list().into_iter().cloned().collect()
    }

    /// Offers of one kind
    pub async fn offers_by_type(&self, offer_type: OfferType) -> Vec<Offer> {
        self.offers
            .lock()
            .await
            .list_by_type(offer_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look up one offer
    pub async fn offer(&self, offer_id: &OfferId) -> Result<Offer> {
        self.offers
            .lock()
            .await
            .get(offer_id)
            .cloned()
            .ok_or_else(|| FreightlineError::OfferNotFound(offer_id.to_string()))
    }

    // Negotiation

    /// All negotiations, most recently updated first
    pub async fn negotiations(&self) -> Vec<Negotiation> {
        self.negotiations
            .lock()
            .await
            .list_recent()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look up one negotiation
    pub async fn negotiation(&self, id: &NegotiationId) -> Result<Negotiation> {
        self.negotiations
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| FreightlineError::NegotiationNotFound(id.to_string()))
    }

    /// The negotiation over an offer, if one exists
    pub async fn negotiation_by_offer(&self, offer_id: &OfferId) -> Option<Negotiation> {
        self.negotiations.lock().await.by_offer(offer_id).cloned()
    }

    /// Open a negotiation on an available offer
    pub async fn start_negotiation(
        &self,
        offer_id: &OfferId,
        target_rate: u64,
        max_rate: u64,
        ai_enabled: bool,
    ) -> Result<Negotiation> {
        let mut negotiations = self.negotiations.lock().await;
        let mut offers = self.offers.lock().await;
        let negotiation =
            negotiations.create(&mut offers, offer_id, target_rate, max_rate, ai_enabled)?;

        tracing::info!(
            "Started negotiation {} on offer {} (listed {}, asking {})",
            negotiation.id,
            offer_id,
            negotiation.initial_rate,
            target_rate
        );

        Ok(negotiation)
    }

    /// Record a human counter-offer. When the negotiation has the simulated
    /// counterparty enabled, its reply is scheduled after the configured
    /// delay.
    pub async fn add_counter_offer(
        &self,
        id: &NegotiationId,
        rate: u64,
        message: &str,
    ) -> Result<Negotiation> {
        let negotiation = {
            let mut negotiations = self.negotiations.lock().await;
            let mut offers = self.offers.lock().await;
            negotiations.add_counter_offer(&mut offers, id, rate, message, false)?
        };

        if negotiation.ai_enabled {
            self.schedule_ai_reply(negotiation.id.clone());
        }

        Ok(negotiation)
    }

    /// Conclude a negotiation; accepted books the offer, anything else
    /// returns it to the pool
    pub async fn conclude_negotiation(
        &self,
        id: &NegotiationId,
        outcome: NegotiationOutcome,
    ) -> Result<Negotiation> {
        let mut negotiations = self.negotiations.lock().await;
        let mut offers = self.offers.lock().await;
        let negotiation = negotiations.conclude(&mut offers, id, outcome)?;

        tracing::info!("Negotiation {} concluded: {}", id, negotiation.status);

        Ok(negotiation)
    }

    /// Ask the advisor for a suggested counter-rate on an offer
    pub async fn ai_suggested_rate(&self, offer_id: &OfferId) -> Result<RateSuggestion> {
        let offers = self.offers.lock().await;
        let offer = offers
            .get(offer_id)
            .ok_or_else(|| FreightlineError::OfferNotFound(offer_id.to_string()))?;
        Ok(advisor::suggest_rate(offer))
    }

    fn schedule_ai_reply(&self, id: NegotiationId) {
        let app = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(app.ai_reply_delay).await;
            match app.deliver_ai_reply(&id).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!("AI reply for {} dropped: negotiation concluded", id)
                }
                Err(e) => tracing::warn!("AI reply for {} failed: {}", id, e),
            }
        });
    }

    /// Record the simulated counterparty's reply, clamped into the
    /// negotiation bounds. Returns Ok(false) when the negotiation concluded
    /// while the reply was pending; a terminal negotiation is never touched.
    async fn deliver_ai_reply(&self, id: &NegotiationId) -> Result<bool> {
        let mut negotiations = self.negotiations.lock().await;
        let mut offers = self.offers.lock().await;

        let (offer_id, target_rate, max_rate, active) = match negotiations.get(id) {
            Some(n) => (n.offer_id.clone(), n.target_rate, n.max_rate, n.is_active()),
            None => return Err(FreightlineError::NegotiationNotFound(id.to_string())),
        };
        if !active {
            return Ok(false);
        }

        let offer = offers
            .get(&offer_id)
            .ok_or_else(|| FreightlineError::OfferNotFound(offer_id.to_string()))?;
        let suggestion = advisor::suggest_rate(offer);
        let rate = suggestion.suggested_rate.clamp(target_rate, max_rate);

        negotiations.add_counter_offer(&mut offers, id, rate, &suggestion.reasoning, true)?;

        Ok(true)
    }

    // Team collaboration

    /// Open a collaboration space for an offer transaction
    pub async fn create_team(
        &self,
        offer_id: &OfferId,
        buyer_user_id: UserId,
        buyer_name: &str,
        buyer_role: ParticipantRole,
    ) -> Result<TeamCollaboration> {
        let mut teams = self.teams.lock().await;
        let mut offers = self.offers.lock().await;

        let offer = offers
            .get(offer_id)
            .ok_or_else(|| FreightlineError::OfferNotFound(offer_id.to_string()))?
            .clone();
        let team = teams.create(&offer, buyer_user_id, buyer_name, buyer_role);

        if let Some(offer) = offers.get_mut(offer_id) {
            offer.team_id = Some(team.id.clone());
            offer.touch();
        }

        tracing::info!("Created team {} for offer {}", team.id, offer_id);

        Ok(team)
    }

    /// Look up one team
    pub async fn team(&self, team_id: &TeamId) -> Result<TeamCollaboration> {
        self.teams
            .lock()
            .await
            .get(team_id)
            .cloned()
            .ok_or_else(|| FreightlineError::TeamNotFound(team_id.to_string()))
    }

    /// The team attached to an offer, if any
    pub async fn team_by_offer(&self, offer_id: &OfferId) -> Option<TeamCollaboration> {
        self.teams.lock().await.by_offer(offer_id).cloned()
    }

    /// All teams a user participates in
    pub async fn user_teams(&self, user_id: &UserId) -> Vec<TeamCollaboration> {
        self.teams
            .lock()
            .await
            .for_user(user_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Post a message to a team
    pub async fn add_team_message(
        &self,
        team_id: &TeamId,
        user_id: UserId,
        user_name: &str,
        content: &str,
        attachments: Vec<TeamFile>,
    ) -> Result<TeamMessage> {
        self.teams
            .lock()
            .await
            .add_message(team_id, user_id, user_name, content, attachments)
    }

    /// Share a file with a team
    pub async fn upload_team_file(
        &self,
        team_id: &TeamId,
        user_id: UserId,
        name: &str,
        kind: FileKind,
        size_bytes: u64,
        description: Option<String>,
    ) -> Result<TeamFile> {
        self.teams
            .lock()
            .await
            .upload_file(team_id, user_id, name, kind, size_bytes, description)
    }

    /// Finalize a collaboration and mark its offer finalized
    pub async fn finalize_team(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
        reason: &str,
    ) -> Result<TeamCollaboration> {
        let mut teams = self.teams.lock().await;
        let mut offers = self.offers.lock().await;
        let team = teams.finalize(&mut offers, team_id, user_id, reason)?;

        tracing::info!("Team {} finalized by {}: {}", team_id, user_id, reason);

        Ok(team)
    }

    /// Invite people to a team by email; participant-only
    pub async fn send_team_invites(
        &self,
        team_id: &TeamId,
        inviter_user_id: &UserId,
        emails: Vec<String>,
        role: ParticipantRole,
        message: &str,
    ) -> Result<InviteReceipt> {
        let receipt = self
            .teams
            .lock()
            .await
            .send_invites(team_id, inviter_user_id, emails)?;

        for email in &receipt.invited_emails {
            tracing::info!("Invite sent for team {}: {} (role: {})", team_id, email, role);
        }
        tracing::debug!("Invite note: {}", message);

        Ok(receipt)
    }

    /// Compute a snapshot of marketplace activity
    pub async fn summary(&self) -> MarketSummary {
        let negotiations = self.negotiations.lock().await;
        let offers = self.offers.lock().await;

        let all_offers = offers.list();
        let all_negotiations = negotiations.list_recent();

        let savings: Vec<f64> = all_negotiations
            .iter()
            .filter(|n| n.status == NegotiationStatus::Accepted && n.initial_rate > 0)
            .map(|n| {
                (n.initial_rate as f64 - n.current_rate as f64) / n.initial_rate as f64 * 100.0
            })
            .collect();
        let average_savings_pct = if savings.is_empty() {
            0.0
        } else {
            savings.iter().sum::<f64>() / savings.len() as f64
        };

        MarketSummary {
            total_offers: all_offers.len(),
            available_offers: all_offers.iter().filter(|o| o.is_available()).count(),
            booked_offers: all_offers
                .iter()
                .filter(|o| o.status == OfferStatus::Booked)
                .count(),
            active_negotiations: all_negotiations.iter().filter(|n| n.is_active()).count(),
            concluded_negotiations: all_negotiations
                .iter()
                .filter(|n| !n.is_active())
                .count(),
            average_savings_pct,
        }
    }
}
