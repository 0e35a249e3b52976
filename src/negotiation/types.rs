//! Negotiation records and state machine

use crate::types::{NegotiationId, OfferId, OfferType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Negotiation lifecycle. Terminal once non-active; no transition leaves a
/// terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationStatus {
    Active,
    Accepted,
    Rejected,
    Expired,
}

impl NegotiationStatus {
    /// Check if the negotiation is in a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NegotiationStatus::Active)
    }

    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for NegotiationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NegotiationStatus::Active => "active",
            NegotiationStatus::Accepted => "accepted",
            NegotiationStatus::Rejected => "rejected",
            NegotiationStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// How a negotiation ends
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationOutcome {
    Accepted,
    Rejected,
    Expired,
}

impl NegotiationOutcome {
    /// The terminal status this outcome resolves to
    pub fn status(&self) -> NegotiationStatus {
        match self {
            NegotiationOutcome::Accepted => NegotiationStatus::Accepted,
            NegotiationOutcome::Rejected => NegotiationStatus::Rejected,
            NegotiationOutcome::Expired => NegotiationStatus::Expired,
        }
    }
}

/// One dated, rated, annotated proposal within a negotiation's history.
/// Immutable once recorded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CounterOffer {
    pub id: String,
    pub negotiation_id: NegotiationId,
    pub rate: u64,
    pub message: String,
    pub from_ai: bool,
    pub created_at: DateTime<Utc>,
}

impl CounterOffer {
    pub(crate) fn new(negotiation_id: NegotiationId, rate: u64, message: String, from_ai: bool) -> Self {
        Self {
            id: format!("bid-{}", uuid::Uuid::new_v4()),
            negotiation_id,
            rate,
            message,
            from_ai,
            created_at: Utc::now(),
        }
    }
}

/// A bounded exchange of counter-offers over a single offer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Negotiation {
    pub id: NegotiationId,
    pub offer_id: OfferId,
    pub offer_type: OfferType,
    /// The offer's listed price when the negotiation started
    pub initial_rate: u64,
    /// Rate of the latest counter-offer
    pub current_rate: u64,
    pub target_rate: u64,
    pub max_rate: u64,
    pub ai_enabled: bool,
    /// Insertion-ordered history; index 0 is the negotiator's opening ask
    pub counter_offers: Vec<CounterOffer>,
    pub status: NegotiationStatus,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Negotiation {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Rate of the most recent counter-offer, if any
    pub fn latest_rate(&self) -> Option<u64> {
        self.counter_offers.last().map(|c| c.rate)
    }

    /// Rounds exchanged so far
    pub fn rounds(&self) -> usize {
        self.counter_offers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(NegotiationStatus::Active.is_active());
        assert!(!NegotiationStatus::Active.is_terminal());

        for status in [
            NegotiationStatus::Accepted,
            NegotiationStatus::Rejected,
            NegotiationStatus::Expired,
        ] {
            assert!(status.is_terminal());
            assert!(!status.is_active());
        }
    }

    #[test]
    fn test_outcome_resolves_to_terminal_status() {
        assert_eq!(
            NegotiationOutcome::Accepted.status(),
            NegotiationStatus::Accepted
        );
        assert_eq!(
            NegotiationOutcome::Rejected.status(),
            NegotiationStatus::Rejected
        );
        assert!(NegotiationOutcome::Expired.status().is_terminal());
    }

    #[test]
    fn test_counter_offer_keeps_parent_id() {
        let negotiation_id = NegotiationId::generate();
        let counter = CounterOffer::new(negotiation_id.clone(), 900, "opening".to_string(), false);

        assert_eq!(counter.negotiation_id, negotiation_id);
        assert!(counter.id.starts_with("bid-"));
        assert!(!counter.from_ai);
    }
}
