//! Negotiation engine owns all negotiation records and drives their lifecycle

use crate::catalog::OfferStore;
use crate::error::{FreightlineError, Result};
use crate::types::{NegotiationId, OfferId, OfferStatus};
use chrono::Utc;
use std::collections::HashMap;

use super::types::{CounterOffer, Negotiation, NegotiationOutcome, NegotiationStatus};

/// Negotiation engine: one record per negotiation episode, at most one
/// active negotiation per offer (enforced by the offer status check on
/// creation).
pub struct NegotiationEngine {
    negotiations: HashMap<NegotiationId, Negotiation>,
}

impl NegotiationEngine {
    /// Create new negotiation engine
    pub fn new() -> Self {
        Self {
            negotiations: HashMap::new(),
        }
    }

    /// Open a negotiation on an available offer.
    ///
    /// The offer moves to `negotiating`, and the history is seeded with the
    /// negotiator's opening ask at `target_rate`, so `initial_rate` (the
    /// listed price) and the first entry's rate legitimately differ. One
    /// generated id is shared by the negotiation and the seed entry's
    /// back-reference.
    pub fn create(
        &mut self,
        offers: &mut OfferStore,
        offer_id: &OfferId,
        target_rate: u64,
        max_rate: u64,
        ai_enabled: bool,
    ) -> Result<Negotiation> {
        if target_rate > max_rate {
            return Err(FreightlineError::InvalidRateBounds {
                target: target_rate,
                max: max_rate,
            });
        }

        let offer = offers
            .get_mut(offer_id)
            .ok_or_else(|| FreightlineError::OfferNotFound(offer_id.to_string()))?;
        if !offer.is_available() {
            return Err(FreightlineError::OfferUnavailable {
                id: offer_id.to_string(),
                status: offer.status,
            });
        }

        let id = NegotiationId::generate();
        let now = Utc::now();
        let opening = CounterOffer::new(
            id.clone(),
            target_rate,
            format!("Initial offer: {}", target_rate),
            false,
        );
        let negotiation = Negotiation {
            id: id.clone(),
            offer_id: offer_id.clone(),
            offer_type: offer.offer_type(),
            initial_rate: offer.price,
            current_rate: target_rate,
            target_rate,
            max_rate,
            ai_enabled,
            counter_offers: vec![opening],
            status: NegotiationStatus::Active,
            started_at: now,
            updated_at: now,
        };

        offer.status = OfferStatus::Negotiating;
        offer.touch();

        self.negotiations.insert(id, negotiation.clone());

        Ok(negotiation)
    }

    /// Record a counter-offer on an active negotiation.
    ///
    /// The engine is a ledger: rates are appended as given, in call order.
    /// Clamping an AI suggestion into the negotiation bounds is the caller's
    /// job. The linked offer's price mirrors the latest rate.
    pub fn add_counter_offer(
        &mut self,
        offers: &mut OfferStore,
        id: &NegotiationId,
        rate: u64,
        message: &str,
        from_ai: bool,
    ) -> Result<Negotiation> {
        let negotiation = self
            .negotiations
            .get_mut(id)
            .ok_or_else(|| FreightlineError::NegotiationNotFound(id.to_string()))?;
        if !negotiation.is_active() {
            return Err(FreightlineError::NegotiationClosed(id.to_string()));
        }

        negotiation
            .counter_offers
            .push(CounterOffer::new(id.clone(), rate, message.to_string(), from_ai));
        negotiation.current_rate = rate;
        negotiation.updated_at = Utc::now();

        if let Some(offer) = offers.get_mut(&negotiation.offer_id) {
            offer.price = rate;
            offer.touch();
        }

        Ok(negotiation.clone())
    }

    /// Conclude an active negotiation and propagate the outcome to the
    /// offer: accepted books it, anything else returns it to the pool.
    /// Concluding twice is an error; terminal negotiations stay terminal.
    pub fn conclude(
        &mut self,
        offers: &mut OfferStore,
        id: &NegotiationId,
        outcome: NegotiationOutcome,
    ) -> Result<Negotiation> {
        let negotiation = self
            .negotiations
            .get_mut(id)
            .ok_or_else(|| FreightlineError::NegotiationNotFound(id.to_string()))?;
        if !negotiation.is_active() {
            return Err(FreightlineError::NegotiationClosed(id.to_string()));
        }

        negotiation.status = outcome.status();
        negotiation.updated_at = Utc::now();

        if let Some(offer) = offers.get_mut(&negotiation.offer_id) {
            offer.status = match outcome {
                NegotiationOutcome::Accepted => OfferStatus::Booked,
                NegotiationOutcome::Rejected | NegotiationOutcome::Expired => {
                    OfferStatus::Available
                }
            };
            offer.touch();
        }

        Ok(negotiation.clone())
    }

    /// Get a negotiation
    pub fn get(&self, id: &NegotiationId) -> Option<&Negotiation> {
        self.negotiations.get(id)
    }

    /// Find the negotiation over an offer, if one exists
    pub fn by_offer(&self, offer_id: &OfferId) -> Option<&Negotiation> {
        self.negotiations.values().find(|n| &n.offer_id == offer_id)
    }

    /// All negotiations, most recently updated first
    pub fn list_recent(&self) -> Vec<&Negotiation> {
        let mut all: Vec<&Negotiation> = self.negotiations.values().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        all
    }
}

impl Default for NegotiationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::offer::{Offer, OfferDetails};
    use crate::types::{ContactInfo, Location, MarketplaceId, OfferType, UserId};

    fn cargo_offer(price: u64) -> Offer {
        Offer::new(
            MarketplaceId("mp-test".to_string()),
            "Dry van: Austin to Tulsa",
            "test load",
            price,
            UserId("u-owner".to_string()),
            ContactInfo {
                name: "Sam Ortiz".to_string(),
                phone: "+1-555-0151".to_string(),
                email: "sam@example.com".to_string(),
            },
            OfferDetails::Cargo {
                pickup: Location::new("Austin", "TX", "US"),
                delivery: Location::new("Tulsa", "OK", "US"),
                distance_miles: 430,
                weight_kg: 9000,
                cargo_type: "dry van".to_string(),
                hazardous: false,
            },
        )
    }

    fn store_with_offer(price: u64) -> (OfferStore, OfferId) {
        let mut store = OfferStore::new();
        let id = store.insert(cargo_offer(price));
        (store, id)
    }

    #[test]
    fn test_create_seeds_opening_ask() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();

        let negotiation = engine
            .create(&mut store, &offer_id, 900, 950, true)
            .unwrap();

        assert_eq!(negotiation.status, NegotiationStatus::Active);
        assert_eq!(negotiation.initial_rate, 1000);
        assert_eq!(negotiation.current_rate, 900);
        assert_eq!(negotiation.offer_type, OfferType::Cargo);
        assert_eq!(negotiation.counter_offers.len(), 1);

        let opening = &negotiation.counter_offers[0];
        assert_eq!(opening.rate, 900);
        assert!(!opening.from_ai);
        // One id for the negotiation and its seed entry's back-reference
        assert_eq!(opening.negotiation_id, negotiation.id);

        assert_eq!(
            store.get(&offer_id).unwrap().status,
            OfferStatus::Negotiating
        );
    }

    #[test]
    fn test_create_missing_offer() {
        let mut store = OfferStore::new();
        let mut engine = NegotiationEngine::new();

        let result = engine.create(
            &mut store,
            &OfferId("offer-missing".to_string()),
            900,
            950,
            false,
        );
        assert!(matches!(result, Err(FreightlineError::OfferNotFound(_))));
    }

    #[test]
    fn test_single_active_negotiation_per_offer() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();

        engine
            .create(&mut store, &offer_id, 900, 950, false)
            .unwrap();

        let second = engine.create(&mut store, &offer_id, 880, 940, false);
        assert!(matches!(
            second,
            Err(FreightlineError::OfferUnavailable { .. })
        ));
    }

    #[test]
    fn test_create_rejects_inverted_bounds() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();

        let result = engine.create(&mut store, &offer_id, 960, 950, false);
        assert!(matches!(
            result,
            Err(FreightlineError::InvalidRateBounds { .. })
        ));
        // Precondition failure leaves the offer untouched
        assert!(store.get(&offer_id).unwrap().is_available());
    }

    #[test]
    fn test_counter_offers_append_in_order() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();
        let id = engine
            .create(&mut store, &offer_id, 900, 950, false)
            .unwrap()
            .id;

        engine
            .add_counter_offer(&mut store, &id, 920, "meet in the middle", false)
            .unwrap();
        let negotiation = engine
            .add_counter_offer(&mut store, &id, 910, "final", true)
            .unwrap();

        assert_eq!(negotiation.counter_offers.len(), 3);
        let rates: Vec<u64> = negotiation.counter_offers.iter().map(|c| c.rate).collect();
        assert_eq!(rates, vec![900, 920, 910]);
        assert_eq!(negotiation.current_rate, 910);
        assert_eq!(negotiation.latest_rate(), Some(910));

        // Offer price mirrors the latest counter-offer
        assert_eq!(store.get(&offer_id).unwrap().price, 910);
    }

    #[test]
    fn test_counter_offer_on_missing_negotiation() {
        let (mut store, _) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();

        let result = engine.add_counter_offer(
            &mut store,
            &NegotiationId("neg-missing".to_string()),
            920,
            "hello",
            false,
        );
        assert!(matches!(
            result,
            Err(FreightlineError::NegotiationNotFound(_))
        ));
    }

    #[test]
    fn test_accept_books_offer() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();
        let id = engine
            .create(&mut store, &offer_id, 900, 950, false)
            .unwrap()
            .id;

        let negotiation = engine
            .conclude(&mut store, &id, NegotiationOutcome::Accepted)
            .unwrap();

        assert_eq!(negotiation.status, NegotiationStatus::Accepted);
        assert_eq!(store.get(&offer_id).unwrap().status, OfferStatus::Booked);
    }

    #[test]
    fn test_reject_returns_offer_to_pool() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();
        let id = engine
            .create(&mut store, &offer_id, 900, 950, false)
            .unwrap()
            .id;

        engine
            .conclude(&mut store, &id, NegotiationOutcome::Rejected)
            .unwrap();

        assert_eq!(store.get(&offer_id).unwrap().status, OfferStatus::Available);
    }

    #[test]
    fn test_terminal_negotiation_rejects_counter_offers() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();
        let id = engine
            .create(&mut store, &offer_id, 900, 950, false)
            .unwrap()
            .id;

        engine
            .conclude(&mut store, &id, NegotiationOutcome::Expired)
            .unwrap();

        let result = engine.add_counter_offer(&mut store, &id, 930, "too late", false);
        assert!(matches!(result, Err(FreightlineError::NegotiationClosed(_))));
    }

    #[test]
    fn test_terminal_negotiation_rejects_reconclusion() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();
        let id = engine
            .create(&mut store, &offer_id, 900, 950, false)
            .unwrap()
            .id;

        engine
            .conclude(&mut store, &id, NegotiationOutcome::Accepted)
            .unwrap();

        let again = engine.conclude(&mut store, &id, NegotiationOutcome::Rejected);
        assert!(matches!(again, Err(FreightlineError::NegotiationClosed(_))));
        // The first conclusion stands
        assert_eq!(store.get(&offer_id).unwrap().status, OfferStatus::Booked);
    }

    #[test]
    fn test_list_recent_orders_by_update() {
        let mut store = OfferStore::new();
        let first = store.insert(cargo_offer(1000));
        let second = store.insert(cargo_offer(2000));
        let mut engine = NegotiationEngine::new();

        let n1 = engine
            .create(&mut store, &first, 900, 950, false)
            .unwrap()
            .id;
        let n2 = engine
            .create(&mut store, &second, 1800, 1900, false)
            .unwrap()
            .id;

        // Touch the first negotiation so it becomes the most recent
        engine
            .add_counter_offer(&mut store, &n1, 920, "bump", false)
            .unwrap();

        let recent = engine.list_recent();
        assert_eq!(recent[0].id, n1);
        assert_eq!(recent[1].id, n2);
        assert!(engine.by_offer(&second).is_some());
    }

    #[test]
    fn test_full_negotiation_flow() {
        let (mut store, offer_id) = store_with_offer(1000);
        let mut engine = NegotiationEngine::new();

        let negotiation = engine
            .create(&mut store, &offer_id, 900, 950, true)
            .unwrap();
        assert_eq!(negotiation.initial_rate, 1000);
        assert_eq!(negotiation.current_rate, 900);
        assert_eq!(negotiation.counter_offers.len(), 1);

        let negotiation = engine
            .add_counter_offer(&mut store, &negotiation.id, 920, "counter", false)
            .unwrap();
        assert_eq!(negotiation.current_rate, 920);
        assert_eq!(store.get(&offer_id).unwrap().price, 920);

        let negotiation = engine
            .conclude(&mut store, &negotiation.id, NegotiationOutcome::Accepted)
            .unwrap();
        assert_eq!(negotiation.status, NegotiationStatus::Accepted);

        let offer = store.get(&offer_id).unwrap();
        assert_eq!(offer.status, OfferStatus::Booked);
        assert_eq!(offer.price, 920);
    }
}
