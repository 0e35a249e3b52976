//! In-memory offer repository

use crate::types::{MarketplaceId, OfferId, OfferType};
use std::collections::HashMap;

use super::offer::{Marketplace, Offer};

/// Catalog of offers and the marketplaces they were aggregated from.
///
/// Constructed once at process start and handed `&mut` into engine calls;
/// the async facade serializes access. A database-backed store could replace
/// this without touching engine logic.
#[derive(Debug, Default)]
pub struct OfferStore {
    offers: HashMap<OfferId, Offer>,
    listing_order: Vec<OfferId>,
    marketplaces: Vec<Marketplace>,
}

impl OfferStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an aggregated marketplace
    pub fn add_marketplace(&mut self, marketplace: Marketplace) {
        self.marketplaces.push(marketplace);
    }

    /// All registered marketplaces
    pub fn marketplaces(&self) -> &[Marketplace] {
        &self.marketplaces
    }

    /// Add an offer to the catalog, returning its id
    pub fn insert(&mut self, offer: Offer) -> OfferId {
        let id = offer.id.clone();
        self.listing_order.push(id.clone());
        self.offers.insert(id.clone(), offer);
        id
    }

    pub fn get(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.get(id)
    }

    pub fn get_mut(&mut self, id: &OfferId) -> Option<&mut Offer> {
        self.offers.get_mut(id)
    }

    /// All offers in listing order
    pub fn list(&self) -> Vec<&Offer> {
        self.listing_order
            .iter()
            .filter_map(|id| self.offers.get(id))
            .collect()
    }

    /// Offers of one kind, in listing order
    pub fn list_by_type(&self, offer_type: OfferType) -> Vec<&Offer> {
        self.list()
            .into_iter()
            .filter(|o| o.offer_type() == offer_type)
            .collect()
    }

    /// Offers aggregated from one marketplace, in listing order
    pub fn list_by_marketplace(&self, marketplace_id: &MarketplaceId) -> Vec<&Offer> {
        self.list()
            .into_iter()
            .filter(|o| &o.marketplace_id == marketplace_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::offer::{OfferDetails, ServiceKind};
    use crate::types::{ContactInfo, Location, UserId};

    fn sample_offer(marketplace: &str, title: &str, details: OfferDetails) -> Offer {
        Offer::new(
            MarketplaceId(marketplace.to_string()),
            title,
            "test listing",
            1000,
            UserId("u-owner".to_string()),
            ContactInfo {
                name: "Lee Park".to_string(),
                phone: "+1-555-0100".to_string(),
                email: "lee@example.com".to_string(),
            },
            details,
        )
    }

    fn cargo_details() -> OfferDetails {
        OfferDetails::Cargo {
            pickup: Location::new("Dallas", "TX", "US"),
            delivery: Location::new("Denver", "CO", "US"),
            distance_miles: 794,
            weight_kg: 12000,
            cargo_type: "dry van".to_string(),
            hazardous: false,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = OfferStore::new();
        let offer = sample_offer("mp-1", "Load A", cargo_details());
        let id = store.insert(offer);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().title, "Load A");
        assert!(store.get(&OfferId("offer-missing".to_string())).is_none());
    }

    #[test]
    fn test_listing_preserves_insertion_order() {
        let mut store = OfferStore::new();
        store.insert(sample_offer("mp-1", "first", cargo_details()));
        store.insert(sample_offer("mp-1", "second", cargo_details()));
        store.insert(sample_offer("mp-2", "third", cargo_details()));

        let titles: Vec<&str> = store.list().iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_filtered_listings() {
        let mut store = OfferStore::new();
        store.insert(sample_offer("mp-1", "cargo load", cargo_details()));
        store.insert(sample_offer(
            "mp-2",
            "customs help",
            OfferDetails::Service {
                kind: ServiceKind::Customs,
                coverage: vec!["US".to_string(), "MX".to_string()],
            },
        ));

        assert_eq!(store.list_by_type(OfferType::Cargo).len(), 1);
        assert_eq!(store.list_by_type(OfferType::Warehouse).len(), 0);
        assert_eq!(
            store
                .list_by_marketplace(&MarketplaceId("mp-2".to_string()))
                .len(),
            1
        );
    }
}
