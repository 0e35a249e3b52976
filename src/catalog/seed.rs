//! Seed dataset for the aggregated catalog.
//!
//! Stands in for the upstream marketplace feeds; the store starts from this
//! snapshot and all mutation happens through the engines.

use crate::types::{ContactInfo, Location, MarketplaceId, OfferStatus, UserId};

use super::offer::{Marketplace, Offer, OfferDetails, ServiceKind, WarehouseKind};
use super::store::OfferStore;

fn contact(name: &str, phone: &str, email: &str) -> ContactInfo {
    ContactInfo {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

/// Build a store pre-loaded with a representative slice of the network:
/// both marketplaces, every offer kind, and one already-booked listing.
pub fn seed() -> OfferStore {
    let mut store = OfferStore::new();

    let freightex = MarketplaceId("mp-freightex".to_string());
    let loadhub = MarketplaceId("mp-loadhub".to_string());

    store.add_marketplace(Marketplace {
        id: freightex.clone(),
        name: "FreightEx".to_string(),
        description: "Spot-market loads and carrier capacity".to_string(),
        website: "https://freightex.example.com".to_string(),
    });
    store.add_marketplace(Marketplace {
        id: loadhub.clone(),
        name: "LoadHub".to_string(),
        description: "Warehousing and logistics services exchange".to_string(),
        website: "https://loadhub.example.com".to_string(),
    });

    store.insert(Offer::new(
        freightex.clone(),
        "Dry van: Atlanta to Miami",
        "Palletized consumer goods, single drop, dock-to-dock.",
        1850,
        UserId("u-atlantic-haul".to_string()),
        contact("Maria Gonzalez", "+1-555-0134", "maria@atlantichaul.example.com"),
        OfferDetails::Cargo {
            pickup: Location::new("Atlanta", "GA", "US"),
            delivery: Location::new("Miami", "FL", "US"),
            distance_miles: 662,
            weight_kg: 14500,
            cargo_type: "consumer goods".to_string(),
            hazardous: false,
        },
    ));

    store.insert(Offer::new(
        freightex.clone(),
        "Reefer: Fresno to Seattle",
        "Chilled produce, continuous temperature log required.",
        3200,
        UserId("u-pacific-fresh".to_string()),
        contact("Tom Novak", "+1-555-0188", "tom@pacificfresh.example.com"),
        OfferDetails::Cargo {
            pickup: Location::new("Fresno", "CA", "US"),
            delivery: Location::new("Seattle", "WA", "US"),
            distance_miles: 908,
            weight_kg: 19000,
            cargo_type: "produce".to_string(),
            hazardous: false,
        },
    ));

    store.insert(Offer::new(
        freightex.clone(),
        "53ft dry van capacity, Chicago outbound",
        "Team drivers, midwest lanes, available through month end.",
        2100,
        UserId("u-lakeline".to_string()),
        contact("Priya Shah", "+1-555-0117", "priya@lakeline.example.com"),
        OfferDetails::Vehicle {
            vehicle_type: "dry van".to_string(),
            capacity_kg: 20000,
            origin: Location::new("Chicago", "IL", "US"),
            destination: Location::new("Kansas City", "MO", "US"),
        },
    ));

    store.insert(Offer::new(
        loadhub.clone(),
        "Cold storage, Newark NJ",
        "Rack space in a temperature-monitored facility near port.",
        5400,
        UserId("u-harborcold".to_string()),
        contact("Ed Brennan", "+1-555-0129", "ed@harborcold.example.com"),
        OfferDetails::Warehouse {
            kind: WarehouseKind::Cold,
            location: Location::new("Newark", "NJ", "US"),
            total_space_sqm: 4200,
        },
    ));

    store.insert(Offer::new(
        loadhub.clone(),
        "Customs brokerage, US-MX lanes",
        "Full documentation handling for cross-border moves.",
        950,
        UserId("u-border-logic".to_string()),
        contact("Lucia Ortega", "+1-555-0163", "lucia@borderlogic.example.com"),
        OfferDetails::Service {
            kind: ServiceKind::Customs,
            coverage: vec!["US".to_string(), "MX".to_string()],
        },
    ));

    // One listing already taken, so the unavailable path is visible in demos
    let booked_id = store.insert(Offer::new(
        loadhub,
        "Flatbed: Houston to New Orleans",
        "Steel coils, tarped.",
        1400,
        UserId("u-gulfline".to_string()),
        contact("Andre Dubois", "+1-555-0175", "andre@gulfline.example.com"),
        OfferDetails::Cargo {
            pickup: Location::new("Houston", "TX", "US"),
            delivery: Location::new("New Orleans", "LA", "US"),
            distance_miles: 348,
            weight_kg: 21000,
            cargo_type: "steel".to_string(),
            hazardous: false,
        },
    ));
    if let Some(offer) = store.get_mut(&booked_id) {
        offer.status = OfferStatus::Booked;
    }

    store
}
