//! Offer records for the aggregated catalog

use crate::types::{
    ContactInfo, Location, MarketplaceId, OfferId, OfferStatus, OfferType, TeamId, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An upstream marketplace whose listings are aggregated into the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Marketplace {
    pub id: MarketplaceId,
    pub name: String,
    pub description: String,
    pub website: String,
}

/// Warehouse storage classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarehouseKind {
    Dry,
    Cold,
    Bonded,
    Hazmat,
    CrossDock,
}

impl fmt::Display for WarehouseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarehouseKind::Dry => "dry",
            WarehouseKind::Cold => "cold",
            WarehouseKind::Bonded => "bonded",
            WarehouseKind::Hazmat => "hazmat",
            WarehouseKind::CrossDock => "cross-dock",
        };
        write!(f, "{}", s)
    }
}

/// Logistics service categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Transport,
    Logistics,
    Customs,
    Consulting,
    Other,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceKind::Transport => "transport",
            ServiceKind::Logistics => "logistics",
            ServiceKind::Customs => "customs",
            ServiceKind::Consulting => "consulting",
            ServiceKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Kind-specific offer fields, tagged by offer type
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OfferDetails {
    Cargo {
        pickup: Location,
        delivery: Location,
        distance_miles: u64,
        weight_kg: u64,
        cargo_type: String,
        hazardous: bool,
    },
    Vehicle {
        vehicle_type: String,
        capacity_kg: u64,
        origin: Location,
        destination: Location,
    },
    Warehouse {
        kind: WarehouseKind,
        location: Location,
        total_space_sqm: u64,
    },
    Service {
        kind: ServiceKind,
        coverage: Vec<String>,
    },
}

impl OfferDetails {
    /// The kind tag for these details
    pub fn offer_type(&self) -> OfferType {
        match self {
            OfferDetails::Cargo { .. } => OfferType::Cargo,
            OfferDetails::Vehicle { .. } => OfferType::Vehicle,
            OfferDetails::Warehouse { .. } => OfferType::Warehouse,
            OfferDetails::Service { .. } => OfferType::Service,
        }
    }
}

/// A listed transportable asset or service with a price and lifecycle status
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub marketplace_id: MarketplaceId,
    pub title: String,
    pub description: String,
    /// Current asking or agreed rate. Mirrors the latest counter-offer while
    /// a negotiation is running.
    pub price: u64,
    pub currency: String,
    pub status: OfferStatus,
    pub owner_id: UserId,
    pub contact: ContactInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    pub details: OfferDetails,
}

impl Offer {
    /// Create a freshly listed offer
    pub fn new(
        marketplace_id: MarketplaceId,
        title: &str,
        description: &str,
        price: u64,
        owner_id: UserId,
        contact: ContactInfo,
        details: OfferDetails,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OfferId::generate(),
            marketplace_id,
            title: title.to_string(),
            description: description.to_string(),
            price,
            currency: "USD".to_string(),
            status: OfferStatus::Available,
            owner_id,
            contact,
            created_at: now,
            updated_at: now,
            transaction_id: None,
            team_id: None,
            details,
        }
    }

    pub fn offer_type(&self) -> OfferType {
        self.details.offer_type()
    }

    pub fn is_available(&self) -> bool {
        self.status == OfferStatus::Available
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
