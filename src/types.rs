//! Core types used throughout Freightline

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for offers
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferId(pub String);

impl OfferId {
    /// Generate a new unique offer ID
    pub fn generate() -> Self {
        Self(format!("offer-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for negotiations
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NegotiationId(pub String);

impl NegotiationId {
    /// Generate a new unique negotiation ID
    pub fn generate() -> Self {
        Self(format!("neg-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for NegotiationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for team collaboration spaces
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

impl TeamId {
    /// Generate a new unique team ID
    pub fn generate() -> Self {
        Self(format!("team-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for users (supplied by the identity layer, not generated here)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Reserved author for engine-generated messages
    pub fn system() -> Self {
        Self("system".to_string())
    }

    pub fn is_system(&self) -> bool {
        self.0 == "system"
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for upstream marketplaces being aggregated
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketplaceId(pub String);

impl fmt::Display for MarketplaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Offer kind tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Cargo,
    Vehicle,
    Warehouse,
    Service,
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfferType::Cargo => "cargo",
            OfferType::Vehicle => "vehicle",
            OfferType::Warehouse => "warehouse",
            OfferType::Service => "service",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for OfferType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cargo" => Ok(OfferType::Cargo),
            "vehicle" => Ok(OfferType::Vehicle),
            "warehouse" => Ok(OfferType::Warehouse),
            "service" => Ok(OfferType::Service),
            other => Err(format!("unknown offer type: {}", other)),
        }
    }
}

/// Commercial lifecycle of an offer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Available,
    Negotiating,
    Booked,
    Completed,
    Cancelled,
    Finalized,
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OfferStatus::Available => "available",
            OfferStatus::Negotiating => "negotiating",
            OfferStatus::Booked => "booked",
            OfferStatus::Completed => "completed",
            OfferStatus::Cancelled => "cancelled",
            OfferStatus::Finalized => "finalized",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of a team collaboration space.
///
/// Completed and Cancelled are declared for parity with the offer lifecycle
/// but no engine operation currently reaches them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    Active,
    Completed,
    Cancelled,
    Finalized,
}

impl TeamStatus {
    /// Terminal states admit no further writes
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TeamStatus::Active)
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TeamStatus::Active => "active",
            TeamStatus::Completed => "completed",
            TeamStatus::Cancelled => "cancelled",
            TeamStatus::Finalized => "finalized",
        };
        write!(f, "{}", s)
    }
}

/// Role a user plays on a freight transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Carrier,
    Shipper,
    Broker,
    Warehouse,
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParticipantRole::Carrier => "carrier",
            ParticipantRole::Shipper => "shipper",
            ParticipantRole::Broker => "broker",
            ParticipantRole::Warehouse => "warehouse",
        };
        write!(f, "{}", s)
    }
}

/// Contact details attached to an offer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// A geographic point in the freight network
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Location {
    pub fn new(city: &str, state: &str, country: &str) -> Self {
        Self {
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}
