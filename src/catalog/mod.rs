//! Offer catalog: records, in-memory store, and seed dataset

pub mod offer;
pub mod seed;
pub mod store;

pub use offer::{Marketplace, Offer, OfferDetails, ServiceKind, WarehouseKind};
pub use store::OfferStore;
