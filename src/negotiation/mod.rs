//! Negotiation lifecycle engine and rate advisor

pub mod advisor;
pub mod engine;
pub mod types;

pub use advisor::{suggest_rate, Confidence, RateSuggestion};
pub use engine::NegotiationEngine;
pub use types::{CounterOffer, Negotiation, NegotiationOutcome, NegotiationStatus};
