//! Error types for Freightline

use crate::types::{OfferStatus, TeamStatus};
use thiserror::Error;

/// Main error type for Freightline
#[derive(Error, Debug)]
pub enum FreightlineError {
    // Lookup errors
    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Negotiation not found: {0}")]
    NegotiationNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    // State errors
    #[error("Offer {id} is not available for negotiation (status: {status})")]
    OfferUnavailable { id: String, status: OfferStatus },

    #[error("Negotiation {0} is no longer active")]
    NegotiationClosed(String),

    #[error("Team is already {0}")]
    TeamClosed(TeamStatus),

    #[error("Invalid rate bounds: target {target} exceeds max {max}")]
    InvalidRateBounds { target: u64, max: u64 },

    // Authorization errors
    #[error("User {user_id} is not a participant of team {team_id}")]
    NotAParticipant { user_id: String, team_id: String },

    // General errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Freightline operations
pub type Result<T> = std::result::Result<T, FreightlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FreightlineError::OfferNotFound("offer-123".to_string());
        assert_eq!(err.to_string(), "Offer not found: offer-123");
    }

    #[test]
    fn test_unavailable_offer_error() {
        let err = FreightlineError::OfferUnavailable {
            id: "offer-7".to_string(),
            status: OfferStatus::Booked,
        };
        assert_eq!(
            err.to_string(),
            "Offer offer-7 is not available for negotiation (status: booked)"
        );
    }

    #[test]
    fn test_team_closed_error() {
        let err = FreightlineError::TeamClosed(TeamStatus::Finalized);
        assert_eq!(err.to_string(), "Team is already finalized");
    }

    #[test]
    fn test_result_type() {
        fn sample_function() -> Result<u64> {
            Ok(42)
        }

        assert_eq!(sample_function().unwrap(), 42);
    }
}
