//! Rate advisor simulating an automated negotiating counterpart.
//!
//! Stateless per-kind heuristics over the offer's current price; no history
//! or learning. Callers clamp the suggestion into negotiation bounds before
//! recording it as a counter-offer.

use crate::catalog::offer::{Offer, OfferDetails};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much weight to give a suggestion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        write!(f, "{}", s)
    }
}

/// A suggested counter-rate with its rationale
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateSuggestion {
    pub suggested_rate: u64,
    pub confidence: Confidence,
    pub reasoning: String,
}

/// Price discounted by a whole percentage, rounded to the nearest unit
fn discounted(price: u64, percent: u64) -> u64 {
    (price * (100 - percent) + 50) / 100
}

/// Compute a suggested counter-rate for an offer.
///
/// Cargo gets a randomized 5-12% discount; the other kinds use fixed
/// per-kind discounts. Side-effect-free.
pub fn suggest_rate(offer: &Offer) -> RateSuggestion {
    let price = offer.price;

    match &offer.details {
        OfferDetails::Cargo {
            distance_miles,
            cargo_type,
            ..
        } => {
            let discount = rand::thread_rng().gen_range(5..=12);
            let rate_per_mile = price as f64 / (*distance_miles).max(1) as f64;
            RateSuggestion {
                suggested_rate: discounted(price, discount),
                confidence: Confidence::High,
                reasoning: format!(
                    "Based on current market conditions for {}, rates along this lane are \
                     trending {}% lower than listed prices. Historical data suggests \
                     ${:.2}/mile is competitive.",
                    cargo_type, discount, rate_per_mile
                ),
            }
        }
        OfferDetails::Vehicle { vehicle_type, .. } => RateSuggestion {
            suggested_rate: discounted(price, 8),
            confidence: Confidence::Medium,
            reasoning: format!(
                "Current demand for {} vehicles is moderate. You can negotiate a \
                 competitive rate approximately 8% below asking price based on similar \
                 routes.",
                vehicle_type
            ),
        },
        OfferDetails::Warehouse { kind, location, .. } => RateSuggestion {
            suggested_rate: discounted(price, 15),
            confidence: Confidence::High,
            reasoning: format!(
                "{} warehouse space in {} currently has 15% vacancy rate. Negotiate for \
                 a 15% discount for longer-term commitments.",
                kind, location.city
            ),
        },
        OfferDetails::Service { kind, .. } => RateSuggestion {
            suggested_rate: discounted(price, 10),
            confidence: Confidence::Low,
            reasoning: format!(
                "The market for {} services is competitive but hard to predict. Suggest \
                 starting with a 10% discount request with room for negotiation.",
                kind
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::offer::{ServiceKind, WarehouseKind};
    use crate::types::{ContactInfo, Location, MarketplaceId, UserId};

    fn offer_with(price: u64, details: OfferDetails) -> Offer {
        Offer::new(
            MarketplaceId("mp-test".to_string()),
            "listing",
            "test",
            price,
            UserId("u-owner".to_string()),
            ContactInfo {
                name: "Ana Silva".to_string(),
                phone: "+1-555-0102".to_string(),
                email: "ana@example.com".to_string(),
            },
            details,
        )
    }

    fn cargo(price: u64) -> Offer {
        offer_with(
            price,
            OfferDetails::Cargo {
                pickup: Location::new("Reno", "NV", "US"),
                delivery: Location::new("Boise", "ID", "US"),
                distance_miles: 422,
                weight_kg: 8000,
                cargo_type: "machinery".to_string(),
                hazardous: false,
            },
        )
    }

    #[test]
    fn test_cargo_discount_stays_in_band() {
        let offer = cargo(1000);

        // The draw is random per call; every draw must stay inside 5-12%
        for _ in 0..50 {
            let suggestion = suggest_rate(&offer);
            assert!(
                suggestion.suggested_rate >= 880 && suggestion.suggested_rate <= 950,
                "rate {} outside the 5-12% discount band",
                suggestion.suggested_rate
            );
            assert_eq!(suggestion.confidence, Confidence::High);
            assert!(suggestion.reasoning.contains("/mile"));
        }
    }

    #[test]
    fn test_vehicle_fixed_discount() {
        let offer = offer_with(
            1000,
            OfferDetails::Vehicle {
                vehicle_type: "flatbed".to_string(),
                capacity_kg: 22000,
                origin: Location::new("Omaha", "NE", "US"),
                destination: Location::new("Des Moines", "IA", "US"),
            },
        );

        let suggestion = suggest_rate(&offer);
        assert_eq!(suggestion.suggested_rate, 920);
        assert_eq!(suggestion.confidence, Confidence::Medium);
        assert!(suggestion.reasoning.contains("flatbed"));
    }

    #[test]
    fn test_warehouse_fixed_discount() {
        let offer = offer_with(
            2000,
            OfferDetails::Warehouse {
                kind: WarehouseKind::Bonded,
                location: Location::new("Savannah", "GA", "US"),
                total_space_sqm: 3100,
            },
        );

        let suggestion = suggest_rate(&offer);
        assert_eq!(suggestion.suggested_rate, 1700);
        assert_eq!(suggestion.confidence, Confidence::High);
        assert!(suggestion.reasoning.contains("Savannah"));
    }

    #[test]
    fn test_service_fixed_discount() {
        let offer = offer_with(
            950,
            OfferDetails::Service {
                kind: ServiceKind::Consulting,
                coverage: vec!["US".to_string()],
            },
        );

        let suggestion = suggest_rate(&offer);
        assert_eq!(suggestion.suggested_rate, 855);
        assert_eq!(suggestion.confidence, Confidence::Low);
    }

    #[test]
    fn test_discount_rounds_to_nearest() {
        // 999 * 0.92 = 919.08, rounds down
        assert_eq!(discounted(999, 8), 919);
        // 995 * 0.85 = 845.75, rounds up
        assert_eq!(discounted(995, 15), 846);
    }
}
