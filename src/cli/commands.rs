//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "freightline")]
#[command(about = "Freightline - freight marketplace aggregation and rate negotiation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the aggregated offer catalog
    Offers {
        #[command(subcommand)]
        action: OffersAction,
    },

    /// Ask the rate advisor for a suggested counter-rate
    Suggest {
        /// Offer ID to analyze
        offer_id: String,
    },

    /// Run a scripted negotiation against the simulated counterparty
    Negotiate {
        /// Offer ID to negotiate
        offer_id: String,

        /// Opening ask (lower bound for AI replies)
        #[arg(short, long)]
        target: u64,

        /// Walk-away rate (upper bound for AI replies)
        #[arg(short, long)]
        max: u64,

        /// Disable the simulated counterparty
        #[arg(long)]
        no_ai: bool,

        /// How many counter-offer rounds to trade before printing the history
        #[arg(short, long, default_value_t = 1)]
        rounds: u32,
    },

    /// Walk the full lifecycle: negotiate, book, collaborate, finalize
    Demo,
}

#[derive(Subcommand, Debug)]
pub enum OffersAction {
    /// List offers
    List {
        /// Filter by kind (cargo, vehicle, warehouse, service)
        #[arg(short = 't', long = "type")]
        offer_type: Option<String>,
    },

    /// Show one offer in full
    Show {
        /// Offer ID
        offer_id: String,
    },

    /// List the aggregated marketplaces
    Marketplaces,
}
