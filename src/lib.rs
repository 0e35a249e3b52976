//! Freightline
//!
//! Core engine for a freight-marketplace aggregator: browsing offers across
//! upstream marketplaces, negotiating rates against a simulated AI
//! counterparty, and coordinating booked transactions in team collaboration
//! spaces.
//!
//! All state is in-memory; engines are synchronous state machines and the
//! async facade in [`cli`] serializes access to them:
//! - [`catalog`]: offer records, the in-memory store, seed dataset
//! - [`negotiation`]: negotiation lifecycle engine + rate advisor
//! - [`team`]: collaboration spaces, finalization, invites
//! - [`cli`]: application facade and command definitions

pub mod catalog;
pub mod cli;
pub mod error;
pub mod negotiation;
pub mod team;
pub mod types;

pub use error::{FreightlineError, Result};
