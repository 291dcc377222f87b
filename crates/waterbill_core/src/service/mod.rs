//! Core use-case services.
//!
//! # Responsibility
//! - Own the live roster and keep it persisted (`RosterStore`).
//! - Hold the transient result list of the last calculation (`BillSession`).
//! - Keep presentation layers decoupled from storage details.

pub mod bill_session;
pub mod roster_store;
