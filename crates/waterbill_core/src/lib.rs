//! Core domain logic for the water bill splitter.
//! This crate is the single source of truth for roster state and shares.

pub mod allocation;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use allocation::{
    allocate, calculate_bill, parse_amount, Allocation, AllocationError, AllocationInput,
};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::bill::BillCalculation;
pub use model::home_ref::{FloorSlot, HomeLocation, HomeRef, HomeRefError};
pub use model::month::{Month, MonthParseError};
pub use model::roster::{
    default_towers, total_resident_days, validate_roster, Home, RosterValidationError, Story,
    Tower, TowerLayout,
};
pub use report::{format_currency, BillReport, TowerSection};
pub use repo::roster_repo::{
    RepoError, RepoResult, RosterRepository, SqliteRosterRepository, ROSTER_STORAGE_KEY,
};
pub use service::bill_session::{BillSession, CalculationOutcome};
pub use service::roster_store::{
    LoadSource, RosterError, RosterEvent, RosterResult, RosterStore, SubscriptionId,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
