//! Domain model for tower rosters and water bill results.
//!
//! # Responsibility
//! - Define the Tower/Story/Home structure owned by the roster store.
//! - Define the month catalog used to default occupancy length.
//! - Define the derived per-home bill record.
//!
//! # Invariants
//! - The set of homes is fixed at generation time; only `residents` and
//!   `days_stayed` mutate afterwards.
//! - `BillCalculation` values are derived and never persisted.

pub mod bill;
pub mod home_ref;
pub mod month;
pub mod roster;
