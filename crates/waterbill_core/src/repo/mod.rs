//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the roster persistence contract used by the roster store.
//! - Isolate SQLite and JSON encoding details from service orchestration.
//!
//! # Invariants
//! - Read paths reject unparsable or structurally invalid rosters instead of
//!   returning partial data.

pub mod roster_repo;
