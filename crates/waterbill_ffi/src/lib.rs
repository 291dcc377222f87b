//! UI-facing bindings for the water bill splitter.

pub mod api;
