// PidLog - core/mod.rs
//
// Core business logic layer: parsing, timestamp derivation, range
// selection, view building, export.
// Dependencies: standard library, serde/csv/chrono.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod model;
pub mod parser;
pub mod range;
pub mod timebase;
pub mod view;
