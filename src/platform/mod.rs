// PidLog - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, directories, toml, core::timebase.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
