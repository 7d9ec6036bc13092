// PidLog - app/mod.rs
//
// Application layer: log source lifecycle, state management, headless runs.
// Dependencies: core layer, platform::fs.
// Must NOT depend on: ui.

pub mod headless;
pub mod source;
pub mod state;
