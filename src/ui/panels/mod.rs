// PidLog - ui/panels/mod.rs

pub mod about;
pub mod chart;
pub mod range;
pub mod summary;
pub mod table;
