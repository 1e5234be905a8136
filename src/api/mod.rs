//! HTTP API modules

pub mod endpoints;
pub mod ui;
