//! Wire data models
//!
//! This module contains the JSON structures for the browser-facing API and
//! for the hosted inference API.

pub mod api;
pub mod inference;
