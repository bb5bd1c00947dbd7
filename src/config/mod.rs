//! # Ingestion Configuration Module
//!
//! This module centralizes the configuration constants of the ingestion
//! engine. Constants are grouped by functional area and interdependencies are
//! enforced through compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: All configuration values with dependency documentation

pub mod constants;
pub use constants::*;
