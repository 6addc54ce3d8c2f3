//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `location`: Client for the location management API.

mod location;

pub use location::*;
