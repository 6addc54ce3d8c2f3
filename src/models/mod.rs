//! Defines the data structures used by the location client.
//!
//! This covers records returned by the location API and the payloads
//! sent to it on create and update.

mod location;

pub use location::*;
