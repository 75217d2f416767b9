//! Domain types and DTOs
//!
//! These types define the data structures exchanged with the follow-up engine.

pub mod invoice;

pub use invoice::*;
