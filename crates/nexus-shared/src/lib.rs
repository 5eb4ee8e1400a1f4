//! # nexus-shared
//!
//! Types shared by every Nexus crate: typed identifiers, the enums that make
//! up the domain vocabulary, storage-key constants and the canonical
//! timestamp codec.

pub mod constants;
pub mod error;
pub mod time;
pub mod types;

pub use types::*;
