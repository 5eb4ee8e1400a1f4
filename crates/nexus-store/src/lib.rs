//! # nexus-store
//!
//! Durable key-value storage for Project Nexus.
//!
//! The application state layer mirrors its mutable collections into a
//! string-keyed, string-valued store after every mutation and reads them back
//! once at startup. This crate defines that contract ([`KeyValueStore`]), an
//! in-memory backend for tests and ephemeral sessions, and a SQLite-backed
//! [`Database`] for real persistence. It also owns the serializable domain
//! models, so every consumer agrees on the stored JSON shape.

pub mod backup;
pub mod database;
pub mod entries;
pub mod kv;
pub mod migrations;
pub mod models;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use kv::{load_json, remove, save_json, KeyValueStore, MemoryStore};
pub use models::*;
