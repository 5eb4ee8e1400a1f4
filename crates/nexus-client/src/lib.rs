//! # nexus-client
//!
//! Application state for Project Nexus: the Session Store (who is logged in)
//! and the Domain Store (projects, applications, events, badges and
//! registrations), wired to durable storage through explicit handles rather
//! than ambient globals.
//!
//! Views read collections through the stores' accessors and the helpers in
//! [`queries`] and [`dashboard`], call the mutation methods, and re-render
//! when a [`notify::StoreEvent`] arrives.

pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod feed;
pub mod notify;
pub mod queries;
pub mod seed;
pub mod session;
pub mod state;

mod persist;

pub use config::{ClientConfig, StorageBackend};
pub use domain::{DomainStore, NewAward, NewEvent, NewProject, RegistrationOutcome};
pub use error::{ClientError, Result};
pub use notify::{Notifier, StoreEvent};
pub use session::{NewUser, ProfileUpdate, SessionStore};
pub use state::AppState;
