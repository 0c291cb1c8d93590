//! Domain layer: entities, repository contracts and access rules.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access`] - Edit-authorization predicates shared by the guarded routes
//!
//! The domain layer has no dependencies on the web or infrastructure layers.
//! Repository traits are implemented in [`crate::infrastructure::persistence`].

pub mod access;
pub mod entities;
pub mod repositories;
