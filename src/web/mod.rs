//! Browser-facing layer: the front controller, page handlers, form actions
//! and the pieces they share.
//!
//! # Modules
//!
//! - [`route`] - `page` keys and URL building
//! - [`front_controller`] - dispatch on `page`
//! - [`guard`] - login, admin and record edit guards
//! - [`handlers`] - pages and form actions
//! - [`context`], [`flash`], [`layout`] - per-request state and rendering
//! - [`middleware`] - tracing and rate limiting
//! - [`routes`] - route tables

pub mod context;
pub mod flash;
pub mod front_controller;
pub mod guard;
pub mod handlers;
pub mod layout;
pub mod middleware;
pub mod route;
pub mod routes;
