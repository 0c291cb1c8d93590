//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Password checks, registration and sessions

pub mod services;
