//! Shared types, errors, and configuration for Dossier.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe record references
//! - Application-wide error taxonomy
//! - Configuration management
//! - Bearer token verification for the external identity provider

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod jwt_tests;

pub use auth::Claims;
pub use config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig, StorageSettings};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{ContactId, DocId};
