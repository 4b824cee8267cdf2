//! # kc-model
//!
//! Domain models for Keycloak Rust.
//!
//! This crate defines the entities the federation providers work with:
//! users, realm roles, and presented credentials.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod credential;
pub mod role;
pub mod user;

pub use credential::{credential_types, CredentialInput, UserCredential};
pub use role::Role;
pub use user::User;
