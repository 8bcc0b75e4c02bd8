//! Shared types and models for the Refinery Operations Platform
//!
//! This crate contains types shared between the backend, frontend (via WASM),
//! and other components of the system.

pub mod forms;
pub mod models;
pub mod num;
pub mod reports;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
