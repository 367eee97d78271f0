//! # Encore Common Library
//!
//! Shared code for the Encore content-management backend:
//! - Error types
//! - Configuration and root folder resolution
//! - Database initialization and table creation

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
