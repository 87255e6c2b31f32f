//! Shared utilities and common types for the ShopEasy server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Transport response structures
//! - Utility functions (email validation, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, JwtConfig, LockoutConfig};
pub use types::ErrorResponse;
pub use utils::validation;
