//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Token signing secrets and expiry configuration
//! - `lockout` - Failed-login lockout policy

pub mod auth;
pub mod lockout;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use lockout::LockoutConfig;
