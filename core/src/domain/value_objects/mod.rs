//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod client;

// Re-export commonly used types
pub use auth_response::{LoginResponse, LogoutResponse, RefreshResponse, UserProfile};
pub use client::ClientContext;
