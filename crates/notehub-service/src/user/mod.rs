//! Account registration and authentication.

pub mod service;

pub use service::{AuthService, LoginResult};
