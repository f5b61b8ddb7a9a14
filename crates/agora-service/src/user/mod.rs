//! User account flows: registration, login, profile self-service, and
//! admin user management.

pub mod service;

pub use service::{PasswordChange, RegisterRequest, UpdateProfile, UserService};
