//! # agora-service
//!
//! Domain services for the Agora forum backend. Each service composes the
//! repositories with the access-control gate and carries the per-request
//! [`context::RequestContext`] through every privileged operation.

pub mod category;
pub mod comment;
pub mod context;
pub mod post;
pub mod topic;
pub mod user;

pub use context::RequestContext;
