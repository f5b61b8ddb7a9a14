//! Topic management and moderation request workflows.

pub mod service;

pub use service::{ReviewAction, TopicService};
