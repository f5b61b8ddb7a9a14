//! # agora-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Agora entities.

pub mod connection;
pub mod migration;
pub mod repositories;
