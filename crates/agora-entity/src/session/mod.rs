//! Session token entity.

pub mod token;

pub use token::SessionToken;
