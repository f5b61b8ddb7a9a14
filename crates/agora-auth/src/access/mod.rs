//! Role and ownership checks for protected operations.

pub mod gate;

pub use gate::AccessGate;
