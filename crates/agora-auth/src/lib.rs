//! # agora-auth
//!
//! Authentication and authorization for the Agora forum backend.
//!
//! ## Modules
//!
//! - `jwt` — JWT claims, signing, and verification
//! - `password` — Argon2id password hashing and policy enforcement
//! - `session` — token issuance, validation, and revocation
//! - `access` — role/ownership checks guarding protected operations
//!
//! A session token moves through `Issued → Valid → Revoked` (terminal) or
//! `Issued → Valid → Expired` (terminal, computed at validation time). No
//! transition returns a token to `Valid` once revoked.

pub mod access;
pub mod jwt;
pub mod password;
pub mod session;

pub use access::AccessGate;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{IssuedToken, RevocationManager, TokenIssuer, TokenValidator};
