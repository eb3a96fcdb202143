//! # Kaalition Domain
//!
//! Entity records and the hydration layer for the kaalition.ru API.
//!
//! This crate contains:
//! - Domain data types (User, Message, Channel, catalog records)
//! - The error taxonomy and `Result` alias shared by every layer
//! - The [`hydrate::Hydrate`] trait turning loosely-typed server JSON
//!   into typed records
//!
//! ## Architecture
//! - No dependency on the client crate
//! - Hydration is pure: no I/O, no mutable state, same JSON in → equal
//!   record out

pub mod errors;
pub mod hydrate;
pub mod types;

// Re-export commonly used items
pub use errors::{KaalitionError, Result};
pub use hydrate::{hydrate_seq, Hydrate};
pub use types::*;
