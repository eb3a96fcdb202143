//! # Kaalition Client
//!
//! Async client for the kaalition.ru REST API.
//!
//! This crate contains:
//! - Session state tracking (`AuthSession`)
//! - The HTTP dispatch pipeline (`Dispatcher`)
//! - Paged-listing aggregation (`Pages`, `Page`)
//! - The public and authenticated facades (`PublicClient`, `Account`)
//!
//! ## Architecture
//! - Entities and errors live in `kaalition-domain`
//! - Every operation is one awaited call returning `Result`
//! - Token invalidation is observed, never guessed: only a server 401
//!   flips a session to `Invalidated`

pub mod account;
pub mod config;
pub mod http;
pub mod identity;
pub mod pagination;
pub mod public;
pub mod session;
pub mod throttle;

// Re-export commonly used items
pub use account::{Account, ChannelUpdate, NewChannel, ProfileUpdate, SupportOutcome};
pub use config::ClientConfig;
pub use http::Dispatcher;
pub use identity::Credentials;
pub use pagination::{Page, Pages};
pub use public::PublicClient;
pub use session::{AuthSession, SessionState};

// Domain types, re-exported so callers need only this crate
pub use kaalition_domain::{
    hydrate_seq, AccountProfile, Channel, ChannelMember, ChannelMessage, ChannelRole, Chat,
    Hydrate, KaalitionError, Member, Message, News, Project, Reaction, Result, User,
};
