//! Typed domain records hydrated from server JSON

mod catalog;
mod channel;
mod message;
mod user;

pub use catalog::{Member, News, Project};
pub use channel::{Channel, ChannelMember, ChannelMessage, ChannelRole};
pub use message::{Chat, Message, Reaction};
pub use user::{AccountProfile, User};
