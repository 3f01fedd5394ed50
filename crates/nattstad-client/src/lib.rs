//! # nattstad-client
//!
//! The Nattstad state core: a single shared container for users, messages,
//! groups and app-wide flags, mirrored to blob storage on every change.
//!
//! The container itself ([`state::AppState`]) is a dumb collection holder;
//! all policy -- credential checks, VIP gates, friend limits, admin gates --
//! lives in the [`commands`] modules that screens call into. Derived lists
//! (chat partners, unread counts, online presence) are recomputed on read in
//! [`views`]; nothing is cached. The only asynchronous pieces are the three
//! timers: the bot reply delay ([`bot`]), the presence heartbeat and the
//! typing debounce ([`tasks`]).

pub mod bot;
pub mod commands;
pub mod state;
pub mod tasks;
pub mod views;

mod error;

#[cfg(test)]
mod testutil;

pub use error::CommandError;
pub use state::{AppState, SharedState};
