//! Core types and logic for the Touchline networking platform.
//!
//! This crate holds the role/permission table, the navigation guard, and the
//! session store logic. It has no HTTP or database dependencies; storage
//! backends implement [`store::KvStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod club_need;
pub mod contact;
pub mod error;
pub mod permission;
pub mod pipeline;
pub mod profile;
pub mod role;
pub mod route;
pub mod session;
pub mod store;

pub use error::{Error, Result};
pub use role::{Action, ProfileType, Role};
pub use session::Session;
