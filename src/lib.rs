//! Request-scoped context for Telegram bot updates.
//!
//! Wrap an incoming [`Update`] in a [`Context`] to get its classification,
//! the chat/sender/message it concerns, and dispatch methods that fill in
//! those identifiers before handing the call to a [`Telegram`] invoker.

pub mod api;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod resolve;
pub mod routes;
pub mod taxonomy;
pub mod update;

pub use api::{ApiCall, DryRun, Extra, MessageTarget, Telegram};
pub use classify::Classification;
pub use config::{Config, ContextOptions};
pub use context::{Context, State};
pub use error::{ApiError, ApiResult, Error, Result};
pub use taxonomy::{UpdateSubType, UpdateType};
pub use update::Update;
