//! Backend runtime entry point and public API surface.
//!
//! This crate owns the conversion session: it fetches currency listings,
//! keeps them fresh on a timer, applies user intents as serialized state
//! transitions, and streams immutable snapshots back over the bridge.

mod app;
mod config;
mod runtime;
mod scheduler;
mod services;
mod state;

pub use crate::config::{Config, ConfigError, load_config};
pub use crate::runtime::run;
