//! Backend service handlers for session events.
//!
//! This module groups the handlers that apply frontend intents, scheduler
//! ticks, and fetch results to the shared `AppContext`, each one ending by
//! publishing a fresh snapshot to the frontend.

pub mod converter_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
