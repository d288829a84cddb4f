use std::sync::Arc;

use coinvert_bridge::state::ConverterState;
use coinvert_market::ListingsProvider;

use crate::config::Config;

/// The core application state: configuration, the market data provider, and
/// the current conversion snapshot.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]). The event loop is the sole writer of
/// `converter`; spawned fetch tasks only ever clone the provider handle.
pub struct State {
    /// The loaded application configuration.
    pub config: Config,
    /// Source of live currency listings.
    pub provider: Arc<dyn ListingsProvider>,
    /// The current conversion session snapshot.
    pub converter: ConverterState,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = Arc<tokio::sync::RwLock<State>>;
