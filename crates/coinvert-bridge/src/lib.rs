//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocol used to connect a presentation
//! layer with the asynchronous backend that owns the conversion session:
//! the fetched currency listings, the user's from/to selection, and the
//! auto-refresh countdown.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends intents (select a currency, type an amount, swap,
//!   search, request a refresh).
//! - The backend pushes full [`ConverterState`] snapshots; the frontend
//!   renders whatever snapshot it received last and never mutates it.
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod model;
pub mod state;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::model::CurrencyRecord;
use crate::state::ConverterState;

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// A new immutable snapshot of the conversion session. Sent after every
    /// applied intent, scheduler tick, and refresh result.
    StateSnapshot(ConverterState),
}

/// Intents issued by the frontend to drive the conversion session.
///
/// These messages are applied by the backend in arrival order; each one is
/// an atomic transition producing exactly one new snapshot.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Set the "from" slot to the given record.
    SelectFrom(CurrencyRecord),
    /// Set the "to" slot to the given record.
    SelectTo(CurrencyRecord),
    /// Set the "from" slot by ticker, matched case-insensitively against the
    /// current records. Unknown tickers leave the selection unchanged.
    SetFromBySymbol(String),
    /// Set the "to" slot by ticker. Unknown tickers leave the selection
    /// unchanged.
    SetToBySymbol(String),
    /// Exchange the "from" and "to" slots.
    Swap,
    /// Replace the typed amount. Empty text is stored as "0".
    SetAmount(String),
    /// Replace the picker search query.
    SetSearchQuery(String),
    /// Request an immediate listings refresh, ahead of the scheduler.
    Refresh,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get snapshots from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send intents to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get intents from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to push snapshots to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
