//! Application context and event dispatching utilities.
//!
//! The context contains the shared state and provides helpers for pushing
//! snapshots back to the frontend bridge. All state transitions funnel
//! through [`AppContext::consume_events`], which processes one event at a
//! time in arrival order: the backend has exactly one writer.

use std::sync::Arc;

use coinvert_bridge::model::CurrencyRecord;
use coinvert_bridge::{MessageFromBackend, MessageToBackend};
use coinvert_market::MarketResult;
use tokio::sync::Notify;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::state::SharedState;

/// Everything the event loop can be asked to apply, in arrival order.
///
/// Frontend intents, scheduler ticks, and completed fetches all land in the
/// same queue, so a fetch result can never interleave with a half-applied
/// user intent.
#[derive(Debug)]
pub(crate) enum BackendEvent {
    /// An intent forwarded from the frontend bridge.
    Intent(MessageToBackend),
    /// One-second countdown update from the refresh scheduler.
    Tick(u64),
    /// The refresh scheduler's countdown reached zero.
    RefreshDue,
    /// A spawned listings fetch completed.
    ListingsFetched {
        /// Whether this was the very first fetch of the session.
        initial: bool,
        result: MarketResult<Vec<CurrencyRecord>>,
    },
    /// The frontend dropped its end of the bridge; the session is over.
    Closed,
}

/// Shared application context passed to services and event handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state. Written only by the event loop.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
    /// Loopback into the event queue, handed to spawned fetch tasks and the
    /// scheduler.
    pub events: Sender<BackendEvent>,
    /// Signal that restarts the scheduler countdown after a manual refresh.
    pub scheduler_reset: Arc<Notify>,
}

impl AppContext {
    /// Read and apply events until the session ends.
    pub async fn consume_events(self: &Arc<Self>, mut rx: Receiver<BackendEvent>) {
        while let Some(event) = rx.recv().await {
            log::debug!("Applying backend event: {event:?}");
            if !self.dispatch_event(event).await {
                return;
            }
        }
    }

    /// Applies a single event as one atomic state transition. Returns false
    /// once the session is over.
    pub(crate) async fn dispatch_event(self: &Arc<Self>, event: BackendEvent) -> bool {
        use crate::services::converter_service as converter;

        match event {
            BackendEvent::Intent(intent) => match intent {
                MessageToBackend::SelectFrom(record) => {
                    converter::handle_select_from(self.clone(), record).await;
                }
                MessageToBackend::SelectTo(record) => {
                    converter::handle_select_to(self.clone(), record).await;
                }
                MessageToBackend::SetFromBySymbol(symbol) => {
                    converter::handle_set_from_by_symbol(self.clone(), symbol).await;
                }
                MessageToBackend::SetToBySymbol(symbol) => {
                    converter::handle_set_to_by_symbol(self.clone(), symbol).await;
                }
                MessageToBackend::Swap => {
                    converter::handle_swap(self.clone()).await;
                }
                MessageToBackend::SetAmount(text) => {
                    converter::handle_set_amount(self.clone(), text).await;
                }
                MessageToBackend::SetSearchQuery(query) => {
                    converter::handle_set_search_query(self.clone(), query).await;
                }
                MessageToBackend::Refresh => {
                    converter::handle_manual_refresh(self.clone()).await;
                }
            },
            BackendEvent::Tick(seconds_left) => {
                converter::handle_tick(self.clone(), seconds_left).await;
            }
            BackendEvent::RefreshDue => {
                converter::handle_refresh_due(self.clone()).await;
            }
            BackendEvent::ListingsFetched { initial, result } => {
                converter::apply_listings(self.clone(), initial, result).await;
            }
            BackendEvent::Closed => {
                log::info!("Frontend bridge closed; shutting the backend down");
                return false;
            }
        }

        true
    }

    /// Pushes the current snapshot to the frontend bridge.
    pub async fn publish_snapshot(&self) {
        let snapshot = {
            let state = self.state.read().await;
            state.converter.clone()
        };
        if self
            .tx
            .send(MessageFromBackend::StateSnapshot(snapshot))
            .await
            .is_err()
        {
            // The frontend is gone; the Closed event will end the loop.
            log::debug!("Dropping snapshot: frontend receiver is closed");
        }
    }
}
