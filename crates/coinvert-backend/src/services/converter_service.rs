//! State transitions of the conversion session.
//!
//! Every handler here is one atomic transition: it takes the write lock,
//! computes the next snapshot fields, releases the lock, and publishes the
//! new snapshot. Handlers are only ever invoked from the single event loop,
//! so no transition observes a partially-updated state.

use coinvert_bridge::model::CurrencyRecord;
use coinvert_bridge::state::ConverterState;
use coinvert_engine::{convert, filter_records, remap};
use coinvert_market::MarketResult;

use crate::app::BackendEvent;

/// Brings `converted_amount` back in sync with the selection and amount.
fn recompute_conversion(converter: &mut ConverterState) {
    converter.converted_amount = convert(
        &converter.amount,
        converter.from.as_ref(),
        converter.to.as_ref(),
    );
}

/// Spawns a background listings fetch.
///
/// The fetch runs concurrently with ticks and user intents; its result comes
/// back through the event queue as [`BackendEvent::ListingsFetched`], so
/// result application stays serialized with every other transition.
pub(crate) async fn spawn_fetch(context: super::AppContextHandle, initial: bool) {
    let provider = {
        let state = context.state.read().await;
        state.provider.clone()
    };

    let events = context.events.clone();
    tokio::spawn(async move {
        log::debug!("Fetching listings from provider '{}'", provider.name());
        let result = provider.fetch_listings().await;
        if events
            .send(BackendEvent::ListingsFetched { initial, result })
            .await
            .is_err()
        {
            log::debug!("Backend event queue closed; discarding fetch result");
        }
    });
}

/// Applies a completed fetch to the session.
///
/// Success replaces the records, remaps both selections onto the fresh
/// listing, and clears any previous error. Failure only records the error
/// text: a failed refresh never discards good data.
pub(crate) async fn apply_listings(
    context: super::AppContextHandle,
    initial: bool,
    result: MarketResult<Vec<CurrencyRecord>>,
) {
    {
        let mut state = context.state.write().await;
        let converter = &mut state.converter;

        match result {
            Ok(records) => {
                log::info!("Applying {} fetched listings", records.len());
                if !initial {
                    // The initial load leaves both slots empty until the
                    // user picks currencies; refreshes carry them over.
                    converter.from = remap(converter.from.as_ref(), &records, 0);
                    converter.to = remap(converter.to.as_ref(), &records, 1);
                }
                converter.records = records;
                converter.filtered_records =
                    filter_records(&converter.records, &converter.search_query);
                recompute_conversion(converter);
                converter.error = None;
            }
            Err(error) => {
                log::warn!("Listings fetch failed: {error}");
                converter.error = Some(error.to_string());
            }
        }

        converter.is_loading = false;
    }

    context.publish_snapshot().await;
}

/// Sets the "from" slot to the given record.
pub(crate) async fn handle_select_from(context: super::AppContextHandle, record: CurrencyRecord) {
    {
        let mut state = context.state.write().await;
        state.converter.from = Some(record);
        recompute_conversion(&mut state.converter);
    }
    context.publish_snapshot().await;
}

/// Sets the "to" slot to the given record.
pub(crate) async fn handle_select_to(context: super::AppContextHandle, record: CurrencyRecord) {
    {
        let mut state = context.state.write().await;
        state.converter.to = Some(record);
        recompute_conversion(&mut state.converter);
    }
    context.publish_snapshot().await;
}

/// Sets the "from" slot by ticker; unknown tickers leave it unchanged.
pub(crate) async fn handle_set_from_by_symbol(context: super::AppContextHandle, symbol: String) {
    {
        let mut state = context.state.write().await;
        let converter = &mut state.converter;
        match converter
            .records
            .iter()
            .find(|record| record.matches_symbol(&symbol))
            .cloned()
        {
            Some(record) => {
                converter.from = Some(record);
                recompute_conversion(converter);
            }
            None => log::debug!("No listed currency matches symbol '{symbol}'"),
        }
    }
    context.publish_snapshot().await;
}

/// Sets the "to" slot by ticker; unknown tickers leave it unchanged.
pub(crate) async fn handle_set_to_by_symbol(context: super::AppContextHandle, symbol: String) {
    {
        let mut state = context.state.write().await;
        let converter = &mut state.converter;
        match converter
            .records
            .iter()
            .find(|record| record.matches_symbol(&symbol))
            .cloned()
        {
            Some(record) => {
                converter.to = Some(record);
                recompute_conversion(converter);
            }
            None => log::debug!("No listed currency matches symbol '{symbol}'"),
        }
    }
    context.publish_snapshot().await;
}

/// Exchanges the "from" and "to" slots.
pub(crate) async fn handle_swap(context: super::AppContextHandle) {
    {
        let mut state = context.state.write().await;
        let converter = &mut state.converter;
        std::mem::swap(&mut converter.from, &mut converter.to);
        recompute_conversion(converter);
    }
    context.publish_snapshot().await;
}

/// Replaces the typed amount. Empty text is stored as "0" so the conversion
/// stays total while the user clears the field.
pub(crate) async fn handle_set_amount(context: super::AppContextHandle, text: String) {
    {
        let mut state = context.state.write().await;
        let converter = &mut state.converter;
        converter.amount = if text.is_empty() { "0".to_string() } else { text };
        recompute_conversion(converter);
    }
    context.publish_snapshot().await;
}

/// Replaces the picker search query and renarrows the filtered view.
pub(crate) async fn handle_set_search_query(context: super::AppContextHandle, query: String) {
    {
        let mut state = context.state.write().await;
        let converter = &mut state.converter;
        converter.filtered_records = filter_records(&converter.records, &query);
        converter.search_query = query;
    }
    context.publish_snapshot().await;
}

/// Updates the visible refresh countdown.
pub(crate) async fn handle_tick(context: super::AppContextHandle, seconds_left: u64) {
    {
        let mut state = context.state.write().await;
        state.converter.seconds_until_refresh = seconds_left;
    }
    context.publish_snapshot().await;
}

/// The scheduler's countdown expired: restart the visible countdown and
/// fetch in the background.
pub(crate) async fn handle_refresh_due(context: super::AppContextHandle) {
    {
        let mut state = context.state.write().await;
        state.converter.seconds_until_refresh = state.config.refresh_interval_secs;
    }
    context.publish_snapshot().await;
    spawn_fetch(context, false).await;
}

/// A user-requested refresh: restart the scheduler countdown too.
pub(crate) async fn handle_manual_refresh(context: super::AppContextHandle) {
    context.scheduler_reset.notify_one();
    {
        let mut state = context.state.write().await;
        state.converter.seconds_until_refresh = state.config.refresh_interval_secs;
    }
    context.publish_snapshot().await;
    spawn_fetch(context, false).await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use coinvert_bridge::model::{CurrencyRecord, UsdQuote};
    use coinvert_bridge::state::ConverterState;
    use coinvert_bridge::{MessageFromBackend, MessageToBackend};
    use coinvert_market::MockListingsProvider;
    use tokio::sync::mpsc::{self, Receiver};
    use tokio::sync::{Notify, RwLock};

    use crate::app::{AppContext, BackendEvent};
    use crate::config::Config;
    use crate::services::AppContextHandle;
    use crate::state::State;

    fn record(symbol: &str, name: &str, price: f64) -> CurrencyRecord {
        CurrencyRecord {
            symbol: symbol.to_string(),
            name: name.to_string(),
            usd: UsdQuote {
                price,
                ..UsdQuote::default()
            },
            ..CurrencyRecord::default()
        }
    }

    fn listing() -> Vec<CurrencyRecord> {
        vec![
            record("BTC", "Bitcoin", 50_000.0),
            record("ETH", "Ethereum", 2_500.0),
        ]
    }

    fn test_context(
        provider: Arc<MockListingsProvider>,
    ) -> (
        AppContextHandle,
        Receiver<MessageFromBackend>,
        Receiver<BackendEvent>,
    ) {
        let (tx, frontend_rx) = mpsc::channel(64);
        let (event_tx, event_rx) = mpsc::channel(64);
        let state = Arc::new(RwLock::new(State {
            config: Config::default(),
            provider,
            converter: ConverterState::default(),
        }));
        let context = Arc::new(AppContext {
            state,
            tx,
            events: event_tx,
            scheduler_reset: Arc::new(Notify::new()),
        });
        (context, frontend_rx, event_rx)
    }

    async fn snapshot(context: &AppContextHandle) -> ConverterState {
        context.state.read().await.converter.clone()
    }

    /// Waits for the spawned fetch to finish and applies its result.
    async fn pump_fetch(
        context: &AppContextHandle,
        events: &mut Receiver<BackendEvent>,
    ) {
        let event = events.recv().await.expect("expected a fetch result event");
        assert!(matches!(&event, BackendEvent::ListingsFetched { .. }));
        context.dispatch_event(event).await;
    }

    async fn intent(context: &AppContextHandle, intent: MessageToBackend) {
        context.dispatch_event(BackendEvent::Intent(intent)).await;
    }

    /// Drives a session through the initial load and BTC/ETH selection.
    async fn loaded_context() -> (
        AppContextHandle,
        Receiver<MessageFromBackend>,
        Receiver<BackendEvent>,
        Arc<MockListingsProvider>,
    ) {
        let provider = Arc::new(MockListingsProvider::new());
        provider.push_listings(listing());
        let (context, frontend_rx, mut event_rx) = test_context(provider.clone());

        super::spawn_fetch(context.clone(), true).await;
        pump_fetch(&context, &mut event_rx).await;
        intent(&context, MessageToBackend::SetFromBySymbol("BTC".into())).await;
        intent(&context, MessageToBackend::SetToBySymbol("ETH".into())).await;

        (context, frontend_rx, event_rx, provider)
    }

    #[tokio::test]
    async fn initial_load_fills_records_without_selecting() {
        let provider = Arc::new(MockListingsProvider::new());
        provider.push_listings(listing());
        let (context, mut frontend_rx, mut event_rx) = test_context(provider);

        super::spawn_fetch(context.clone(), true).await;
        pump_fetch(&context, &mut event_rx).await;

        let state = snapshot(&context).await;
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.filtered_records.len(), 2);
        assert!(state.from.is_none());
        assert!(state.to.is_none());
        assert!(!state.is_loading);
        assert!(state.error.is_none());

        // The transition was published to the frontend.
        let MessageFromBackend::StateSnapshot(published) =
            frontend_rx.recv().await.expect("expected a snapshot");
        assert_eq!(published, state);
    }

    #[tokio::test]
    async fn initial_load_failure_surfaces_error_and_stops_loading() {
        let provider = Arc::new(MockListingsProvider::new());
        provider.push_failure("connection refused");
        let (context, _frontend_rx, mut event_rx) = test_context(provider);

        super::spawn_fetch(context.clone(), true).await;
        pump_fetch(&context, &mut event_rx).await;

        let state = snapshot(&context).await;
        assert!(state.records.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn selection_and_amount_drive_conversion() {
        let (context, _frontend_rx, _event_rx, _provider) = loaded_context().await;

        intent(&context, MessageToBackend::SetAmount("2".into())).await;

        let state = snapshot(&context).await;
        assert_eq!(state.from.as_ref().unwrap().symbol, "BTC");
        assert_eq!(state.to.as_ref().unwrap().symbol, "ETH");
        // 2 * 50000 / 2500 = 40
        assert_eq!(state.converted_amount, "40");
    }

    #[tokio::test]
    async fn swap_exchanges_slots_and_recomputes() {
        let (context, _frontend_rx, _event_rx, _provider) = loaded_context().await;

        intent(&context, MessageToBackend::SetAmount("2".into())).await;
        intent(&context, MessageToBackend::Swap).await;

        let state = snapshot(&context).await;
        assert_eq!(state.from.as_ref().unwrap().symbol, "ETH");
        assert_eq!(state.to.as_ref().unwrap().symbol, "BTC");
        // 2 * 2500 / 50000 = 0.1
        assert_eq!(state.converted_amount, "0.1");
    }

    #[tokio::test]
    async fn empty_amount_is_stored_as_zero() {
        let (context, _frontend_rx, _event_rx, _provider) = loaded_context().await;

        intent(&context, MessageToBackend::SetAmount(String::new())).await;

        let state = snapshot(&context).await;
        assert_eq!(state.amount, "0");
        assert_eq!(state.converted_amount, "0.0");
    }

    #[tokio::test]
    async fn unknown_symbol_leaves_selection_unchanged() {
        let (context, _frontend_rx, _event_rx, _provider) = loaded_context().await;

        intent(&context, MessageToBackend::SetFromBySymbol("NOPE".into())).await;

        let state = snapshot(&context).await;
        assert_eq!(state.from.as_ref().unwrap().symbol, "BTC");
    }

    #[tokio::test]
    async fn search_query_narrows_filtered_records() {
        let (context, _frontend_rx, _event_rx, _provider) = loaded_context().await;

        intent(&context, MessageToBackend::SetSearchQuery("ether".into())).await;
        let state = snapshot(&context).await;
        assert_eq!(state.search_query, "ether");
        assert_eq!(state.filtered_records.len(), 1);
        assert_eq!(state.filtered_records[0].symbol, "ETH");

        intent(&context, MessageToBackend::SetSearchQuery(String::new())).await;
        let state = snapshot(&context).await;
        assert_eq!(state.filtered_records.len(), 2);
    }

    #[tokio::test]
    async fn refresh_remaps_selection_across_reorder() {
        let (context, _frontend_rx, mut event_rx, provider) = loaded_context().await;

        // Refreshed listing is reordered and repriced, but still carries BTC.
        provider.push_listings(vec![
            record("ETH", "Ethereum", 2_600.0),
            record("SOL", "Solana", 150.0),
            record("BTC", "Bitcoin", 51_000.0),
        ]);
        intent(&context, MessageToBackend::Refresh).await;
        pump_fetch(&context, &mut event_rx).await;

        let state = snapshot(&context).await;
        assert_eq!(state.from.as_ref().unwrap().symbol, "BTC");
        assert_eq!(state.from.as_ref().unwrap().price_usd(), 51_000.0);
        assert_eq!(state.to.as_ref().unwrap().symbol, "ETH");
        assert_eq!(state.to.as_ref().unwrap().price_usd(), 2_600.0);
        // 1.0 * 51000 / 2600
        assert_eq!(state.converted_amount, "19.61538462");
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn refresh_falls_back_when_selection_is_delisted() {
        let (context, _frontend_rx, mut event_rx, provider) = loaded_context().await;

        intent(&context, MessageToBackend::SetFromBySymbol("ETH".into())).await;
        intent(&context, MessageToBackend::SetToBySymbol("BTC".into())).await;

        // Neither previous selection survives this refresh.
        provider.push_listings(vec![
            record("SOL", "Solana", 150.0),
            record("ADA", "Cardano", 0.5),
        ]);
        intent(&context, MessageToBackend::Refresh).await;
        pump_fetch(&context, &mut event_rx).await;

        let state = snapshot(&context).await;
        assert_eq!(state.from.as_ref().unwrap().symbol, "SOL");
        assert_eq!(state.to.as_ref().unwrap().symbol, "ADA");
    }

    #[tokio::test]
    async fn failed_refresh_preserves_records_and_selection() {
        let (context, _frontend_rx, mut event_rx, provider) = loaded_context().await;
        let before = snapshot(&context).await;

        provider.push_failure("listings provider returned HTTP 503");
        intent(&context, MessageToBackend::Refresh).await;
        pump_fetch(&context, &mut event_rx).await;

        let state = snapshot(&context).await;
        assert_eq!(state.records, before.records);
        assert_eq!(state.from, before.from);
        assert_eq!(state.to, before.to);
        assert_eq!(
            state.error.as_deref(),
            Some("listings provider returned HTTP 503")
        );
    }

    #[tokio::test]
    async fn next_successful_refresh_clears_error() {
        let (context, _frontend_rx, mut event_rx, provider) = loaded_context().await;

        provider.push_failure("timeout");
        intent(&context, MessageToBackend::Refresh).await;
        pump_fetch(&context, &mut event_rx).await;
        assert!(snapshot(&context).await.error.is_some());

        provider.push_listings(listing());
        intent(&context, MessageToBackend::Refresh).await;
        pump_fetch(&context, &mut event_rx).await;
        assert!(snapshot(&context).await.error.is_none());
    }

    #[tokio::test]
    async fn ticks_update_countdown() {
        let (context, _frontend_rx, _event_rx, _provider) = loaded_context().await;

        context.dispatch_event(BackendEvent::Tick(42)).await;
        assert_eq!(snapshot(&context).await.seconds_until_refresh, 42);
    }

    #[tokio::test]
    async fn refresh_due_resets_countdown_and_fetches() {
        let (context, _frontend_rx, mut event_rx, provider) = loaded_context().await;

        provider.push_listings(listing());
        context.dispatch_event(BackendEvent::RefreshDue).await;

        let state = snapshot(&context).await;
        assert_eq!(
            state.seconds_until_refresh,
            Config::default().refresh_interval_secs
        );
        // A background fetch was spawned as part of the transition.
        pump_fetch(&context, &mut event_rx).await;
        assert!(snapshot(&context).await.error.is_none());
    }

    #[tokio::test]
    async fn closed_event_ends_the_session() {
        let provider = Arc::new(MockListingsProvider::new());
        let (context, _frontend_rx, _event_rx) = test_context(provider);

        assert!(!context.dispatch_event(BackendEvent::Closed).await);
    }
}
