//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, the listings provider, shared
//! state, the refresh scheduler, and the single event loop that serializes
//! every state transition.

use std::{sync::Arc, thread};

use coinvert_bridge::state::ConverterState;
use coinvert_bridge::{MessageFromBackend, MessageToBackend};
use coinvert_market::CoinMarketCapProvider;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::{Notify, RwLock};

use crate::app::{AppContext, BackendEvent};
use crate::services::converter_service;
use crate::state::State;

/// Forwards frontend intents into the single backend event queue, posting a
/// close event once the frontend hangs up.
async fn forward_intents(mut rx: Receiver<MessageToBackend>, events: Sender<BackendEvent>) {
    while let Some(intent) = rx.recv().await {
        if events.send(BackendEvent::Intent(intent)).await.is_err() {
            return;
        }
    }
    let _ = events.send(BackendEvent::Closed).await;
}

/// Initialize backend state and start processing session events.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let config = crate::config::load_config()
        .await
        .expect("failed to load config");

    let request_client = reqwest::Client::new();
    let provider = Arc::new(
        CoinMarketCapProvider::new(
            request_client,
            &config.base_url,
            config.api_key.clone(),
            config.listing_limit,
        )
        .expect("failed to build listings provider"),
    );

    let interval_secs = config.refresh_interval_secs;
    let state = Arc::new(RwLock::new(State {
        config,
        provider,
        converter: ConverterState {
            seconds_until_refresh: interval_secs,
            ..ConverterState::default()
        },
    }));

    let (event_tx, event_rx) = mpsc::channel(64);
    let scheduler_reset = Arc::new(Notify::new());
    crate::scheduler::spawn(event_tx.clone(), scheduler_reset.clone(), interval_secs);
    tokio::spawn(forward_intents(rx, event_tx.clone()));

    let context = Arc::new(AppContext {
        state,
        tx,
        events: event_tx,
        scheduler_reset,
    });

    // Let the frontend render the loading state, then kick off the first
    // fetch before processing intents.
    context.publish_snapshot().await;
    converter_service::spawn_fetch(context.clone(), true).await;

    context.consume_events(event_rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    });
}
