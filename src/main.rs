use coinvert_bridge::{MessageFromBackend, MessageToBackend};

/// Default pair selected once listings arrive, so the monitor has something
/// to show before the user intervenes.
const DEFAULT_FROM: &str = "BTC";
const DEFAULT_TO: &str = "ETH";

fn main() {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let mut channels = coinvert_bridge::BridgeChannels::default();
    coinvert_backend::run(channels.backend_rx, channels.backend_tx);

    // Minimal console frontend: render each snapshot as one line and issue
    // a default selection once the first listings land. A graphical frontend
    // would consume the same snapshot stream.
    let mut selected = false;
    while let Some(message) = channels.frontend_rx.blocking_recv() {
        let MessageFromBackend::StateSnapshot(state) = message;

        if state.is_loading {
            log::info!("Loading listings...");
            continue;
        }
        if let Some(error) = &state.error {
            log::warn!("Refresh failed: {error}");
        }

        if !selected && !state.records.is_empty() {
            selected = true;
            channels
                .frontend_tx
                .blocking_send(MessageToBackend::SetFromBySymbol(DEFAULT_FROM.to_string()))
                .expect("failed to send message to backend");
            channels
                .frontend_tx
                .blocking_send(MessageToBackend::SetToBySymbol(DEFAULT_TO.to_string()))
                .expect("failed to send message to backend");
        }

        if let (Some(from), Some(to)) = (&state.from, &state.to) {
            println!(
                "{} {} = {} {}   (refresh in {}s)",
                state.amount,
                from.symbol,
                state.converted_amount,
                to.symbol,
                state.seconds_until_refresh
            );
        }
    }
}
