//! The listings provider contract and test doubles.

use async_trait::async_trait;
use coinvert_bridge::model::CurrencyRecord;

use crate::error::MarketResult;

/// An asynchronous source of currency listings.
///
/// The backend treats this as an opaque capability: transport, base URL, and
/// API-key injection are the implementation's concern. A fetch either yields
/// the full fresh listing, in provider order, or a [`crate::MarketError`].
#[async_trait]
pub trait ListingsProvider: Send + Sync {
    /// Short provider name, used in log output.
    fn name(&self) -> &str;

    /// Fetches the current listings.
    async fn fetch_listings(&self) -> MarketResult<Vec<CurrencyRecord>>;
}

/// Scripted provider for tests: responses are played back in push order.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockListingsProvider {
    responses: std::sync::Mutex<std::collections::VecDeque<MarketResult<Vec<CurrencyRecord>>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockListingsProvider {
    pub fn new() -> Self {
        Self {
            responses: std::sync::Mutex::new(std::collections::VecDeque::new()),
        }
    }

    /// Queues a successful fetch returning the given records.
    pub fn push_listings(&self, records: Vec<CurrencyRecord>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(records));
    }

    /// Queues a failing fetch with the given error message.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(crate::MarketError::Provider(message.into())));
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockListingsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl ListingsProvider for MockListingsProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_listings(&self) -> MarketResult<Vec<CurrencyRecord>> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(crate::MarketError::Provider(
                    "mock provider has no scripted response left".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_plays_responses_back_in_order() {
        let provider = MockListingsProvider::new();
        provider.push_listings(vec![CurrencyRecord {
            symbol: "BTC".to_string(),
            ..CurrencyRecord::default()
        }]);
        provider.push_failure("connection reset");

        let first = provider.fetch_listings().await.unwrap();
        assert_eq!(first[0].symbol, "BTC");

        let second = provider.fetch_listings().await.unwrap_err();
        assert_eq!(second.to_string(), "connection reset");

        // Exhausted scripts fail rather than hang.
        assert!(provider.fetch_listings().await.is_err());
    }
}
