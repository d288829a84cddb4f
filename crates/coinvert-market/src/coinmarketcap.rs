//! CoinMarketCap-backed listings provider.

use std::str::FromStr;

use async_trait::async_trait;
use coinvert_bridge::model::CurrencyRecord;
use reqwest::Url;

use crate::dto::ApiResponseDto;
use crate::error::{MarketError, MarketResult};
use crate::provider::ListingsProvider;

const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Fetches live listings from the CoinMarketCap HTTP API.
pub struct CoinMarketCapProvider {
    client: reqwest::Client,
    listings_url: Url,
    api_key: Option<String>,
    limit: u32,
}

impl CoinMarketCapProvider {
    /// Builds a provider for the given base URL, reusing the shared pooled
    /// HTTP client.
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        limit: u32,
    ) -> MarketResult<Self> {
        let listings_url = Url::from_str(base_url)
            .and_then(|base| base.join(LISTINGS_PATH))
            .map_err(|_| MarketError::InvalidBaseUrl(base_url.to_string()))?;

        if api_key.is_none() {
            log::warn!("No API key configured; listings requests will likely be rejected");
        }

        Ok(Self {
            client,
            listings_url,
            api_key,
            limit,
        })
    }
}

#[async_trait]
impl ListingsProvider for CoinMarketCapProvider {
    fn name(&self) -> &str {
        "coinmarketcap"
    }

    async fn fetch_listings(&self) -> MarketResult<Vec<CurrencyRecord>> {
        let mut request = self
            .client
            .get(self.listings_url.clone())
            .query(&[("limit", self.limit)]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::Status { status });
        }

        let payload: ApiResponseDto = response.json().await?;
        let records: Vec<CurrencyRecord> = payload
            .data
            .into_iter()
            .map(|listing| listing.into_record())
            .collect();

        log::debug!("Fetched {} listings from {}", records.len(), self.name());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        let client = reqwest::Client::new();
        let result = CoinMarketCapProvider::new(client, "not a url", None, 100);
        assert!(matches!(result, Err(MarketError::InvalidBaseUrl(_))));
    }

    #[test]
    fn builds_listings_url_from_base() {
        let client = reqwest::Client::new();
        let provider =
            CoinMarketCapProvider::new(client, "https://pro-api.coinmarketcap.com", None, 100)
                .unwrap();
        assert_eq!(
            provider.listings_url.as_str(),
            "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest"
        );
    }
}
