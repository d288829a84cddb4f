//! Wire types for the CoinMarketCap listings endpoint.
//!
//! Field names follow the provider's JSON payload; everything the converter
//! does not need is simply not deserialized. Mapping into
//! [`CurrencyRecord`] preserves the provider's listing order.

use coinvert_bridge::model::{CurrencyRecord, UsdQuote};
use serde::Deserialize;

/// Top-level envelope of the listings response.
#[derive(Debug, Deserialize)]
pub struct ApiResponseDto {
    pub data: Vec<ListingDto>,
}

/// One listed currency as reported by the provider.
#[derive(Debug, Deserialize)]
pub struct ListingDto {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    #[serde(default)]
    pub cmc_rank: Option<u32>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub infinite_supply: Option<bool>,
    #[serde(default)]
    pub last_updated: Option<String>,
    pub quote: QuoteDto,
}

/// Per-unit quotes keyed by fiat/reference currency.
#[derive(Debug, Deserialize)]
pub struct QuoteDto {
    #[serde(rename = "USD")]
    pub usd: UsdQuoteDto,
}

/// The USD quote of a listing.
#[derive(Debug, Deserialize)]
pub struct UsdQuoteDto {
    pub price: f64,
    pub volume_24h: f64,
    #[serde(default)]
    pub volume_change_24h: Option<f64>,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub market_cap: f64,
    #[serde(default)]
    pub market_cap_dominance: Option<f64>,
    #[serde(default)]
    pub fully_diluted_market_cap: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl ListingDto {
    /// Maps this wire record into the domain model.
    pub fn into_record(self) -> CurrencyRecord {
        CurrencyRecord {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            slug: self.slug,
            rank: self.cmc_rank,
            circulating_supply: self.circulating_supply,
            total_supply: self.total_supply,
            max_supply: self.max_supply,
            infinite_supply: self.infinite_supply,
            last_updated: self.last_updated,
            usd: UsdQuote {
                price: self.quote.usd.price,
                volume_24h: self.quote.usd.volume_24h,
                volume_change_24h: self.quote.usd.volume_change_24h,
                percent_change_1h: self.quote.usd.percent_change_1h,
                percent_change_24h: self.quote.usd.percent_change_24h,
                percent_change_7d: self.quote.usd.percent_change_7d,
                market_cap: self.quote.usd.market_cap,
                market_cap_dominance: self.quote.usd.market_cap_dominance,
                fully_diluted_market_cap: self.quote.usd.fully_diluted_market_cap,
                last_updated: self.quote.usd.last_updated,
            },
        }
    }
}
