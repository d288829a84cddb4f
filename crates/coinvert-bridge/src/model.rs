use serde::{Deserialize, Serialize};

/// The USD quote attached to a listed currency.
///
/// Values beyond `price` are market metadata carried through from the
/// provider unmodified; the conversion path only ever reads `price`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct UsdQuote {
    /// Latest USD price of one unit of the currency. Non-negative.
    pub price: f64,
    /// Trading volume over the last 24 hours, in USD.
    pub volume_24h: f64,
    /// Relative change of the 24h volume, in percent.
    pub volume_change_24h: Option<f64>,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    /// Market capitalization in USD.
    pub market_cap: f64,
    pub market_cap_dominance: Option<f64>,
    pub fully_diluted_market_cap: Option<f64>,
    /// Provider timestamp of the quote, if reported.
    pub last_updated: Option<String>,
}

/// One tradable currency as listed by the market data provider.
///
/// Records are immutable once constructed: a refresh produces an entirely
/// new set of records and never mutates existing ones. Identity across
/// refreshes is established by `symbol`, compared case-insensitively,
/// because the provider replaces every object on each listing response.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CurrencyRecord {
    /// Stable provider-assigned identifier.
    pub id: u64,
    /// Human-readable currency name, e.g. "Bitcoin".
    pub name: String,
    /// Short ticker, e.g. "BTC". Used for cross-refresh identity matching.
    pub symbol: String,
    /// URL-friendly name assigned by the provider.
    pub slug: String,
    /// Listing rank by market capitalization, if reported.
    pub rank: Option<u32>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub infinite_supply: Option<bool>,
    /// Provider timestamp of the record, if reported.
    pub last_updated: Option<String>,
    /// The USD quote for this currency.
    pub usd: UsdQuote,
}

impl CurrencyRecord {
    /// Latest USD price of one unit of this currency.
    pub fn price_usd(&self) -> f64 {
        self.usd.price
    }

    /// Whether this record's ticker matches `symbol`, ignoring case.
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }
}
