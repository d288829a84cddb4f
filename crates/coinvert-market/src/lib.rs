//! Market data access for the converter backend.
//!
//! Defines the [`ListingsProvider`] contract the backend consumes, the
//! [`MarketError`] taxonomy its failures surface as, and the CoinMarketCap
//! HTTP implementation used in production. Retry, backoff, and caching are
//! deliberately absent: a failed fetch is reported once and the backend
//! keeps its previous data.

pub mod coinmarketcap;
pub mod dto;
pub mod error;
pub mod provider;

pub use coinmarketcap::CoinMarketCapProvider;
pub use error::{MarketError, MarketResult};
pub use provider::ListingsProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockListingsProvider;
