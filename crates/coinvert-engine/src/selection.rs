//! Carrying a currency selection across listing refreshes.
//!
//! Every refresh replaces the record objects wholesale, so holding on to the
//! previously selected record (or its index) would pin stale prices or point
//! at the wrong currency after a reorder. Identity is the ticker symbol,
//! compared case-insensitively.

use coinvert_bridge::model::CurrencyRecord;

/// Maps a previous selection onto a freshly fetched listing.
///
/// Returns the new record carrying the same symbol as `old` when one exists,
/// so the selection follows the currency through reorders and price updates.
/// When the symbol was delisted, or nothing was selected yet, falls back to
/// `new_records[fallback_index]` (index 0 for the "from" slot, 1 for "to",
/// so a fresh session defaults to the first two listed currencies).
pub fn remap(
    old: Option<&CurrencyRecord>,
    new_records: &[CurrencyRecord],
    fallback_index: usize,
) -> Option<CurrencyRecord> {
    old.and_then(|selected| {
        new_records
            .iter()
            .find(|record| record.matches_symbol(&selected.symbol))
    })
    .or_else(|| new_records.get(fallback_index))
    .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, price: f64) -> CurrencyRecord {
        CurrencyRecord {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            usd: coinvert_bridge::model::UsdQuote {
                price,
                ..Default::default()
            },
            ..CurrencyRecord::default()
        }
    }

    #[test]
    fn selection_follows_symbol_through_reorder() {
        let old = record("BTC", 50_000.0);
        let refreshed = vec![record("ETH", 2_600.0), record("btc", 51_000.0)];

        let remapped = remap(Some(&old), &refreshed, 0).unwrap();
        assert_eq!(remapped.symbol, "btc");
        assert_eq!(remapped.price_usd(), 51_000.0);
    }

    #[test]
    fn delisted_symbol_falls_back_by_index() {
        let old = record("DOGE", 0.1);
        let refreshed = vec![record("BTC", 50_000.0), record("ETH", 2_600.0)];

        assert_eq!(remap(Some(&old), &refreshed, 0).unwrap().symbol, "BTC");
        assert_eq!(remap(Some(&old), &refreshed, 1).unwrap().symbol, "ETH");
    }

    #[test]
    fn absent_selection_uses_fallback() {
        let refreshed = vec![record("BTC", 50_000.0), record("ETH", 2_600.0)];
        assert_eq!(remap(None, &refreshed, 1).unwrap().symbol, "ETH");
    }

    #[test]
    fn out_of_range_fallback_clears_selection() {
        let refreshed = vec![record("BTC", 50_000.0)];
        assert!(remap(None, &refreshed, 1).is_none());
        assert!(remap(None, &[], 0).is_none());
    }
}
