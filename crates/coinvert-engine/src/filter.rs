//! Narrowing the listing down for the currency picker.

use coinvert_bridge::model::CurrencyRecord;

/// Returns the subsequence of `records` whose symbol or name contains
/// `query`, case-insensitively. A blank query returns all records.
pub fn filter_records(records: &[CurrencyRecord], query: &str) -> Vec<CurrencyRecord> {
    let query = query.trim();
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.symbol.to_lowercase().contains(&needle)
                || record.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
