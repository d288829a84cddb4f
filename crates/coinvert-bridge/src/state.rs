use crate::model::CurrencyRecord;

/// Immutable snapshot of the full conversion session.
///
/// The backend is the only writer: every user intent, scheduler tick, and
/// refresh result produces a new snapshot, which is pushed to the frontend
/// wholesale. No field is ever mutated in place, so a consumer holding a
/// snapshot can never observe a half-applied transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    /// Currently listed currencies, in provider order, unique by id.
    pub records: Vec<CurrencyRecord>,
    /// The currency being converted from. Always drawn from `records`.
    pub from: Option<CurrencyRecord>,
    /// The currency being converted to. Always drawn from `records`.
    pub to: Option<CurrencyRecord>,
    /// The amount as the user typed it. Kept as text so in-progress input
    /// like "1." survives a background refresh untouched.
    pub amount: String,
    /// Converted amount for the current `from`/`to`/`amount` triple.
    pub converted_amount: String,
    /// Current picker search query.
    pub search_query: String,
    /// `records` narrowed down by `search_query`; all records when the
    /// query is blank.
    pub filtered_records: Vec<CurrencyRecord>,
    /// Seconds remaining until the next automatic refresh.
    pub seconds_until_refresh: u64,
    /// Description of the most recent failed refresh, cleared on the next
    /// successful one.
    pub error: Option<String>,
    /// True only while the very first fetch is outstanding.
    pub is_loading: bool,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            from: None,
            to: None,
            amount: "1.0".to_string(),
            converted_amount: "0.0".to_string(),
            search_query: String::new(),
            filtered_records: Vec::new(),
            seconds_until_refresh: 0,
            error: None,
            is_loading: true,
        }
    }
}
