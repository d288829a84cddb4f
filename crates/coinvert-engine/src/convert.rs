//! Conversion math and amount formatting.
//!
//! Conversion always routes through USD as the common unit: the typed amount
//! is multiplied by the "from" price and divided by the "to" price. No
//! cross-rate table exists, which is why a zero "to" price is a defined
//! zero-result edge case rather than a division fault.

use coinvert_bridge::model::CurrencyRecord;

/// Result string for every degenerate conversion input.
const ZERO_RESULT: &str = "0.0";

/// Parses user-typed amount text into a number.
///
/// Never fails: empty, partial, or non-numeric input parses to `0.0`, so
/// callers can feed in-progress text straight through.
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Formats a converted amount with 8 decimal digits of precision, then
/// strips trailing zeros and a trailing decimal point.
///
/// `1.50000000` becomes `1.5`, `1.00000000` becomes `1`. This is the only
/// user-visible numeric contract and must stay exact.
pub fn format_amount(value: f64) -> String {
    format!("{value:.8}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Converts `amount` units of `from` into units of `to`, routing through USD.
///
/// Total over all string inputs. Returns the literal `"0.0"` when either
/// endpoint is absent, the parsed amount is not positive (including
/// unparseable text), or the "to" quote is zero.
pub fn convert(amount: &str, from: Option<&CurrencyRecord>, to: Option<&CurrencyRecord>) -> String {
    let (Some(from), Some(to)) = (from, to) else {
        return ZERO_RESULT.to_string();
    };

    let amount = parse_amount(amount);
    // Written as a negated comparison so NaN input also lands here.
    if !(amount > 0.0) || to.price_usd() <= 0.0 {
        return ZERO_RESULT.to_string();
    }

    let amount_usd = amount * from.price_usd();
    format_amount(amount_usd / to.price_usd())
}
