//! Monetary amounts.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Transfers strictly above this amount are routed to banker approval.
pub const HIGH_VALUE_THRESHOLD: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Parse a user-entered amount such as `"1500"` or `" 99.50 "`.
///
/// Returns `None` for blank or non-numeric input.
///
/// # Examples
/// ```
/// use banking_client::domain::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("99.50"), Some(Decimal::new(9950, 2)));
/// assert_eq!(parse_amount("abc"), None);
/// ```
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Whether a transfer of `amount` needs banker approval.
pub fn is_high_value(amount: Decimal) -> bool {
    amount > HIGH_VALUE_THRESHOLD
}
