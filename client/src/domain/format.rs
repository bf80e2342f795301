//! Display helpers for amounts, account numbers, dates, and statuses.
//!
//! Output follows Indian conventions: rupee sign, lakh/crore digit grouping,
//! and day-month-year dates.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use super::timestamp::Timestamp;
use super::transaction::Transaction;

/// Group the digits of a non-negative integer the Indian way.
///
/// The last three digits form one group; earlier digits are grouped in
/// pairs (`12345678` becomes `1,23,45,678`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (index, ch) in head.chars().enumerate() {
        if index > 0 && (head.len() - index) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

fn split_rounded(amount: Decimal, places: u32) -> (bool, String, String) {
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    match text.split_once('.') {
        Some((whole, fraction)) => (negative, whole.to_owned(), fraction.to_owned()),
        None => (negative, text, String::new()),
    }
}

/// Format an amount as Indian rupees with two decimals.
///
/// # Examples
/// ```
/// use banking_client::domain::format::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::new(12345600, 2)), "₹1,23,456.00");
/// assert_eq!(format_inr(Decimal::new(-5, 1)), "-₹0.50");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let (negative, whole, fraction) = split_rounded(amount, 2);
    let sign = if negative { "-" } else { "" };
    format!("{sign}₹{}.{fraction:0<2}", group_indian(&whole))
}

/// Format an optional amount, rendering a missing one as zero rupees.
pub fn format_optional_inr(amount: Option<Decimal>) -> String {
    format_inr(amount.unwrap_or(Decimal::ZERO))
}

/// Format a number with Indian grouping and at most three decimals.
pub fn format_number(value: Decimal) -> String {
    let (negative, whole, fraction) = split_rounded(value, 3);
    let sign = if negative { "-" } else { "" };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{}", group_indian(&whole))
    } else {
        format!("{sign}{}.{fraction}", group_indian(&whole))
    }
}

/// Show only the last four characters of an account number.
pub fn mask_account_number(account_number: &str) -> String {
    if account_number.is_empty() {
        return String::new();
    }
    let count = account_number.chars().count();
    let last4: String = account_number.chars().skip(count.saturating_sub(4)).collect();
    format!("****{last4}")
}

/// Split an account number into space-separated groups of four.
pub fn format_account_number(account_number: &str) -> String {
    let chars: Vec<char> = account_number.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Date rendering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `15 January 2024`
    #[default]
    Long,
    /// `15 Jan 2024`
    Short,
}

/// Format the date part of a backend timestamp.
///
/// Unparseable timestamps are returned verbatim.
pub fn format_date(timestamp: &Timestamp, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Long => "%-d %B %Y",
        DateStyle::Short => "%-d %b %Y",
    };
    render(timestamp, pattern)
}

/// Format a backend timestamp as date and 12-hour time.
pub fn format_date_time(timestamp: &Timestamp) -> String {
    render(timestamp, "%-d %b %Y, %I:%M %P")
}

/// Format the time part of a backend timestamp.
pub fn format_time(timestamp: &Timestamp) -> String {
    render(timestamp, "%I:%M %P")
}

fn render(timestamp: &Timestamp, pattern: &str) -> String {
    timestamp.parse().map_or_else(
        || timestamp.as_str().to_owned(),
        |parsed| parsed.format(pattern).to_string(),
    )
}

/// Visual tone for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Awaiting action.
    Warning,
    /// Accepted but not settled.
    Info,
    /// Settled.
    Success,
    /// Refused or failed.
    Error,
    /// Neutral.
    Default,
}

impl StatusTone {
    /// Lowercase tone name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for StatusTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone for a transaction or payment status name such as `"PENDING"`.
pub fn status_tone(status: &str) -> StatusTone {
    match status {
        "PENDING" => StatusTone::Warning,
        "APPROVED" => StatusTone::Info,
        "COMPLETED" => StatusTone::Success,
        "REJECTED" | "FAILED" => StatusTone::Error,
        _ => StatusTone::Default,
    }
}

/// Direction of a transaction relative to the viewing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The user sent the money.
    Sent,
    /// The user received the money.
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sent => "Sent",
            Self::Received => "Received",
        })
    }
}

/// Whether `username` sent or received `transaction`.
pub fn transaction_direction(transaction: &Transaction, username: &str) -> Direction {
    if transaction.from_user.as_deref() == Some(username) {
        Direction::Sent
    } else {
        Direction::Received
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let kept: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{kept}...")
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{TransactionId, TransactionStatus, TransactionType};
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::ZERO, "₹0.00")]
    #[case(Decimal::new(50000, 2), "₹500.00")]
    #[case(Decimal::new(1000, 0), "₹1,000.00")]
    #[case(Decimal::new(12345678, 0), "₹1,23,45,678.00")]
    #[case(Decimal::new(1005, 3), "₹1.01")]
    #[case(Decimal::new(-250050, 2), "-₹2,500.50")]
    fn inr_uses_indian_grouping(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_inr(amount), expected);
    }

    #[rstest]
    fn missing_amount_renders_as_zero() {
        assert_eq!(format_optional_inr(None), "₹0.00");
    }

    #[rstest]
    #[case(Decimal::new(1234567, 0), "12,34,567")]
    #[case(Decimal::new(15, 1), "1.5")]
    fn numbers_drop_trailing_zeros(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[rstest]
    #[case("100012345678", "****5678")]
    #[case("12", "****12")]
    #[case("", "")]
    fn masks_account_numbers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(mask_account_number(input), expected);
    }

    #[rstest]
    fn groups_account_numbers_in_fours() {
        assert_eq!(format_account_number("100012345678"), "1000 1234 5678");
        assert_eq!(format_account_number("1234567"), "1234 567");
    }

    #[rstest]
    fn dates_render_day_month_year() {
        let ts = Timestamp::new("2024-01-05T14:30:00");
        assert_eq!(format_date(&ts, DateStyle::Long), "5 January 2024");
        assert_eq!(format_date(&ts, DateStyle::Short), "5 Jan 2024");
        assert_eq!(format_date_time(&ts), "5 Jan 2024, 02:30 pm");
        assert_eq!(format_time(&ts), "02:30 pm");
        assert_eq!(format_date(&Timestamp::new("soon"), DateStyle::Long), "soon");
    }

    #[rstest]
    #[case("PENDING", StatusTone::Warning)]
    #[case("APPROVED", StatusTone::Info)]
    #[case("COMPLETED", StatusTone::Success)]
    #[case("REJECTED", StatusTone::Error)]
    #[case("FAILED", StatusTone::Error)]
    #[case("CANCELLED", StatusTone::Default)]
    fn statuses_map_to_tones(#[case] status: &str, #[case] tone: StatusTone) {
        assert_eq!(status_tone(status), tone);
    }

    #[rstest]
    fn direction_follows_sender() {
        let transaction = Transaction {
            id: TransactionId::new(1),
            kind: TransactionType::Transfer,
            from_account: None,
            to_account: None,
            amount: Decimal::ONE,
            status: TransactionStatus::Completed,
            timestamp: None,
            from_user: Some("alice".to_owned()),
            to_user: Some("bob".to_owned()),
            description: None,
        };
        assert_eq!(transaction_direction(&transaction, "alice"), Direction::Sent);
        assert_eq!(transaction_direction(&transaction, "bob"), Direction::Received);
    }

    #[rstest]
    #[case("pENDING", "Pending")]
    #[case("", "")]
    fn capitalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize(input), expected);
    }

    #[rstest]
    #[case("short", 20, "short")]
    #[case("Electricity Board of Karnataka", 20, "Electricity Board of...")]
    #[case("₹₹₹₹", 2, "₹₹...")]
    fn truncates_on_character_boundaries(
        #[case] input: &str,
        #[case] max: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate(input, max), expected);
    }
}
