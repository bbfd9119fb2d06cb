use chrono::{Local, TimeZone};
use rust_decimal::RoundingStrategy;

use crate::core::{Amount, Transaction};
use crate::core::transaction::MAX_DECIMALS;

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    return grouped;
}

/// Rounds to whole cents, halves away from zero.
pub fn round_cents(amount: Amount) -> Amount {
    amount.round_dp_with_strategy(MAX_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Magnitude with thousands separators and at most two decimals,
/// e.g. `Rp 1,250.5`. The sign of `amount` is dropped.
pub fn format_amount(amount: Amount, currency: &str) -> String {
    let fixed = round_cents(amount.abs()).normalize().to_string();
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut number = group_thousands(whole);
    if !fraction.is_empty() {
        number.push('.');
        number.push_str(fraction);
    }
    if currency.is_empty() {
        return number;
    }
    return format!("{} {}", currency, number);
}

/// A balance, with a leading minus when it is negative once rounded.
pub fn format_balance(balance: Amount, currency: &str) -> String {
    let rounded = round_cents(balance);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    return format!("{}{}", sign, format_amount(balance, currency));
}

pub fn format_signed(transaction: &Transaction, currency: &str) -> String {
    let sign = if transaction.is_income() { '+' } else { '-' };
    return format!("{}{}", sign, format_amount(transaction.amount(), currency));
}

/// Calendar date of creation as seen in `zone`.
pub fn format_date_in<Tz: TimeZone>(transaction: &Transaction, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display
{
    transaction.date().with_timezone(zone).format("%Y-%m-%d").to_string()
}

pub fn format_date(transaction: &Transaction) -> String {
    format_date_in(transaction, &Local)
}
