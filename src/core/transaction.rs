use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Deserialize};

use crate::core::error::{LedgerError, LedgerResult};

pub type Amount = Decimal;
pub type TransactionId = i64;

/// Amounts are whole cents at most.
pub const MAX_DECIMALS: u32 = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense
}

impl TransactionType {
    /// Multiplier applied to a stored magnitude when computing balances.
    pub fn sign(&self) -> Amount {
        match self {
            Self::Income => Decimal::ONE,
            Self::Expense => Decimal::NEGATIVE_ONE
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense"
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(LedgerError::UnknownType(s.to_owned()))
        }
    }
}

/// Whether `text` only uses the characters an amount may be typed with:
/// digits and at most one decimal point. An empty string passes, so
/// that a half-typed field can be cleared.
pub fn is_amount_input(text: &str) -> bool {
    let mut seen_point = false;
    for c in text.chars() {
        match c {
            '0'..='9' => (),
            '.' if !seen_point => seen_point = true,
            _ => return false
        }
    }
    return true;
}

pub fn parse_amount(text: &str) -> LedgerResult<Amount> {
    let trimmed = text.trim();
    let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
    if !has_digit || !is_amount_input(trimmed) {
        return Err(LedgerError::InvalidAmount(text.to_owned()));
    }
    // "12." and ".5" are fine to type but not to parse
    let digits = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let digits = if digits.starts_with('.') { format!("0{}", digits) } else { digits.to_owned() };
    let amount = Decimal::from_str(&digits)
        .map_err(|_| LedgerError::InvalidAmount(text.to_owned()))?;
    return validate_amount(amount);
}

fn validate_amount(amount: Amount) -> LedgerResult<Amount> {
    let amount = amount.normalize();
    if amount <= Decimal::ZERO || amount.scale() > MAX_DECIMALS {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }
    return Ok(amount);
}

/// User supplied fields of a transaction, validated.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    description: String,
    amount: Amount,
    kind: TransactionType
}

impl Draft {
    pub fn new(description: &str, amount: Amount, kind: TransactionType) -> LedgerResult<Draft> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        let amount = validate_amount(amount)?;
        return Ok(Draft { description: description.to_owned(), amount, kind });
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionType,
    date: DateTime<Utc>
}

impl Transaction {
    pub(crate) fn from_draft(id: TransactionId, draft: Draft, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            date }
    }

    /// Replaces the user supplied fields. Id and creation date stay.
    pub(crate) fn apply(&mut self, draft: Draft) {
        self.description = draft.description;
        self.amount = draft.amount;
        self.kind = draft.kind;
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Checks a record that did not come through [`Draft::new`],
    /// such as one read back from storage.
    pub fn validate(&self) -> LedgerResult<()> {
        Draft::new(&self.description, self.amount, self.kind)?;
        return Ok(());
    }

    /// The amount as it contributes to the balance.
    pub fn signed_amount(&self) -> Amount {
        return self.kind.sign() * self.amount;
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_income() { '+' } else { '-' };
        write!(f, "{} ({}): {}{}", self.description, self.date.format("%Y-%m-%d"), sign, self.amount)
    }
}
