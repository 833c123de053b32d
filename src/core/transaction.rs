use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::{parse_amount, parse_timestamp};
use crate::error::{TimelineError, TimelineResult};

/// Top-level classification of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainCategory {
    Income,
    Expenses,
    Transfers,
}

impl MainCategory {
    pub const ALL: [MainCategory; 3] = [Self::Income, Self::Expenses, Self::Transfers];

    /// Case-insensitive match against `INCOME`, `EXPENSES` and `TRANSFERS`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expenses => "EXPENSES",
            Self::Transfers => "TRANSFERS",
        }
    }
}

/// Signed amount as sent by the host: a decimal string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl RawAmount {
    /// Parses the amount into an exact decimal.
    ///
    /// Numbers go through their shortest textual form, so `12.5` stays `12.5`;
    /// exponent forms such as `1e3` are accepted for numbers only.
    pub fn to_decimal(&self) -> TimelineResult<Decimal> {
        match self {
            Self::Text(text) => parse_amount(text),
            Self::Number(number) => {
                let text = number.to_string();
                parse_amount(&text).or_else(|_| {
                    Decimal::from_scientific(&text)
                        .map_err(|err| TimelineError::InvalidAmount(format!("`{text}`: {err}")))
                })
            }
        }
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Transaction record as delivered by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub posted_at: String,
    pub amount: RawAmount,
    pub main_category: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl RawTransaction {
    #[must_use]
    pub fn new(
        posted_at: impl Into<String>,
        amount: impl Into<RawAmount>,
        main_category: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            posted_at: posted_at.into(),
            amount: amount.into(),
            main_category: main_category.into(),
            category: category.map(str::to_owned),
        }
    }
}

/// Validated transaction consumed by the aggregator.
///
/// `main_category` is `None` when the host sent a classification outside the
/// three known ones; such transactions are counted but never summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub main_category: Option<MainCategory>,
    pub category: Option<String>,
}

impl Transaction {
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        amount: Decimal,
        main_category: MainCategory,
        category: Option<&str>,
    ) -> Self {
        Self {
            date,
            amount,
            main_category: Some(main_category),
            category: category.map(str::to_owned),
        }
    }

    /// Leaf category name, or `fallback` when missing or blank.
    #[must_use]
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
    }
}

impl TryFrom<&RawTransaction> for Transaction {
    type Error = TimelineError;

    fn try_from(raw: &RawTransaction) -> TimelineResult<Self> {
        Ok(Self {
            date: parse_timestamp(&raw.posted_at)?,
            amount: raw.amount.to_decimal()?,
            main_category: MainCategory::parse(&raw.main_category),
            category: raw.category.clone(),
        })
    }
}

/// Outcome of a batch parse: usable transactions plus the number of skipped records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedTransactions {
    pub transactions: Vec<Transaction>,
    pub skipped: usize,
}

/// Parses host records, skipping (and logging) malformed ones.
#[must_use]
pub fn parse_transactions(raw: &[RawTransaction]) -> ParsedTransactions {
    let mut parsed = ParsedTransactions {
        transactions: Vec::with_capacity(raw.len()),
        skipped: 0,
    };

    for (index, record) in raw.iter().enumerate() {
        match Transaction::try_from(record) {
            Ok(transaction) => parsed.transactions.push(transaction),
            Err(err) => {
                parsed.skipped += 1;
                warn!(index, error = %err, "skipping malformed transaction record");
            }
        }
    }

    parsed
}
