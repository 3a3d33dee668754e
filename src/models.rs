use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Apply this type's sign to a magnitude: expenses are stored negative.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            TransactionType::Income => amount.abs(),
            TransactionType::Expense => -amount.abs(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// A recorded income or expense event. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "clock_time")]
    pub time: Option<NaiveTime>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

/// Validated input for a new transaction, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

/// `HH:MM` on the way out; `HH:MM` or `HH:MM:SS` on the way in.
pub(crate) mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some).map_err(serde::de::Error::custom),
        }
    }

    pub fn parse(text: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(text, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
    }
}
