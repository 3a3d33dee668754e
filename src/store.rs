use chrono::{Local, NaiveDate};

use crate::error::{Result, TallyError};
use crate::kv::KeyValueStore;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::reports::{self, CategoryBreakdown, Period, Totals};

pub const TRANSACTIONS_KEY: &str = "transactions";

/// Owns the transaction list (newest first) and its persistence.
///
/// Every mutation rewrites the full list under [`TRANSACTIONS_KEY`].
pub struct TransactionStore<S: KeyValueStore> {
    kv: S,
    transactions: Vec<Transaction>,
}

/// Optional constraints for [`TransactionStore::filtered`].
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != txn.kind) {
            return false;
        }
        if let Some(cat) = &self.category {
            if txn.category.to_lowercase() != cat.trim().to_lowercase() {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let needle = needle.trim().to_lowercase();
            if !txn.description.to_lowercase().contains(&needle)
                && !txn.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Load the list from `kv`. Anything that is not a JSON array loads as
    /// empty; array elements that fail to decode are dropped.
    pub fn load(kv: S) -> Result<Self> {
        let transactions = match kv.get(TRANSACTIONS_KEY)? {
            None => Vec::new(),
            Some(raw) => decode_list(&raw),
        };
        tracing::debug!(count = transactions.len(), "loaded transactions");
        Ok(Self { kv, transactions })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn filtered(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(t))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect()
    }

    pub fn add(&mut self, new: NewTransaction) -> Result<Transaction> {
        self.add_at(new, Local::now().timestamp_millis())
    }

    /// Add using `now_ms` as the clock reading for the id.
    pub fn add_at(&mut self, new: NewTransaction, now_ms: i64) -> Result<Transaction> {
        let newest = self.transactions.iter().map(|t| t.id).max().unwrap_or(i64::MIN);
        let id = if now_ms > newest {
            now_ms
        } else {
            newest
                .checked_add(1)
                .ok_or_else(|| TallyError::Other(format!("no id left after {newest}")))?
        };

        let txn = Transaction {
            id,
            description: new.description,
            amount: new.kind.signed(new.amount),
            category: new.category,
            kind: new.kind,
            date: new.date,
            time: new.time,
        };
        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(txn.clone());
        next.extend(self.transactions.iter().cloned());
        self.commit(next)?;
        tracing::info!(id, kind = %txn.kind, amount = txn.amount, "added transaction");
        Ok(txn)
    }

    /// Remove the transaction with `id`. A missing id leaves the list as is.
    pub fn delete(&mut self, id: i64) -> Result<Option<Transaction>> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "delete of unknown id ignored");
            return Ok(None);
        };
        let mut next = self.transactions.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        tracing::info!(id, "deleted transaction");
        Ok(Some(removed))
    }

    /// Remove everything. Returns how many records were dropped.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.transactions.len();
        self.commit(Vec::new())?;
        tracing::info!(removed, "cleared transactions");
        Ok(removed)
    }

    pub fn totals(&self) -> Totals {
        reports::totals(&self.transactions)
    }

    pub fn period_expenses(&self, period: Period) -> f64 {
        self.period_expenses_on(period, Local::now().date_naive())
    }

    pub fn period_expenses_on(&self, period: Period, today: NaiveDate) -> f64 {
        reports::period_expenses(&self.transactions, period, today)
    }

    pub fn period_summary(&self) -> Vec<(Period, f64)> {
        reports::period_summary(&self.transactions, Local::now().date_naive())
    }

    pub fn category_breakdown(&self, period: Period) -> CategoryBreakdown {
        self.category_breakdown_on(period, Local::now().date_naive())
    }

    pub fn category_breakdown_on(&self, period: Period, today: NaiveDate) -> CategoryBreakdown {
        reports::category_breakdown(&self.transactions, period, today)
    }

    /// Persist `next`, then adopt it. On a failed write the list is unchanged.
    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.kv.set(TRANSACTIONS_KEY, &json)?;
        self.transactions = next;
        Ok(())
    }
}

fn decode_list(raw: &str) -> Vec<Transaction> {
    let values = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(values)) => values,
        Ok(other) => {
            tracing::warn!(found = %json_kind(&other), "stored transactions are not a list; starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored transactions are not valid JSON; starting empty");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<Transaction>(value) {
            Ok(txn) => Some(txn),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping unreadable stored transaction");
                None
            }
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
