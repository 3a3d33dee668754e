use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Lifetime,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Yearly,
        Period::Lifetime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
            Period::Lifetime => "lifetime",
        }
    }

    /// First day included in the period, or `None` for lifetime.
    /// Weeks start on Sunday.
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Daily => Some(today),
            Period::Weekly => {
                let back = today.weekday().num_days_from_sunday();
                Some(today - Duration::days(i64::from(back)))
            }
            Period::Monthly => today.with_day(1),
            Period::Yearly => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Period::Lifetime => None,
        }
    }

    /// Whether `date` falls in `[start, today]`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        if date > today {
            return false;
        }
        match self.start(today) {
            Some(start) => date >= start,
            None => true,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown period '{s}' (expected daily, weekly, monthly, yearly or lifetime)")
            })
    }
}

fn period_expenses_iter<'a>(
    transactions: &'a [Transaction],
    period: Period,
    today: NaiveDate,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |t| t.is_expense() && period.contains(t.date, today))
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub count: usize,
    pub average: f64,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let income: f64 = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum::<f64>()
        .abs();
    let count = transactions.len();
    let average = if count == 0 {
        0.0
    } else {
        transactions.iter().map(|t| t.amount.abs()).sum::<f64>() / count as f64
    };

    Totals {
        income,
        expenses,
        balance: income - expenses,
        count,
        average,
    }
}

// ---------------------------------------------------------------------------
// Period expenses
// ---------------------------------------------------------------------------

pub fn period_expenses(transactions: &[Transaction], period: Period, today: NaiveDate) -> f64 {
    period_expenses_iter(transactions, period, today)
        .map(|t| t.amount.abs())
        .sum()
}

/// Expense sums for the four bounded periods, in order.
pub fn period_summary(transactions: &[Transaction], today: NaiveDate) -> Vec<(Period, f64)> {
    [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly]
        .into_iter()
        .map(|p| (p, period_expenses(transactions, p, today)))
        .collect()
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub period: Period,
    pub total: f64,
    pub entries: Vec<CategoryShare>,
}

pub fn category_breakdown(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> CategoryBreakdown {
    let mut grouped: HashMap<&str, (f64, usize)> = HashMap::new();
    for t in period_expenses_iter(transactions, period, today) {
        let slot = grouped.entry(t.category.as_str()).or_insert((0.0, 0));
        slot.0 += t.amount.abs();
        slot.1 += 1;
    }

    let total: f64 = grouped.values().map(|(amount, _)| amount).sum();
    let mut entries: Vec<CategoryShare> = grouped
        .into_iter()
        .map(|(category, (amount, count))| CategoryShare {
            category: category.to_string(),
            amount,
            count,
            pct: if total != 0.0 { amount / total * 100.0 } else { 0.0 },
        })
        .collect();
    entries.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    CategoryBreakdown { period, total, entries }
}
