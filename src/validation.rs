use std::fmt;

use chrono::NaiveDate;

use crate::models::{clock_time, NewTransaction, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Amount,
    Category,
    Type,
    Date,
    Time,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Type => "type",
            Field::Date => "date",
            Field::Time => "time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field that failed, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    #[cfg(test)]
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field.as_str(), e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Raw form input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl TransactionForm {
    /// Check every field and build a [`NewTransaction`]. A missing date
    /// defaults to `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<NewTransaction, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(Field::Description, "Please enter a description");
        }

        let amount = match self.amount.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Some(v),
            _ => {
                errors.push(Field::Amount, "Please enter a valid amount");
                None
            }
        };

        let category = self.category.trim();
        if category.is_empty() {
            errors.push(Field::Category, "Please select a category");
        }

        let kind = match self.kind.as_deref().map(str::parse::<TransactionType>) {
            Some(Ok(kind)) => Some(kind),
            _ => {
                errors.push(Field::Type, "Please select a type");
                None
            }
        };

        let date = match self.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Some(today),
            Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push(Field::Date, "Please enter a valid date");
                    None
                }
            },
        };

        let time = match self.time.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Some(None),
            Some(text) => match clock_time::parse(text) {
                Ok(t) => Some(Some(t)),
                Err(_) => {
                    errors.push(Field::Time, "Please enter a valid time");
                    None
                }
            },
        };

        match (amount, kind, date, time) {
            (Some(amount), Some(kind), Some(date), Some(time)) if errors.0.is_empty() => {
                Ok(NewTransaction {
                    description: description.to_string(),
                    amount,
                    category: category.to_string(),
                    kind,
                    date,
                    time,
                })
            }
            _ => Err(errors),
        }
    }
}
