use std::io::{self, BufRead, Write};

use chrono::Local;
use comfy_table::{Cell, Table};
use serde::Serialize;

use crate::cli::{Context, View};
use crate::error::{Result, TallyError};
use crate::fmt::signed_money;
use crate::models::{Transaction, TransactionType};
use crate::store::TransactionFilter;
use crate::theme::{amount_slot, Slot};
use crate::validation::TransactionForm;

pub fn add(ctx: &Context, form: TransactionForm) -> Result<()> {
    let new = form
        .validate(Local::now().date_naive())
        .map_err(TallyError::Validation)?;
    let (mut store, view) = ctx.open_store()?;
    let txn = store.add(new)?;
    println!(
        "Added {} #{}: {} ({}) {} on {}",
        txn.kind,
        txn.id,
        txn.description,
        txn.category,
        view.paint(amount_slot(txn.amount), &signed_money(txn.amount, &view.currency)),
        txn.date,
    );
    Ok(())
}

pub fn delete(ctx: &Context, id: i64) -> Result<()> {
    let (mut store, _) = ctx.open_store()?;
    match store.delete(id)? {
        Some(txn) => println!("Deleted transaction {id}: {}", txn.description),
        None => println!("No transaction with ID {id}"),
    }
    Ok(())
}

pub fn clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to clear all transactions?")? {
        println!("Cancelled.");
        return Ok(());
    }
    let (mut store, _) = ctx.open_store()?;
    let removed = store.clear()?;
    println!("Cleared {removed} transaction(s).");
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub fn list(
    ctx: &Context,
    kind: Option<String>,
    category: Option<String>,
    search: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let kind = kind
        .as_deref()
        .map(str::parse::<TransactionType>)
        .transpose()
        .map_err(TallyError::Other)?;
    let filter = TransactionFilter { kind, category, search, limit };

    let (store, view) = ctx.open_store()?;
    if store.transactions().is_empty() {
        println!("No transactions yet");
        println!("{}", view.paint(Slot::Muted, "Add your first transaction to get started!"));
        return Ok(());
    }
    let rows = store.filtered(&filter);
    if rows.is_empty() {
        println!("No transactions match");
        return Ok(());
    }
    println!("{}", format_register(&rows, &view));
    Ok(())
}

pub fn format_register(rows: &[&Transaction], view: &View) -> String {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Time", "Description", "Category", "Amount"]);
    for txn in rows {
        let time = txn.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default();
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(txn.date),
            Cell::new(time),
            Cell::new(&txn.description),
            Cell::new(&txn.category),
            Cell::new(view.paint(amount_slot(txn.amount), &signed_money(txn.amount, &view.currency))),
        ]);
    }
    format!("{}\n{table}", view.paint(Slot::Heading, "Transactions"))
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: String,
    time: String,
    #[serde(rename = "type")]
    kind: &'a str,
    category: &'a str,
    description: &'a str,
    amount: f64,
}

pub fn export(ctx: &Context, output: &str) -> Result<()> {
    let (store, _) = ctx.open_store()?;
    let file = std::fs::File::create(output)?;
    let count = write_csv(store.transactions(), file)?;
    println!("Exported {count} transaction(s) to {output}");
    Ok(())
}

fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    for txn in transactions {
        writer.serialize(ExportRow {
            id: txn.id,
            date: txn.date.to_string(),
            time: txn.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            kind: txn.kind.as_str(),
            category: &txn.category,
            description: &txn.description,
            amount: txn.amount,
        })?;
    }
    writer.flush()?;
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 2,
                description: "Lunch, with team".to_string(),
                amount: -12.5,
                category: "Food".to_string(),
                kind: TransactionType::Expense,
                date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                time: NaiveTime::from_hms_opt(12, 15, 0),
            },
            Transaction {
                id: 1,
                description: "Salary".to_string(),
                amount: 1000.0,
                category: "Salary".to_string(),
                kind: TransactionType::Income,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                time: None,
            },
        ]
    }

    #[test]
    fn test_csv_export_layout() {
        let mut buf = Vec::new();
        let count = write_csv(&sample(), &mut buf).unwrap();
        assert_eq!(count, 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,time,type,category,description,amount");
        assert_eq!(lines[1], "2,2024-05-02,12:15,expense,Food,\"Lunch, with team\",-12.5");
        assert_eq!(lines[2], "1,2024-05-01,,income,Salary,Salary,1000.0");
    }

    #[test]
    fn test_register_lists_every_row() {
        colored::control::set_override(false);
        let txns = sample();
        let rows: Vec<&Transaction> = txns.iter().collect();
        let out = format_register(&rows, &View::new(crate::theme::Theme::Light, "$"));
        assert!(out.contains("Lunch, with team"));
        assert!(out.contains("- $12.50"));
        assert!(out.contains("+ $1,000.00"));
        assert!(out.contains("12:15"));
    }
}
