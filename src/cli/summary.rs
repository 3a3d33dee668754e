use comfy_table::{Cell, Table};

use crate::cli::{Context, View};
use crate::error::Result;
use crate::fmt::percent;
use crate::reports::{CategoryBreakdown, Period, Totals};
use crate::theme::{balance_slot, Slot};

pub fn summary(ctx: &Context) -> Result<()> {
    let (store, view) = ctx.open_store()?;
    let mut periods = store.period_summary();
    periods.push((Period::Lifetime, store.period_expenses(Period::Lifetime)));
    println!("{}", format_summary(&store.totals(), &periods, &view));
    Ok(())
}

pub fn breakdown(ctx: &Context, period: Option<Period>) -> Result<()> {
    let period = period.unwrap_or(ctx.settings.default_period);
    let (store, view) = ctx.open_store()?;
    if store.transactions().is_empty() {
        println!("No transactions yet");
        println!("{}", view.paint(Slot::Muted, "Add your first transaction to get started!"));
        return Ok(());
    }
    println!("{}", format_breakdown(&store.category_breakdown(period), &view));
    Ok(())
}

pub fn format_summary(totals: &Totals, periods: &[(Period, f64)], view: &View) -> String {
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        Cell::new("Income"),
        Cell::new(view.paint(Slot::Income, &view.money(totals.income))),
    ]);
    table.add_row(vec![
        Cell::new("Expenses"),
        Cell::new(view.paint(Slot::Expense, &view.money(totals.expenses))),
    ]);
    table.add_row(vec![
        Cell::new("Balance"),
        Cell::new(view.paint(balance_slot(totals.balance), &view.money(totals.balance))),
    ]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(totals.count)]);
    table.add_row(vec![Cell::new("Average"), Cell::new(view.money(totals.average))]);

    let mut period_table = Table::new();
    period_table.set_header(vec!["Period", "Expenses"]);
    for (period, amount) in periods {
        period_table.add_row(vec![
            Cell::new(capitalize(period.as_str())),
            Cell::new(view.money(*amount)),
        ]);
    }

    format!(
        "{}\n{table}\n\n{}\n{period_table}",
        view.paint(Slot::Heading, "Summary"),
        view.paint(Slot::Heading, "Expenses by period"),
    )
}

pub fn format_breakdown(breakdown: &CategoryBreakdown, view: &View) -> String {
    if breakdown.entries.is_empty() {
        return "No expenses for this period".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "Share", "Count"]);
    for entry in &breakdown.entries {
        table.add_row(vec![
            Cell::new(&entry.category),
            Cell::new(view.money(entry.amount)),
            Cell::new(view.paint(Slot::Muted, &percent(entry.pct))),
            Cell::new(entry.count),
        ]);
    }

    let heading = format!("Total {} expenses", breakdown.period);
    format!(
        "{}\n{}\n{table}",
        view.paint(Slot::Heading, &heading),
        view.paint(Slot::Accent, &view.money(breakdown.total)),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
