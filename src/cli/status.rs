use crate::cli::Context;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::kv::SqliteKv;
use crate::store::TransactionStore;
use crate::theme::load_theme;

pub fn run(ctx: &Context) -> Result<()> {
    let db_path = ctx.db_path();

    println!("Data dir:   {}", ctx.data_dir.display());
    println!("Database:   {}", db_path.display());
    println!("Currency:   {}", ctx.settings.currency_symbol);
    println!("Period:     {}", ctx.settings.default_period);

    if db_path.exists() {
        let kv = SqliteKv::new(get_connection(&db_path)?);
        let theme = load_theme(&kv)?;
        let store = TransactionStore::load(kv)?;
        let totals = store.totals();

        println!("Theme:      {theme}");
        println!();
        println!("Transactions:  {}", totals.count);
        println!("Income:        {}", money(totals.income, &ctx.settings.currency_symbol));
        println!("Expenses:      {}", money(totals.expenses, &ctx.settings.currency_symbol));
    } else {
        println!();
        println!("Database not found. Run `tally init` or add a transaction to create it.");
    }

    Ok(())
}
