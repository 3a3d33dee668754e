mod cli;
mod db;
mod error;
mod fmt;
mod kv;
mod logging;
mod models;
mod reports;
mod settings;
mod store;
mod theme;
mod validation;

use clap::Parser;

use cli::{Cli, Commands, Context};
use theme::Slot;
use validation::TransactionForm;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = Context::new(cli.data_dir.as_deref());

    let result = match cli.command {
        Commands::Init {
            currency,
            default_period,
        } => cli::init::run(&ctx, currency, default_period),
        Commands::Add {
            description,
            amount,
            category,
            kind,
            date,
            time,
        } => cli::transactions::add(
            &ctx,
            TransactionForm {
                description,
                amount,
                category: category.unwrap_or_default(),
                kind,
                date,
                time,
            },
        ),
        Commands::Delete { id } => cli::transactions::delete(&ctx, id),
        Commands::Clear { yes } => cli::transactions::clear(&ctx, yes),
        Commands::List {
            kind,
            category,
            search,
            limit,
        } => cli::transactions::list(&ctx, kind, category, search, limit),
        Commands::Summary => cli::summary::summary(&ctx),
        Commands::Breakdown { period } => cli::summary::breakdown(&ctx, period),
        Commands::Export { output } => cli::transactions::export(&ctx, &output),
        Commands::Theme { command } => cli::theme::run(&ctx, command),
        Commands::Status => cli::status::run(&ctx),
    };

    if let Err(e) = result {
        let palette = ctx.saved_palette();
        for line in cli::error_lines(&e) {
            eprintln!("{}", palette.paint(Slot::Error, &line));
        }
        std::process::exit(1);
    }
}
