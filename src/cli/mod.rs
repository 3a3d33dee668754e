pub mod init;
pub mod status;
pub mod summary;
pub mod theme;
pub mod transactions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::ColoredString;

use crate::db::{open_data_dir, DB_FILE};
use crate::error::{Result, TallyError};
use crate::fmt::money;
use crate::kv::SqliteKv;
use crate::reports::Period;
use crate::settings::{load_settings, shellexpand_path, Settings};
use crate::store::TransactionStore;
use crate::theme::{load_theme, Palette, Slot, Theme};

#[derive(Parser)]
#[command(name = "tally", about = "Track income and expenses from the terminal.")]
pub struct Cli {
    /// Data directory holding tally.db (overrides settings)
    #[arg(long = "data-dir", global = true, env = "TALLY_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save settings and create the database.
    Init {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,
        /// Period shown by `tally breakdown` when none is given
        #[arg(long = "default-period")]
        default_period: Option<Period>,
    },
    /// Record an income or expense.
    Add {
        /// What the money was for
        description: String,
        /// Positive amount; the sign comes from --type
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category label, e.g. Food
        #[arg(long)]
        category: Option<String>,
        /// income or expense
        #[arg(long = "type")]
        kind: Option<String>,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Time: HH:MM
        #[arg(long)]
        time: Option<String>,
    },
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID (shown in `tally list`)
        id: i64,
    },
    /// Delete every transaction.
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List transactions, newest first.
    List {
        /// income or expense
        #[arg(long = "type")]
        kind: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
        /// Text to look for in description or category
        #[arg(long)]
        search: Option<String>,
        /// Show at most N rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Totals and expenses per period.
    Summary,
    /// Expenses by category for a period.
    Breakdown {
        /// daily, weekly, monthly, yearly or lifetime
        #[arg(long)]
        period: Option<Period>,
    },
    /// Write all transactions to a CSV file.
    Export {
        /// Output file path
        #[arg(long)]
        output: String,
    },
    /// Show or change the color theme.
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show data location and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Print the current theme.
    Show,
    /// Switch between light and dark.
    Toggle,
    /// Set the theme explicitly.
    Set {
        /// light or dark
        theme: Theme,
    },
}

/// Resolved settings and data location for one invocation.
pub struct Context {
    pub settings: Settings,
    pub data_dir: PathBuf,
}

impl Context {
    pub fn new(data_dir: Option<&str>) -> Self {
        let settings = load_settings();
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(shellexpand_path(dir)),
            None => PathBuf::from(&settings.data_dir),
        };
        Self { settings, data_dir }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn open_kv(&self) -> Result<SqliteKv> {
        Ok(SqliteKv::new(open_data_dir(&self.data_dir)?))
    }

    /// Open the store together with a view styled by the saved theme.
    pub fn open_store(&self) -> Result<(TransactionStore<SqliteKv>, View)> {
        let kv = self.open_kv()?;
        let theme = load_theme(&kv)?;
        let store = TransactionStore::load(kv)?;
        Ok((store, View::new(theme, &self.settings.currency_symbol)))
    }

    /// Palette for the saved theme, without creating a database that is
    /// not there yet. Falls back to light.
    pub fn saved_palette(&self) -> &'static Palette {
        if !self.db_path().exists() {
            return Theme::default().palette();
        }
        self.open_kv()
            .and_then(|kv| load_theme(&kv))
            .unwrap_or_default()
            .palette()
    }
}

/// Lines printed to stderr for a failed command. Validation failures get one
/// line per field.
pub fn error_lines(err: &TallyError) -> Vec<String> {
    match err {
        TallyError::Validation(errs) => errs
            .0
            .iter()
            .map(|e| format!("Error: {}: {}", e.field.as_str(), e.message))
            .collect(),
        other => vec![format!("Error: {other}")],
    }
}

/// Styling and currency for terminal output.
pub struct View {
    pub palette: &'static Palette,
    pub currency: String,
}

impl View {
    pub fn new(theme: Theme, currency: &str) -> Self {
        Self {
            palette: theme.palette(),
            currency: currency.to_string(),
        }
    }

    pub fn money(&self, val: f64) -> String {
        money(val, &self.currency)
    }

    pub fn paint(&self, slot: Slot, text: &str) -> ColoredString {
        self.palette.paint(slot, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, FieldError, ValidationErrors};

    #[test]
    fn test_validation_errors_print_one_line_per_field() {
        let err = TallyError::Validation(ValidationErrors(vec![
            FieldError {
                field: Field::Description,
                message: "Please enter a description",
            },
            FieldError {
                field: Field::Amount,
                message: "Please enter a valid amount",
            },
        ]));
        assert_eq!(
            error_lines(&err),
            vec![
                "Error: description: Please enter a description",
                "Error: amount: Please enter a valid amount",
            ]
        );
    }

    #[test]
    fn test_other_errors_print_one_line() {
        let err = TallyError::Other("disk full".to_string());
        assert_eq!(error_lines(&err), vec!["Error: disk full"]);
    }
}
