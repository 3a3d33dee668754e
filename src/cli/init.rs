use crate::cli::Context;
use crate::db::open_data_dir;
use crate::error::Result;
use crate::reports::Period;
use crate::settings::save_settings;

pub fn run(ctx: &Context, currency: Option<String>, default_period: Option<Period>) -> Result<()> {
    let mut settings = ctx.settings.clone();
    settings.data_dir = ctx.data_dir.to_string_lossy().to_string();
    if let Some(symbol) = currency {
        settings.currency_symbol = symbol;
    }
    if let Some(period) = default_period {
        settings.default_period = period;
    }

    save_settings(&settings)?;
    open_data_dir(&ctx.data_dir)?;

    println!("Initialized tally at {}", ctx.data_dir.display());
    Ok(())
}
