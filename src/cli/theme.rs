use crate::cli::{Context, ThemeCommands};
use crate::error::Result;
use crate::theme::{load_theme, save_theme, toggle_theme, Slot};

pub fn run(ctx: &Context, command: Option<ThemeCommands>) -> Result<()> {
    let mut kv = ctx.open_kv()?;
    let theme = match command.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => load_theme(&kv)?,
        ThemeCommands::Toggle => toggle_theme(&mut kv)?,
        ThemeCommands::Set { theme } => {
            save_theme(&mut kv, theme)?;
            theme
        }
    };
    let label = format!("Theme: {theme}");
    println!("{}", theme.palette().paint(Slot::Accent, &label));
    Ok(())
}
