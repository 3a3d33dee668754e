//! Light/dark theme preference and the style table the terminal view draws
//! with.

use std::fmt;
use std::str::FromStr;

use colored::{Color, ColoredString, Colorize};

use crate::error::Result;
use crate::kv::KeyValueStore;

pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Anything other than the literal `"true"` reads as light.
pub fn load_theme(kv: &impl KeyValueStore) -> Result<Theme> {
    let dark = kv.get(DARK_MODE_KEY)?.is_some_and(|v| v == "true");
    Ok(if dark { Theme::Dark } else { Theme::Light })
}

pub fn save_theme(kv: &mut impl KeyValueStore, theme: Theme) -> Result<()> {
    kv.set(DARK_MODE_KEY, if theme == Theme::Dark { "true" } else { "false" })
}

pub fn toggle_theme(kv: &mut impl KeyValueStore) -> Result<Theme> {
    let next = load_theme(kv)?.toggled();
    save_theme(kv, next)?;
    tracing::info!(theme = %next, "theme changed");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Style table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Heading,
    Income,
    Expense,
    BalancePositive,
    BalanceNegative,
    BalanceNeutral,
    Accent,
    Muted,
    Error,
}

#[derive(Debug)]
pub struct Palette {
    pub heading: Color,
    pub income: Color,
    pub expense: Color,
    pub balance_neutral: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
}

static LIGHT: Palette = Palette {
    heading: Color::Black,
    income: Color::Green,
    expense: Color::Red,
    balance_neutral: Color::Blue,
    accent: Color::Blue,
    muted: Color::BrightBlack,
    error: Color::Red,
};

static DARK: Palette = Palette {
    heading: Color::BrightWhite,
    income: Color::BrightGreen,
    expense: Color::BrightRed,
    balance_neutral: Color::BrightCyan,
    accent: Color::BrightCyan,
    muted: Color::White,
    error: Color::BrightRed,
};

impl Palette {
    pub fn color(&self, slot: Slot) -> Color {
        match slot {
            Slot::Heading => self.heading,
            Slot::Income | Slot::BalancePositive => self.income,
            Slot::Expense | Slot::BalanceNegative => self.expense,
            Slot::BalanceNeutral => self.balance_neutral,
            Slot::Accent => self.accent,
            Slot::Muted => self.muted,
            Slot::Error => self.error,
        }
    }

    pub fn paint(&self, slot: Slot, text: &str) -> ColoredString {
        let painted = text.color(self.color(slot));
        match slot {
            Slot::Heading | Slot::Error => painted.bold(),
            _ => painted,
        }
    }
}

/// Slot for a balance: positive, negative, or exactly zero.
pub fn balance_slot(balance: f64) -> Slot {
    if balance > 0.0 {
        Slot::BalancePositive
    } else if balance < 0.0 {
        Slot::BalanceNegative
    } else {
        Slot::BalanceNeutral
    }
}

/// Slot for a signed amount.
pub fn amount_slot(amount: f64) -> Slot {
    if amount > 0.0 {
        Slot::Income
    } else {
        Slot::Expense
    }
}
