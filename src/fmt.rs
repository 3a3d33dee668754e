/// Format a float as a currency amount with thousands separators: ₹1,234.56
pub fn money(val: f64, symbol: &str) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Signed display used in the transaction list: `+ ₹10.00` / `- ₹4.50`.
pub fn signed_money(val: f64, symbol: &str) -> String {
    let sign = if val > 0.0 { "+" } else { "-" };
    format!("{sign} {}", money(val.abs(), symbol))
}

pub fn percent(val: f64) -> String {
    format!("{val:.1}%")
}
