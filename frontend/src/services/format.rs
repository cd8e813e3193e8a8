//! Display formatting for table cells and chart labels.

pub fn currency_symbol(currency: &str) -> &str {
    match currency {
        "RS" | "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

/// Group the integer part in thousands and keep at most two decimals,
/// dropping trailing zeros (`1234.5` -> `1,234.5`)
pub fn group_thousands(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut out = String::new();
    if amount < 0.0 && cents > 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if fraction != 0 {
        let decimals = format!("{:02}", fraction);
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

pub fn format_amount(currency: &str, amount: f64) -> String {
    format!("{} {}", currency_symbol(currency), group_thousands(amount))
}

/// Date part of an RFC 3339 timestamp
pub fn format_date(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|ts| ts.split('T').next())
        .unwrap_or_default()
        .to_string()
}
