/// Digit grouping used by a currency's number format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// #,###.##
    Thousands,
    /// #,##,###.##
    Indian,
}

fn symbol_for(code: &str) -> Option<&'static str> {
    match code {
        "INR" => Some("₹"),
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn grouping_for(code: &str) -> Grouping {
    match code {
        "INR" => Grouping::Indian,
        _ => Grouping::Thousands,
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let step = match grouping {
        Grouping::Thousands => 3,
        Grouping::Indian => 2,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Format an amount as `<symbol> <grouped number>`, e.g. `₹ 1,23,456.70`.
/// Unknown currency codes are printed in place of a symbol.
pub fn format_currency(amount: f64, currency: &str, precision: usize) -> String {
    let code = currency.trim().to_uppercase();
    let amount = if amount.is_finite() { amount } else { 0.0 };

    let rounded = format!("{:.*}", precision, amount.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rounded.as_str(), None),
    };

    let mut number = group_digits(int_part, grouping_for(&code));
    if let Some(frac) = frac_part {
        number.push('.');
        number.push_str(frac);
    }

    // No sign for values that round to zero
    let is_zero = rounded.chars().all(|c| c == '0' || c == '.');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    match symbol_for(&code) {
        Some(symbol) => format!("{}{} {}", sign, symbol, number),
        None => format!("{}{} {}", sign, code, number),
    }
}
