/// Whole euros with Dutch digit grouping, e.g. `€ 25.000`. The symbol is
/// followed by a non-breaking space.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("€\u{a0}{amount}");
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("€\u{a0}-{grouped}")
    } else {
        format!("€\u{a0}{grouped}")
    }
}

/// Compact axis label: `€1.2M`, `€25K`, or the full amount below a thousand.
pub fn format_currency_short(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        let millions = (amount / 1_000_000.0 * 10.0).round() / 10.0;
        return format!("€{millions:.1}M");
    }
    if amount >= 1_000.0 {
        let thousands = (amount / 1_000.0).round();
        return format!("€{thousands:.0}K");
    }
    format_currency(amount)
}
