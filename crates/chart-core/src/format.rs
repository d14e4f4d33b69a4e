// File: crates/chart-core/src/format.rs
// Summary: Label formatters for axis ticks and tooltip content.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Bottom axis tick: 4-digit year.
pub fn year_label(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// Left axis tick: billions shown as trillions with one decimal, e.g. `$3.6T`.
pub fn trillions_label(billions: f64) -> String {
    format!("${}T", fixed(billions / 1000.0, 1))
}

/// Tooltip heading, e.g. `January 2000`.
pub fn month_year_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Tooltip value, e.g. `$3,500.50 Billion`.
pub fn billions_label(billions: f64) -> String {
    format!("${} Billion", group_thousands(&fixed(billions, 2)))
}

/// Fixed-point text with `dp` decimals. Exact halves round away from zero
/// (`0.25` gives `0.3`); everything else rounds to the nearest digit of the
/// exact binary value, so `1.005` stays `1.00`.
pub fn fixed(v: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(v) {
        Some(d) => {
            let mut d = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            d.rescale(dp);
            if d.is_zero() { d.set_sign_positive(true); }
            d.to_string()
        }
        None => format!("{:.*}", dp as usize, v),
    }
}

/// Insert `,` every three digits of the integer part of a plain decimal string.
pub fn group_thousands(plain: &str) -> String {
    let (sign, rest) = match plain.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", plain),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac}")
}
