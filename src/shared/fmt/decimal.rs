//! Fixed-point `Decimal` formatting.
//!
//! Amounts are always shown with exactly two decimals, rounded half away from
//! zero, so a degraded zero rate renders as `0.00` rather than failing.

use rust_decimal::Decimal;

use crate::shared::pricing::round2;
use crate::shared::QuoteCurrency;

/// Two-decimal rendering, e.g. `99.00`.
pub fn fixed2(value: &Decimal) -> String {
    format!("{:.2}", round2(*value))
}

/// Two-decimal rendering with thousands separators, e.g. `49,500.00`.
pub fn grouped(value: &Decimal) -> String {
    let fixed = fixed2(value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut out = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}.{}", sign, out, fraction)
}

/// Currency-symbol rendering, e.g. `₽4950.00`.
pub fn money(value: &Decimal, currency: QuoteCurrency) -> String {
    format!("{}{}", currency.symbol(), fixed2(value))
}

/// Amount followed by a currency code, e.g. `99.00 RUB`.
pub fn priced(value: &Decimal, currency: &str) -> String {
    format!("{} {}", fixed2(value), currency)
}
