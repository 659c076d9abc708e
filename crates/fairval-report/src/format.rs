//! Numeric display formatting shared by all renderers.
//!
//! Every renderer formats through these helpers so the three artifacts
//! report each number at the same rounding precision. The derivation keeps
//! full precision; rounding happens here, once, at the display boundary.

use rust_decimal::Decimal;

/// Money amount: thousands separators, two decimal places.
#[must_use]
pub fn money(value: Decimal) -> String {
    group_thousands(&format!("{:.2}", value.round_dp(2)))
}

/// Whole-unit money amount: thousands separators, no decimals.
#[must_use]
pub fn money_whole(value: Decimal) -> String {
    group_thousands(&format!("{:.0}", value.round_dp(0)))
}

/// Rate given as a decimal fraction, shown as a percentage: `0.1111` -> `11.11%`.
#[must_use]
pub fn percent(fraction: Decimal) -> String {
    format!("{:.2}%", (fraction * Decimal::from(100)).round_dp(2))
}

/// Signed percentage with an explicit plus for gains.
#[must_use]
pub fn signed_percent(fraction: Decimal) -> String {
    let pct = (fraction * Decimal::from(100)).round_dp(2);
    if pct > Decimal::ZERO {
        format!("+{pct:.2}%")
    } else {
        format!("{pct:.2}%")
    }
}

/// Plain number at a fixed number of decimal places.
#[must_use]
pub fn number(value: Decimal, dp: u32) -> String {
    format!("{:.prec$}", value.round_dp(dp), prec = dp as usize)
}

fn group_thousands(raw: &str) -> String {
    let (sign, rest) = raw.strip_prefix('-').map_or(("", raw), |r| ("-", r));
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_grouping() {
        assert_eq!(money(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(money(dec!(999)), "999.00");
        assert_eq!(money(dec!(-45000)), "-45,000.00");
        assert_eq!(money_whole(dec!(104500.5)), "104,500");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec!(0.1111)), "11.11%");
        assert_eq!(percent(dec!(0.05)), "5.00%");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(dec!(0.111111)), "+11.11%");
        assert_eq!(signed_percent(dec!(-0.024)), "-2.40%");
        assert_eq!(signed_percent(Decimal::ZERO), "0.00%");
    }

    #[test]
    fn test_number_precision() {
        assert_eq!(number(dec!(0.892857), 4), "0.8929");
    }
}
