pub const CURRENCY_SYMBOL: &str = "$";

/// Formats an amount as a whole-unit currency string, e.g. `$118,500`.
///
/// Rounds half toward positive infinity and groups thousands with `,`.
/// The sign follows the symbol: `-2.5` renders as `$-2`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let rounded = round_half_up(value);
    let grouped = group_thousands(rounded.unsigned_abs());
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{CURRENCY_SYMBOL}{sign}{grouped}")
}

/// Raw numeric text, without trailing `.0` for whole values.
#[must_use]
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    format!("{value}")
}

fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    if rounded > (i64::MAX as f64) {
        i64::MAX
    } else if rounded < (i64::MIN as f64) {
        i64::MIN
    } else {
        rounded as i64
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
