use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amounts are kept to paise.
pub const PRECISION: u32 = 2;

/// Largest amount a single entry may carry. Sums over every entry a ledger
/// can hold stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

// Significant digits a Decimal can hold.
const MAX_DIGITS: i32 = 28;

pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(PRECISION)
}

/// Parses the longest numeric prefix of `input`, the way browser form code
/// reads a number field: leading whitespace is skipped, trailing garbage is
/// ignored, and `None` means no digits were found at all.
pub fn parse_lenient(input: &str) -> Option<Decimal> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        },
        Some(b'+') => {
            pos += 1;
            false
        },
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + 2);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }

    let mantissa = Decimal::from_str(&literal).ok()?;

    match parse_exponent(&bytes[pos..]) {
        Some(exp) => Some(scale(mantissa, exp)),
        None => Some(mantissa),
    }
}

/// Reads an `e`/`E` exponent suffix. A dangling `e` is not an exponent.
fn parse_exponent(bytes: &[u8]) -> Option<i32> {
    let (first, rest) = bytes.split_first()?;
    if *first != b'e' && *first != b'E' {
        return None;
    }

    let (negative, digits) = match rest.first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let len = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }

    // Only digits remain, so a failed parse means the exponent overflowed.
    let value: i32 = std::str::from_utf8(&digits[..len])
        .ok()?
        .parse()
        .unwrap_or(i32::MAX);
    Some(if negative { -value } else { value })
}

/// Applies a decimal exponent, saturating at the Decimal range.
fn scale(mantissa: Decimal, exp: i32) -> Decimal {
    if mantissa.is_zero() || exp < -MAX_DIGITS {
        return Decimal::ZERO;
    }

    let saturated = if mantissa.is_sign_negative() { Decimal::MIN } else { Decimal::MAX };
    if exp > 2 * MAX_DIGITS {
        return saturated;
    }

    let ten = Decimal::TEN;
    let mut value = mantissa;
    for _ in 0..exp.unsigned_abs() {
        value = if exp > 0 {
            match value.checked_mul(ten) {
                Some(value) => value,
                None => return saturated,
            }
        } else {
            value / ten
        };
    }
    value
}

/// Renders `amount` with en-US digit grouping behind `symbol`, e.g. `₹11,700`
/// or `₹1,234.5`.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let rounded = round(amount).normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{symbol}{grouped}.{frac}"),
        None => format!("{sign}{symbol}{grouped}"),
    }
}
