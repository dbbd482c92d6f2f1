// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `matrix3d(...)` text for the CSS rendering back end.
//!
//! Entries are formatted exactly like `Number.prototype.toFixed(20)`.

/// Formats `value` with 20 fractional digits, `toFixed(20)` style.
pub(super) fn to_fixed_20(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value.abs() >= 1e21 {
        // toFixed falls back to the shortest round-trip exponential form.
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    // -0 renders without a sign.
    let sign = if value < 0.0 { "-" } else { "" };
    // Exact expansion: an f64 never has more than 1074 fractional digits,
    // so this formatting does no rounding of its own.
    let exact = format!("{:.1074}", value.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return exact;
    };
    let mut digits: Vec<u8> = int_part.bytes().chain(frac.bytes().take(20)).collect();
    // Ties round up (away from zero), unlike `{:.20}`.
    if frac.as_bytes().get(20).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }
    let split = digits.len() - 20;
    let (whole, fraction) = digits.split_at(split);
    format!(
        "{sign}{}.{}",
        String::from_utf8_lossy(whole),
        String::from_utf8_lossy(fraction)
    )
}

/// Renders column-major `entries` as `matrix3d(e0,e1,...,e15)`.
pub(super) fn matrix3d(entries: &[f64; 16]) -> String {
    let mut out = String::with_capacity(16 * 24 + 10);
    out.push_str("matrix3d(");
    for (idx, value) in entries.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&to_fixed_20(*value));
    }
    out.push(')');
    out
}
