//! Number rendering in the default style of C++ output streams (`%g`).

/// Significant digits used by an output stream with default settings.
pub const DEFAULT_PRECISION: usize = 6;

/// Formats `value` with [`DEFAULT_PRECISION`] significant digits.
pub fn general(value: f64) -> String {
    general_with_precision(value, DEFAULT_PRECISION)
}

/// Formats `value` like `printf("%.*g", precision, value)`.
///
/// Fixed notation is used when the decimal exponent lies in `[-4, precision)`, scientific
/// notation otherwise; trailing zeros and a trailing decimal point are removed.
pub fn general_with_precision(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // The exponent must be taken after rounding to `precision` digits.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
