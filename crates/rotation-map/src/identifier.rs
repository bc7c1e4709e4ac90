//! Product identifier normalization.

use rotation_model::IDENTIFIER_WIDTH;

const NULL_MARKERS: [&str; 4] = ["nan", "none", "null", "nat"];

/// Normalizes a raw identifier cell to its zero-padded join key.
///
/// Numeric representations (`123`, `123.0`, `1.23E+2`) collapse to the
/// same integer form before padding to 13 characters; anything else is
/// kept as trimmed text. Blank and null-like cells yield an empty string.
/// The function is idempotent.
pub fn normalize_identifier(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() || NULL_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m)) {
        return String::new();
    }

    let core = if value.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = value.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        // Leading zeros are ignored so that padded output parses like its input.
        let unpadded = value.trim_start_matches('0');
        let numeric = if unpadded.starts_with('.') {
            format!("0{unpadded}")
        } else {
            unpadded.to_string()
        };
        match numeric.parse::<f64>() {
            Ok(number) if number.is_finite() && number >= 0.0 && number < u64::MAX as f64 => {
                (number.trunc() as u64).to_string()
            }
            _ => value.to_string(),
        }
    };

    format!("{core:0>width$}", width = IDENTIFIER_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_forms_agree() {
        assert_eq!(normalize_identifier("123"), "0000000000123");
        assert_eq!(normalize_identifier("123.0"), "0000000000123");
        assert_eq!(normalize_identifier(&123.0_f64.to_string()), "0000000000123");
        assert_eq!(normalize_identifier("1.23E+2"), "0000000000123");
    }

    #[test]
    fn blanks_are_empty() {
        assert_eq!(normalize_identifier(""), "");
        assert_eq!(normalize_identifier("   "), "");
        assert_eq!(normalize_identifier("NaN"), "");
    }
}
