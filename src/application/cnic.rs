use crate::domain::error::SignAidError;

pub const CNIC_DIGITS: usize = 13;
pub const CNIC_ERROR: &str = "CNIC must be 13 digits (xxxxx-xxxxxxx-x)";

/// Digits of the input, nothing else
pub fn raw_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format as the user types: `12345-6789012-3`
///
/// Non-digits are dropped and anything past 13 digits is cut off, so partial
/// input formats progressively (`12345-67`).
pub fn format_cnic(input: &str) -> String {
    let digits: String = raw_digits(input).chars().take(CNIC_DIGITS).collect();

    let mut formatted = String::with_capacity(15);
    for (i, c) in digits.chars().enumerate() {
        if i == 5 || i == 12 {
            formatted.push('-');
        }
        formatted.push(c);
    }
    formatted
}

pub fn is_valid_cnic(input: &str) -> bool {
    raw_digits(input).len() == CNIC_DIGITS
}

/// Formatted CNIC, or a validation error when it is not exactly 13 digits
pub fn validate_cnic(input: &str) -> Result<String, SignAidError> {
    if is_valid_cnic(input) {
        Ok(format_cnic(input))
    } else {
        Err(SignAidError::Validation(CNIC_ERROR.to_string()))
    }
}
