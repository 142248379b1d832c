use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("rate must be finite, got {0}")]
    NonFinite(f64),

    #[error("rate must not be negative, got {0}")]
    Negative(f64),
}

/// Parse a user-supplied price rate: a finite, non-negative number
pub fn parse_rate(input: &str) -> Result<f64, RateError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| RateError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(RateError::NonFinite(value));
    }
    if value < 0.0 {
        return Err(RateError::Negative(value));
    }
    // "-0" parses to negative zero, which would print as "-0.00"
    Ok(value + 0.0)
}
