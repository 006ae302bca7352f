//! Error types and validation functions for randomness auditing.
//!
//! Parameter problems (thresholds out of order, zero horizons, empty lag lists)
//! surface as [`AuditError`] at the call boundary. Insufficient or degenerate
//! data never raises an error: the affected result fields come back as `None`
//! so that the rest of an analysis batch keeps computing.

use thiserror::Error;

/// Error types for audit operations.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum AuditError {
    /// Insufficient data for the requested computation.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// Invalid parameter value for a test or the pattern engine.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Numerical computation error.
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for the numerical failure
        reason: String,
    },
}

/// Result type for audit operations.
///
/// Convenience alias for operations that may fail with [`AuditError`].
pub type AuditResult<T> = Result<T, AuditError>;

/// Validates that data has sufficient length for a computation.
///
/// # Returns
/// * `Ok(())` if data length is sufficient
/// * `Err(AuditError::InsufficientData)` otherwise
pub fn validate_data_length(data: &[f64], min_required: usize) -> AuditResult<()> {
    if data.len() < min_required {
        Err(AuditError::InsufficientData {
            required: min_required,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

/// Validates that a parameter is within inclusive bounds.
pub fn validate_parameter(value: f64, min: f64, max: f64, name: &str) -> AuditResult<()> {
    if value.is_nan() {
        return Err(AuditError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "must not be NaN".to_string(),
        });
    }
    if value < min || value > max {
        return Err(AuditError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("in [{}, {}]", min, max),
        });
    }
    Ok(())
}

/// Validates that an integer parameter is strictly positive.
pub fn validate_positive(value: usize, name: &str) -> AuditResult<()> {
    if value == 0 {
        return Err(AuditError::InvalidParameter {
            parameter: name.to_string(),
            value: 0.0,
            constraint: "must be > 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_data_length() {
        let data = vec![1.0, 2.0, 3.0];
        assert!(validate_data_length(&data, 2).is_ok());
        assert!(validate_data_length(&data, 3).is_ok());
        assert!(validate_data_length(&data, 4).is_err());
        assert!(validate_data_length(&[], 1).is_err());
        assert!(validate_data_length(&[], 0).is_ok());
    }

    #[test]
    fn test_validate_parameter() {
        assert!(validate_parameter(0.5, 0.0, 1.0, "p").is_ok());
        assert!(validate_parameter(1.5, 0.0, 1.0, "p").is_err());
        assert!(validate_parameter(f64::NAN, 0.0, 1.0, "p").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1, "k").is_ok());
        assert!(validate_positive(0, "k").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = AuditError::InsufficientData {
            required: 50,
            actual: 10,
        };
        assert!(err.to_string().contains("50"));
        assert!(err.to_string().contains("10"));
    }
}
