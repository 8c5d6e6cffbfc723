//! Error types for the network engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the network engine
///
/// Capacity exhaustion during connection setup is deliberately NOT an error:
/// the connect/disconnect protocol reports it as a plain `bool` with no side
/// effects, and callers that ignore it simply drop the requested connection.
/// `CoreError` covers API misuse (unknown handles, invalid parameters) only.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Neuron handle does not resolve to a live neuron
    #[error("Neuron {neuron_id} not found")]
    NeuronNotFound {
        /// Raw neuron index that was not found
        neuron_id: u32,
    },

    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Network structure failed a consistency check
    #[error("Network topology error: {reason}")]
    NetworkTopology {
        /// Reason for topology error
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create a network topology error
    pub fn network_topology(reason: impl Into<String>) -> Self {
        Self::NetworkTopology {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CoreError::invalid_parameter("noise_probability", "1.5", "0.0..=1.0");
        assert!(matches!(err, CoreError::InvalidParameter { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::NeuronNotFound { neuron_id: 42 };
        let msg = format!("{}", err);
        assert!(msg.contains("Neuron 42 not found"));
    }
}
