//! Error types for the QASM emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// An angle that cannot be written as a literal.
    #[error("Operation {index} ({gate}) has non-finite angle {angle}")]
    NonFiniteAngle {
        index: usize,
        gate: &'static str,
        angle: f64,
    },

    /// A parameterized operation without an angle.
    #[error("Operation {index} ({gate}) is missing its angle")]
    MissingAngle { index: usize, gate: &'static str },

    /// An operand outside the register.
    #[error("Operation {index} ({gate}) addresses qubit {qubit} of a {num_qubits}-qubit register")]
    QubitOutOfRange {
        index: usize,
        gate: &'static str,
        qubit: usize,
        num_qubits: usize,
    },
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
