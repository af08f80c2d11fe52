//! Error types.

use thiserror::Error;

/// Errors produced by EC JWK and ECDSA operations.
///
/// A signature which merely fails to verify is not an error: see
/// [`EcdsaAlgorithm::verify`](crate::ecdsa::EcdsaAlgorithm::verify).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Unknown JOSE curve identifier, or domain parameters which do not belong
    /// to a supported curve.
    #[error("{0}")]
    UnsupportedCurve(String),

    /// The key is of the wrong family, role or size for the requested
    /// operation, or its point does not lie on its curve.
    #[error("{0}")]
    InvalidKey(String),

    /// A required JWK parameter is missing or cannot be decoded.
    #[error("{0}")]
    MalformedKey(String),

    /// The signature is not a structurally valid ASN.1 DER or `R || S` value.
    #[error("invalid ECDSA signature format: {0}")]
    MalformedSignature(String),

    /// The crypto engine failed for a reason unrelated to the key or the
    /// signature encoding.
    #[error("unable to verify Elliptic Curve signature: {0}")]
    SignatureVerificationFailed(String),

    /// The crypto engine failed to produce a signature.
    #[error("unable to compute Elliptic Curve signature: {0}")]
    SigningFailed(String),

    /// An integer does not fit in the requested number of octets.
    #[error("integer requires {len} octets but only {max} are available")]
    EncodingOverflow {
        /// Minimal number of octets needed to represent the integer.
        len: usize,
        /// Number of octets available.
        max: usize,
    },

    /// The key factory could not build a native key from its components.
    #[error("unable to create EC key: {0}")]
    KeyConstruction(String),
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
