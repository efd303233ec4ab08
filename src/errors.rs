// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Errors which may occur when parsing keys or signatures, or when
//! verifying signatures.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum InternalError {
    /// An error in the length of bytes handed to a constructor.
    BytesLength {
        /// Identifies the type returning the error
        name: &'static str,
        /// Length expected by the constructor
        length: usize,
    },
    /// Invalid point provided.
    PointDecompression,
    /// Invalid scalar provided.
    ScalarFormat,
    /// The verification equation wasn't satisfied.
    Verify,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::PointDecompression => write!(f, "Cannot decompress Edwards point"),
            InternalError::ScalarFormat => write!(f, "Cannot use scalar with high-bit set"),
            InternalError::Verify => write!(f, "Verification equation was not satisfied"),
        }
    }
}

impl std::error::Error for InternalError {}

/// Errors which may occur while processing signatures and keypairs.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing a point, from a public key or from the
///   `R` half of a signature.
///
/// * A problem with the format of `s`, a scalar: the high-order bits
///   were set or the encoding was not the canonical one below the
///   group order.
///
/// * Failure of a signature to satisfy the verification equation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SignatureError(pub(crate) InternalError);

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError(err)
    }
}
