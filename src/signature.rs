// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! The Ed25519 signature wire format.

use core::fmt::Debug;

use crate::edwards::CompressedEdwardsY;
use crate::errors::{InternalError, SignatureError};
use crate::scalar::Scalar;

/// The length of an ed25519 `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An ed25519 signature: the compressed commitment point \\(R\\)
/// followed by the response scalar \\(s\\), 32 bytes each.
///
/// Parsing enforces that `s` is the canonical encoding of a scalar
/// below the group order, so a `Signature` that exists cannot be
/// malleated into a second valid encoding.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// The commitment \\(R = rB\\), where \\(r\\) is the per-message
    /// nonce derived from the secret hash prefix.
    pub(crate) R: CompressedEdwardsY,

    /// The response \\(s = r + k a \pmod \ell\\).
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    pub(crate) fn from_parts(R: CompressedEdwardsY, s: Scalar) -> Signature {
        Signature { R, s }
    }

    /// Convert this `Signature` to the 64-byte wire form `R ‖ s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.R.as_bytes());
        bytes[32..].copy_from_slice(self.s.as_bytes());
        bytes
    }

    /// The 32 bytes of the commitment point `R`.
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// The 32 bytes of the response scalar `s`.
    pub fn s_bytes(&self) -> &[u8; 32] {
        self.s.as_bytes()
    }

    /// Parse a `Signature` from its 64-byte wire form.
    ///
    /// Returns an error if the `s` half is not the canonical encoding
    /// of a scalar below the group order.  `R` is only checked during
    /// verification, since checking it requires curve arithmetic.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Signature, SignatureError> {
        let mut R_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        R_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);

        let s: Option<Scalar> = Scalar::from_canonical_bytes(s_bytes).into();
        match s {
            Some(s) => Ok(Signature {
                R: CompressedEdwardsY(R_bytes),
                s,
            }),
            None => Err(InternalError::ScalarFormat.into()),
        }
    }

    /// Parse a `Signature` from a byte slice, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Signature, SignatureError> {
        let bytes: &[u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| InternalError::BytesLength {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            })?;
        Signature::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Signature, SignatureError> {
        Signature::from_slice(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut bytes = [0u8; 64];
        bytes[0] = 1; // R = identity encoding
        bytes[32] = 7; // s = 7
        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.to_bytes(), bytes);
        assert_eq!(sig.r_bytes()[0], 1);
        assert_eq!(sig.s_bytes()[0], 7);
    }

    #[test]
    fn rejects_high_bit_s() {
        let mut bytes = [0u8; 64];
        bytes[63] = 0x80;
        assert!(Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn rejects_unreduced_s() {
        // s = L, the group order
        let mut bytes = [0u8; 64];
        bytes[32..].copy_from_slice(&[
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ]);
        assert!(Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn rejects_bad_length() {
        assert!(Signature::from_slice(&[0u8; 63]).is_err());
        assert!(Signature::from_slice(&[0u8; 65]).is_err());
    }
}
