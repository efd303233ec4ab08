// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Ed25519 public keys and signature verification.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use sha2::{Digest, Sha512};
use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::{InternalError, SignatureError};
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;
use crate::signature::Signature;

/// The length of an ed25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An ed25519 public key.
///
/// Holds both the compressed wire form and the decompressed
/// [`EdwardsPoint`], so the curve-membership check is paid once at
/// construction instead of on every verification.
#[derive(Copy, Clone)]
pub struct VerifyingKey {
    pub(crate) compressed: CompressedEdwardsY,
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?}), {:?})", self.compressed, self.point)
    }
}

impl ConstantTimeEq for VerifyingKey {
    fn ct_eq(&self, other: &VerifyingKey) -> Choice {
        self.compressed.ct_eq(&other.compressed)
    }
}

impl Eq for VerifyingKey {}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &VerifyingKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl Hash for VerifyingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<VerifyingKey, SignatureError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| InternalError::BytesLength {
                name: "VerifyingKey",
                length: PUBLIC_KEY_LENGTH,
            })?;
        VerifyingKey::from_bytes(bytes)
    }
}

impl VerifyingKey {
    /// View this public key as a byte array.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Convert this public key to a byte array.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// Construct a `VerifyingKey` from a slice of bytes.
    ///
    /// Fails if the bytes are not the canonical compressed encoding of
    /// a curve point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<VerifyingKey, SignatureError> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed
            .decompress()
            .ok_or(InternalError::PointDecompression)?;
        Ok(VerifyingKey { compressed, point })
    }

    /// Convert this public key to its birationally-equivalent
    /// Montgomery u-coordinate.
    ///
    /// This is the public-key half of the Edwards-keyed key exchange:
    /// the ladder in [`crate::signing::SigningKey::key_exchange`] runs
    /// on this point.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        self.point.to_montgomery()
    }

    /// Verify a signature on a message with this public key.
    ///
    /// The check is the strict one: `s` was already checked canonical
    /// at signature parse time, `R` must decompress (canonically), and
    /// the recomputed commitment must match `R` byte for byte.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        // Reject an R that is not a canonical point encoding before
        // doing the expensive double-base multiplication.
        if signature.R.decompress().is_none() {
            return Err(InternalError::Verify.into());
        }

        let mut h = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let k = Scalar::from_bytes_mod_order_wide(&h.finalize().into());

        // R' = sB - kA; with s = r + ka this recovers rB exactly when
        // the signature is valid.
        let minus_A = -self.point;
        let expected_R =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &signature.s);

        if expected_R.compress() == signature.R {
            Ok(())
        } else {
            Err(InternalError::Verify.into())
        }
    }
}
