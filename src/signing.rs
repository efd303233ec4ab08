// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Ed25519 secret keys and signing.

use core::fmt::Debug;

use rand_core::CryptoRngCore;
use sha2::{Digest, Sha512};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::edwards::EdwardsPoint;
use crate::errors::SignatureError;
use crate::scalar::{clamp_integer, Scalar};
use crate::signature::Signature;
use crate::verifying::VerifyingKey;
use crate::x25519::SharedSecret;

/// The length of an ed25519 secret key (seed), in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an expanded secret key, in bytes.
pub const EXPANDED_SECRET_KEY_LENGTH: usize = 64;

/// An ed25519 seed, from which keys are derived.
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// An ed25519 signing key: the 32-byte seed together with the derived
/// verifying key.
#[derive(Clone)]
pub struct SigningKey {
    /// The seed, from which everything else is derived.
    pub(crate) secret_key: SecretKey,
    /// The corresponding public key.
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive() // avoids printing the secret
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_key.ct_eq(&other.secret_key)
    }
}

impl Eq for SigningKey {}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl From<&SecretKey> for SigningKey {
    fn from(secret: &SecretKey) -> Self {
        SigningKey::from_bytes(secret)
    }
}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl SigningKey {
    /// Derive a signing key from a 32-byte seed.
    pub fn from_bytes(secret_key: &SecretKey) -> Self {
        let verifying_key = ExpandedSecretKey::from(secret_key).verifying_key();
        Self {
            secret_key: *secret_key,
            verifying_key,
        }
    }

    /// Convert this signing key to its seed bytes.
    pub fn to_bytes(&self) -> SecretKey {
        self.secret_key
    }

    /// View this signing key as its seed bytes.
    pub fn as_bytes(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Generate a signing key from a cryptographically secure RNG.
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> SigningKey {
        let mut secret = SecretKey::default();
        csprng.fill_bytes(&mut secret);
        let signing_key = SigningKey::from_bytes(&secret);
        secret.zeroize();
        signing_key
    }

    /// The verifying key corresponding to this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign a message with this key, deterministically.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded: ExpandedSecretKey = (&self.secret_key).into();
        expanded.raw_sign(message, &self.verifying_key)
    }

    /// Verify a signature on a message with this key's public half.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.verifying_key.verify(message, signature)
    }

    /// Perform a Diffie-Hellman exchange between this Ed25519 key and
    /// another party's Ed25519 public key, by mapping both to the
    /// Montgomery curve.
    ///
    /// The result is finalized with HSalsa20 like
    /// [`crate::x25519::StaticSecret::diffie_hellman`], but the keys
    /// involved are signing keys, not X25519 keys.  This construction
    /// is experimental and has seen little scrutiny; prefer separate
    /// X25519 keys.
    #[deprecated(note = "experimental; needs more testing. Prefer dedicated X25519 keys.")]
    pub fn key_exchange(&self, their_public: &VerifyingKey) -> SharedSecret {
        let expanded: ExpandedSecretKey = (&self.secret_key).into();
        expanded.key_exchange(their_public)
    }
}

/// An expanded secret key: the clamped signing scalar and the hash
/// prefix used to derive per-message nonces, as produced by hashing a
/// seed with SHA-512.
///
/// This is the form in which the secret material is actually used;
/// some callers store it directly instead of the seed.
pub struct ExpandedSecretKey {
    /// The clamped scalar as raw (unreduced) little-endian bytes.
    pub(crate) scalar_bytes: [u8; 32],
    /// The same value reduced mod \\( \ell \\), for response-scalar
    /// arithmetic.
    pub(crate) scalar: Scalar,
    /// The domain separator for the per-message nonce.
    pub(crate) hash_prefix: [u8; 32],
}

impl Zeroize for ExpandedSecretKey {
    fn zeroize(&mut self) {
        self.scalar_bytes.zeroize();
        self.scalar.zeroize();
        self.hash_prefix.zeroize();
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for ExpandedSecretKey {}

impl From<&SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &SecretKey) -> ExpandedSecretKey {
        let mut hash: [u8; 64] = Sha512::digest(secret_key).into();
        let expanded = ExpandedSecretKey::from_bytes_clamping(&hash);
        hash.zeroize();
        expanded
    }
}

impl ExpandedSecretKey {
    fn from_bytes_clamping(bytes: &[u8; 64]) -> ExpandedSecretKey {
        let mut lower: [u8; 32] = bytes[..32].try_into().unwrap();
        let mut upper: [u8; 32] = bytes[32..].try_into().unwrap();
        lower = clamp_integer(lower);

        let expanded = ExpandedSecretKey {
            scalar_bytes: lower,
            scalar: Scalar::from_bytes_mod_order(lower),
            hash_prefix: upper,
        };
        lower.zeroize();
        upper.zeroize();
        expanded
    }

    /// Reconstruct an expanded secret key from its 64-byte form, the
    /// clamped scalar followed by the hash prefix.
    ///
    /// The scalar half is re-clamped, so any 64 bytes produce a usable
    /// key, but only the output of [`ExpandedSecretKey::to_bytes`]
    /// round-trips.
    pub fn from_bytes(bytes: &[u8; EXPANDED_SECRET_KEY_LENGTH]) -> ExpandedSecretKey {
        Self::from_bytes_clamping(bytes)
    }

    /// Serialize to 64 bytes, the clamped scalar followed by the hash
    /// prefix.
    pub fn to_bytes(&self) -> [u8; EXPANDED_SECRET_KEY_LENGTH] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.scalar_bytes);
        bytes[32..].copy_from_slice(&self.hash_prefix);
        bytes
    }

    /// The verifying key determined by this expanded key.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = EdwardsPoint::mul_base(&self.scalar);
        VerifyingKey {
            compressed: point.compress(),
            point,
        }
    }

    /// The Ed25519 signing equation, given the public key matching
    /// this secret key.
    pub(crate) fn raw_sign(&self, message: &[u8], verifying_key: &VerifyingKey) -> Signature {
        let mut h = Sha512::new();
        h.update(self.hash_prefix);
        h.update(message);
        let r = Scalar::from_bytes_mod_order_wide(&h.finalize().into());

        let R = EdwardsPoint::mul_base(&r).compress();

        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(verifying_key.as_bytes());
        h.update(message);
        let k = Scalar::from_bytes_mod_order_wide(&h.finalize().into());

        let s = &(&k * &self.scalar) + &r;

        Signature::from_parts(R, s)
    }

    /// Edwards-keyed Diffie-Hellman: ladder the other party's mapped
    /// public key with this key's signing scalar, then finalize with
    /// HSalsa20.  See [`SigningKey::key_exchange`] for caveats.
    pub fn key_exchange(&self, their_public: &VerifyingKey) -> SharedSecret {
        // The signing scalar is already clamped, so the ladder treats
        // it exactly as an X25519 private key.
        let shared_point = their_public.to_montgomery().mul_clamped(self.scalar_bytes);
        SharedSecret::from_raw_shared_point(shared_point)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expanded_key_roundtrip() {
        let seed = [0x42u8; 32];
        let expanded = ExpandedSecretKey::from(&seed);
        let again = ExpandedSecretKey::from_bytes(&expanded.to_bytes());
        assert_eq!(expanded.to_bytes(), again.to_bytes());
        assert_eq!(
            expanded.verifying_key().to_bytes(),
            again.verifying_key().to_bytes()
        );
    }

    #[test]
    fn signing_key_exposes_seed() {
        let seed = [0x17u8; 32];
        let key = SigningKey::from_bytes(&seed);
        assert_eq!(key.to_bytes(), seed);
        assert_eq!(key.as_bytes(), &seed);
    }
}
