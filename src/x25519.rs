// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! X25519 Diffie-Hellman key exchange, with the NaCl convention of
//! hashing every shared secret through HSalsa20 before use.
//!
//! The raw ladder output \\(u(abB)\\) is a group element with visible
//! algebraic structure; NaCl's `crypto_box` derives its symmetric key
//! as \\(\mathrm{HSalsa20}(u, 0\^{16})\\) instead, and this crate's
//! [`SharedSecret`] carries that hashed form.  The unhashed ladder is
//! still reachable through the [`x25519`] function for protocols that
//! do their own key derivation.

use core::fmt::Debug;

use rand_core::CryptoRngCore;
use salsa20::cipher::generic_array::{typenum::U10, GenericArray};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::montgomery::MontgomeryPoint;

/// The X25519 basepoint, \\(u = 9\\), for use with the bare
/// [`x25519`] function.
pub const X25519_BASEPOINT_BYTES: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0,
];

/// Bare X25519: the \\(u\\)-coordinate scalar multiplication from
/// RFC 7748, with no output hashing.
pub fn x25519(k: [u8; 32], u: [u8; 32]) -> [u8; 32] {
    MontgomeryPoint(u).mul_clamped(k).to_bytes()
}

/// HSalsa20 with an all-zero 16-byte input, the NaCl shared-secret
/// finalization.
pub(crate) fn hash_shared_point(shared_point: &MontgomeryPoint) -> [u8; 32] {
    let key = GenericArray::from_slice(shared_point.as_bytes());
    salsa20::hsalsa::<U10>(key, &GenericArray::default()).into()
}

/// An X25519 public key, the \\(u\\)-coordinate of a point on the
/// Montgomery curve.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct PublicKey(pub(crate) MontgomeryPoint);

impl From<[u8; 32]> for PublicKey {
    /// Given a byte array, construct an X25519 `PublicKey`.
    fn from(bytes: [u8; 32]) -> PublicKey {
        PublicKey(MontgomeryPoint(bytes))
    }
}

impl From<&StaticSecret> for PublicKey {
    /// Derive this public key from its corresponding `StaticSecret`.
    fn from(secret: &StaticSecret) -> PublicKey {
        // Fixed-base mult on the Edwards curve plus the birational map
        // is faster than the ladder and lands on the same u.
        PublicKey(crate::edwards::EdwardsPoint::mul_base_clamped(secret.0).to_montgomery())
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({:?})", self.0)
    }
}

/// An X25519 private key.
///
/// The bytes are stored as given; clamping happens on use, so
/// `to_bytes` returns exactly what the key was built from.
#[derive(Clone)]
pub struct StaticSecret(pub(crate) [u8; 32]);

impl Zeroize for StaticSecret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for StaticSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for StaticSecret {}

impl From<[u8; 32]> for StaticSecret {
    /// Load a secret key from a byte array.
    fn from(bytes: [u8; 32]) -> StaticSecret {
        StaticSecret(bytes)
    }
}

impl StaticSecret {
    /// Generate a new key from a cryptographically secure RNG.
    pub fn random_from_rng<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        StaticSecret(bytes)
    }

    /// Perform a Diffie-Hellman exchange to agree on a
    /// [`SharedSecret`] with the other party's public key.
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret::from_raw_shared_point(their_public.0.mul_clamped(self.0))
    }

    /// Extract this key's bytes for serialization.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this key's bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Debug for StaticSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // never print key material
        f.debug_struct("StaticSecret").finish_non_exhaustive()
    }
}

/// The result of a Diffie-Hellman exchange: the HSalsa20 hash of the
/// raw shared point, ready for use as a symmetric key.
pub struct SharedSecret([u8; 32]);

impl Zeroize for SharedSecret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SharedSecret {}

impl SharedSecret {
    pub(crate) fn from_raw_shared_point(mut shared_point: MontgomeryPoint) -> SharedSecret {
        let secret = SharedSecret(hash_shared_point(&shared_point));
        shared_point.zeroize();
        secret
    }

    /// Convert this shared secret to a byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this shared secret as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::X25519_BASEPOINT;
    use crate::scalar::clamp_integer;

    #[test]
    fn public_key_derivation_matches_bare_ladder() {
        let secret = StaticSecret::from([0x99u8; 32]);
        let public = PublicKey::from(&secret);
        assert_eq!(
            public.to_bytes(),
            x25519(secret.to_bytes(), X25519_BASEPOINT_BYTES)
        );
    }

    #[test]
    fn basepoint_constants_agree() {
        assert_eq!(X25519_BASEPOINT.to_bytes(), X25519_BASEPOINT_BYTES);
    }

    #[test]
    fn clamping_happens_on_use_not_storage() {
        let raw = [0xffu8; 32];
        let secret = StaticSecret::from(raw);
        assert_eq!(secret.to_bytes(), raw);
        assert_eq!(
            PublicKey::from(&secret).to_bytes(),
            x25519(clamp_integer(raw), X25519_BASEPOINT_BYTES)
        );
    }
}
