// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Ed25519 signatures and X25519 key agreement over a shared
//! Curve25519 arithmetic core, following the NaCl conventions.
//!
//! # Signing
//!
//! ```
//! use nacl25519::{SigningKey, Signature};
//!
//! let signing_key = SigningKey::from_bytes(&[7u8; 32]);
//! let message = b"all along the watchtower";
//! let signature: Signature = signing_key.sign(message);
//!
//! assert!(signing_key
//!     .verifying_key()
//!     .verify(message, &signature)
//!     .is_ok());
//! ```
//!
//! # Key agreement
//!
//! ```
//! use nacl25519::{PublicKey, StaticSecret};
//!
//! let alice = StaticSecret::from([0x11u8; 32]);
//! let bob = StaticSecret::from([0x22u8; 32]);
//! let alice_public = PublicKey::from(&alice);
//! let bob_public = PublicKey::from(&bob);
//!
//! let alice_shared = alice.diffie_hellman(&bob_public);
//! let bob_shared = bob.diffie_hellman(&alice_public);
//! assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
//! ```
//!
//! Shared secrets are not the raw ladder output: they are hashed with
//! HSalsa20 under an all-zero input first, matching NaCl's
//! `crypto_box_beforenm`.  Protocols that need the bare RFC 7748
//! function can call [`x25519::x25519`].
//!
//! # Security notes
//!
//! All secret-dependent operations (scalar multiplication, table
//! lookups, swaps in the Montgomery ladder) run in constant time via
//! the `subtle` crate.  Secret key material is wiped on drop via
//! `zeroize`.  Signature verification is strict: non-canonical point
//! encodings and scalars at or above the group order are rejected, so
//! accepted signatures are not malleable.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]
// Curve coordinates are conventionally capitalized.
#![allow(non_snake_case)]

pub mod constants;
pub mod edwards;
pub mod montgomery;
pub mod scalar;
pub mod traits;
pub mod x25519;

mod curve_models;
mod field;
mod window;

mod errors;
mod signature;
mod signing;
mod verifying;

pub use crate::errors::SignatureError;
pub use crate::signature::{Signature, SIGNATURE_LENGTH};
pub use crate::signing::{
    ExpandedSecretKey, SecretKey, SigningKey, EXPANDED_SECRET_KEY_LENGTH, SECRET_KEY_LENGTH,
};
pub use crate::verifying::{VerifyingKey, PUBLIC_KEY_LENGTH};
pub use crate::x25519::{PublicKey, SharedSecret, StaticSecret};
