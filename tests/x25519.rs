//! X25519 integration tests: RFC 7748 known-answer vectors, the NaCl
//! HSalsa20 shared-secret finalization, and the Ed25519-keyed
//! exchange.

use hex_literal::hex;

use nacl25519::x25519::{x25519, X25519_BASEPOINT_BYTES};
use nacl25519::{PublicKey, SigningKey, StaticSecret};

#[test]
fn rfc7748_scalar_mult_vector() {
    let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let input_u = hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
    let output_u = hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");
    assert_eq!(x25519(scalar, input_u), output_u);
}

const ALICE_SECRET: [u8; 32] =
    hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
const ALICE_PUBLIC: [u8; 32] =
    hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
const BOB_SECRET: [u8; 32] =
    hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
const BOB_PUBLIC: [u8; 32] =
    hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");

/// The raw ladder output for the RFC 7748 Diffie-Hellman example.
const RAW_SHARED: [u8; 32] =
    hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");

/// HSalsa20(RAW_SHARED, 0^16): the NaCl `crypto_box_beforenm` vector.
const HASHED_SHARED: [u8; 32] =
    hex!("1b27556473e985d462cd51197a9a46c76009549eac6474f206c4ee0844f68389");

#[test]
fn rfc7748_public_key_derivation() {
    assert_eq!(x25519(ALICE_SECRET, X25519_BASEPOINT_BYTES), ALICE_PUBLIC);
    assert_eq!(x25519(BOB_SECRET, X25519_BASEPOINT_BYTES), BOB_PUBLIC);

    assert_eq!(
        PublicKey::from(&StaticSecret::from(ALICE_SECRET)).to_bytes(),
        ALICE_PUBLIC
    );
    assert_eq!(
        PublicKey::from(&StaticSecret::from(BOB_SECRET)).to_bytes(),
        BOB_PUBLIC
    );
}

#[test]
fn rfc7748_raw_shared_secret() {
    assert_eq!(x25519(ALICE_SECRET, BOB_PUBLIC), RAW_SHARED);
    assert_eq!(x25519(BOB_SECRET, ALICE_PUBLIC), RAW_SHARED);
}

#[test]
fn diffie_hellman_is_hashed_and_symmetric() {
    let alice = StaticSecret::from(ALICE_SECRET);
    let bob = StaticSecret::from(BOB_SECRET);

    let alice_shared = alice.diffie_hellman(&PublicKey::from(BOB_PUBLIC));
    let bob_shared = bob.diffie_hellman(&PublicKey::from(ALICE_PUBLIC));

    assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
    // Not the raw point: the HSalsa20 finalization must have run.
    assert_ne!(alice_shared.as_bytes(), &RAW_SHARED);
    assert_eq!(alice_shared.as_bytes(), &HASHED_SHARED);
}

#[test]
fn random_keys_agree() {
    let mut csprng = rand::rngs::OsRng;
    let alice = StaticSecret::random_from_rng(&mut csprng);
    let bob = StaticSecret::random_from_rng(&mut csprng);
    let alice_public = PublicKey::from(&alice);
    let bob_public = PublicKey::from(&bob);

    assert_eq!(
        alice.diffie_hellman(&bob_public).as_bytes(),
        bob.diffie_hellman(&alice_public).as_bytes()
    );
}

#[test]
#[allow(deprecated)]
fn ed25519_keyed_exchange_is_symmetric() {
    let alice = SigningKey::from_bytes(&hex!(
        "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"
    ));
    let bob = SigningKey::from_bytes(&hex!(
        "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"
    ));

    let alice_shared = alice.key_exchange(&bob.verifying_key());
    let bob_shared = bob.key_exchange(&alice.verifying_key());

    assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
    assert_eq!(
        alice_shared.as_bytes(),
        &hex!("c638ff46e22f012b34fd2768c6a9a7e30955fd3677d19f45ce97873f5cf2598f")
    );
}
