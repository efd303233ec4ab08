// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Scalar multiplication on the Montgomery form of Curve25519.
//!
//! A point is represented by its \\(u\\)-coordinate alone, so the
//! group structure is only partially visible; what remains is exactly
//! the "pseudo-multiplication" X25519 needs, computed with the
//! Montgomery ladder.  The ladder processes one scalar bit per
//! iteration with a constant sequence of field operations and a
//! constant-time conditional swap, so its timing is independent of the
//! scalar.

#![allow(non_snake_case)]

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants::APLUS2_OVER_FOUR;
use crate::field::FieldElement;
use crate::scalar::clamp_integer;

/// The \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519, in little-endian bytes.
#[derive(Copy, Clone, Default, Hash)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for MontgomeryPoint {}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MontgomeryPoint: {:?}", &self.0)
    }
}

impl MontgomeryPoint {
    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Multiply this point by `clamp_integer(bytes)`.
    ///
    /// This is the X25519 scalar multiplication primitive.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> Self {
        self.mul_bits(&clamp_integer(bytes))
    }

    /// Montgomery ladder over the 255 significant bits of the scalar.
    ///
    /// The top bit of a clamped scalar is always clear, so starting at
    /// bit 254 loses nothing.
    fn mul_bits(&self, scalar_bytes: &[u8; 32]) -> MontgomeryPoint {
        // Algorithm 8 of Costello-Smith 2017.
        let affine_u = FieldElement::from_bytes(&self.0);
        let mut x0 = ProjectivePoint {
            U: FieldElement::ONE,
            W: FieldElement::ZERO,
        };
        let mut x1 = ProjectivePoint {
            U: affine_u,
            W: FieldElement::ONE,
        };

        let bit = |i: usize| -> u8 { (scalar_bytes[i >> 3] >> (i & 7)) & 1 };

        // Instead of swapping before and after each ladder step, swap
        // by the xor of the current and previous bits, then unswap
        // once at the end on bit 0.
        for i in (0..255).rev() {
            let choice = bit(i + 1) ^ bit(i);
            ProjectivePoint::conditional_swap(&mut x0, &mut x1, Choice::from(choice));
            differential_add_and_double(&mut x0, &mut x1, &affine_u);
        }
        ProjectivePoint::conditional_swap(&mut x0, &mut x1, Choice::from(bit(0)));

        x0.as_affine()
    }
}

/// A point on the projective line \\(\mathbb P\^1(\mathbb F\_p)\\),
/// the \\(u\\)-coordinate \\(u = U / W\\) with denominator retained.
#[derive(Copy, Clone, Debug)]
struct ProjectivePoint {
    U: FieldElement,
    W: FieldElement,
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            U: FieldElement::conditional_select(&a.U, &b.U, choice),
            W: FieldElement::conditional_select(&a.W, &b.W, choice),
        }
    }

    fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        FieldElement::conditional_swap(&mut a.U, &mut b.U, choice);
        FieldElement::conditional_swap(&mut a.W, &mut b.W, choice);
    }
}

impl ProjectivePoint {
    /// Dehomogenize this point to affine coordinates.
    ///
    /// The point at infinity has \\(W = 0\\); `invert` maps it to
    /// \\(u = 0\\), the conventional X25519 encoding.
    fn as_affine(&self) -> MontgomeryPoint {
        let u = &self.U * &self.W.invert();
        MontgomeryPoint(u.as_bytes())
    }
}

/// Perform the double-and-add step of the Montgomery ladder.
///
/// Given projective points \\(P = [U\_P : W\_P]\\),
/// \\(Q = [U\_Q : W\_Q]\\) and the affine difference
/// \\(u\_{P-Q}\\), compute \\((2P, P + Q)\\) into `(P, Q)` in place.
#[rustfmt::skip] // keep the step sequence readable
fn differential_add_and_double(
    P: &mut ProjectivePoint,
    Q: &mut ProjectivePoint,
    affine_PmQ: &FieldElement,
) {
    let t0 = &P.U + &P.W;
    let t1 = &P.U - &P.W;
    let t2 = &Q.U + &Q.W;
    let t3 = &Q.U - &Q.W;

    let t4 = t0.square();       // (U_P + W_P)^2 = U_P^2 + 2 U_P W_P + W_P^2
    let t5 = t1.square();       // (U_P - W_P)^2 = U_P^2 - 2 U_P W_P + W_P^2

    let t6 = &t4 - &t5;         // 4 U_P W_P

    let t7 = &t0 * &t3;         // (U_P + W_P) (U_Q - W_Q)
    let t8 = &t1 * &t2;         // (U_P - W_P) (U_Q + W_Q)

    let t9  = &t7 + &t8;        // 2 (U_P U_Q - W_P W_Q)
    let t10 = &t7 - &t8;        // 2 (W_P U_Q - U_P W_Q)

    let t11 =  t9.square();     // 4 (U_P U_Q - W_P W_Q)^2
    let t12 = t10.square();     // 4 (W_P U_Q - U_P W_Q)^2

    let t13 = &APLUS2_OVER_FOUR * &t6; // (A + 2) U_P W_P

    let t14 = &t4 * &t5;        // ((U_P + W_P)(U_P - W_P))^2
    let t15 = &t13 + &t5;       // (U_P - W_P)^2 + (A + 2) U_P W_P

    let t16 = &t6 * &t15;       // 4 (U_P W_P) ((U_P - W_P)^2 + (A + 2) U_P W_P)

    let t17 = affine_PmQ * &t12; // U_D * 4 (W_P U_Q - U_P W_Q)^2
    let t18 = t11;               // W_D * 4 (U_P U_Q - W_P W_Q)^2

    P.U = t14;  // U_{P'} = (U_P + W_P)^2 (U_P - W_P)^2
    P.W = t16;  // W_{P'} = 4 U_P W_P ((U_P - W_P)^2 + (A + 2) U_P W_P)
    Q.U = t18;  // U_{Q'} = W_D * 4 (U_P U_Q - W_P W_Q)^2
    Q.W = t17;  // W_{Q'} = U_D * 4 (W_P U_Q - U_P W_Q)^2
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    /// RFC 7748 test vector: scalar, input u, expected output u.
    const RFC7748_SCALAR: [u8; 32] = [
        0xa5, 0x46, 0xe3, 0x6b, 0xf0, 0x52, 0x7c, 0x9d, 0x3b, 0x16, 0x15, 0x4b, 0x82, 0x46, 0x5e,
        0xdd, 0x62, 0x14, 0x4c, 0x0a, 0xc1, 0xfc, 0x5a, 0x18, 0x50, 0x6a, 0x22, 0x44, 0xba, 0x44,
        0x9a, 0xc4,
    ];
    const RFC7748_INPUT_U: [u8; 32] = [
        0xe6, 0xdb, 0x68, 0x67, 0x58, 0x30, 0x30, 0xdb, 0x35, 0x94, 0xc1, 0xa4, 0x24, 0xb1, 0x5f,
        0x7c, 0x72, 0x66, 0x24, 0xec, 0x26, 0xb3, 0x35, 0x3b, 0x10, 0xa9, 0x03, 0xa6, 0xd0, 0xab,
        0x1c, 0x4c,
    ];
    const RFC7748_OUTPUT_U: [u8; 32] = [
        0xc3, 0xda, 0x55, 0x37, 0x9d, 0xe9, 0xc6, 0x90, 0x8e, 0x94, 0xea, 0x4d, 0xf2, 0x8d, 0x08,
        0x4f, 0x32, 0xec, 0xcf, 0x03, 0x49, 0x1c, 0x71, 0xf7, 0x54, 0xb4, 0x07, 0x55, 0x77, 0xa2,
        0x85, 0x52,
    ];

    #[test]
    fn rfc7748_ladder_vector() {
        let u = MontgomeryPoint(RFC7748_INPUT_U);
        assert_eq!(u.mul_clamped(RFC7748_SCALAR).to_bytes(), RFC7748_OUTPUT_U);
    }

    #[test]
    fn ladder_matches_edwards_fixed_base() {
        let scalar_bytes = RFC7748_SCALAR;
        let from_ladder = constants::X25519_BASEPOINT.mul_clamped(scalar_bytes);
        let from_edwards =
            crate::edwards::EdwardsPoint::mul_base_clamped(scalar_bytes).to_montgomery();
        assert_eq!(from_ladder, from_edwards);
    }

    #[test]
    fn ladder_on_zero_input_stays_zero() {
        // u = 0 is a 2-torsion u-coordinate; clamped multiples land
        // back on the point at infinity or u = 0, both encoded as 0.
        let zero = MontgomeryPoint([0u8; 32]);
        assert_eq!(zero.mul_clamped(RFC7748_SCALAR), zero);
    }
}
