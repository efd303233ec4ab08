// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! Elements are represented in radix \\(2\^{51}\\) as five `u64` limbs,
//! with 128-bit intermediate products.  Limbs are allowed to grow up to
//! \\(2\^{54}\\) between weak reductions, so additions and subtractions
//! are cheap and multiplication inputs never overflow the accumulator.
//!
//! The encoding step ([`FieldElement::as_bytes`]) always produces the
//! canonical representative in \\([0, p)\\); everything downstream (point
//! compression, signature checks) relies on that.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// An element of the field \\(\mathbb Z / (2\^{255} - 19)\\).
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [u64; 5]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality by comparing canonical encodings.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.as_bytes().ct_eq(&other.as_bytes())
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }

    fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        u64::conditional_swap(&mut a.0[0], &mut b.0[0], choice);
        u64::conditional_swap(&mut a.0[1], &mut b.0[1], choice);
        u64::conditional_swap(&mut a.0[2], &mut b.0[2], choice);
        u64::conditional_swap(&mut a.0[3], &mut b.0[3], choice);
        u64::conditional_swap(&mut a.0[4], &mut b.0[4], choice);
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        self.0[0].conditional_assign(&other.0[0], choice);
        self.0[1].conditional_assign(&other.0[1], choice);
        self.0[2].conditional_assign(&other.0[2], choice);
        self.0[3].conditional_assign(&other.0[3], choice);
        self.0[4].conditional_assign(&other.0[4], choice);
    }
}

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        for i in 0..5 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        *self = &*self - rhs;
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // To avoid underflow, first add a multiple of p: 16*p is larger
        // than any limb bounded by 2^54.
        //   36028797018963664 = 16 * (2^51 - 19)
        //   36028797018963952 = 16 * (2^51 - 1)
        FieldElement::reduce([
            (self.0[0] + 36028797018963664u64) - rhs.0[0],
            (self.0[1] + 36028797018963952u64) - rhs.0[1],
            (self.0[2] + 36028797018963952u64) - rhs.0[2],
            (self.0[3] + 36028797018963952u64) - rhs.0[3],
            (self.0[4] + 36028797018963952u64) - rhs.0[4],
        ])
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        FieldElement::reduce([
            36028797018963664u64 - self.0[0],
            36028797018963952u64 - self.0[1],
            36028797018963952u64 - self.0[2],
            36028797018963952u64 - self.0[3],
            36028797018963952u64 - self.0[4],
        ])
    }
}

/// Multiply two 64-bit limbs with a 128-bit product.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        *self = &*self * rhs;
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    #[rustfmt::skip] // keep alignment of c* calculations
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        // Inputs are bounded as a[i], b[i] < 2^54, so the precomputed
        // 19*b[i] terms fit a u64 and each 128-bit accumulator stays
        // below 2^115.
        let a: &[u64; 5] = &self.0;
        let b: &[u64; 5] = &rhs.0;

        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let     c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1])  + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1])  + m(a[0], b[2])  + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1])  + m(a[1], b[2])  + m(a[0], b[3])  + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1])  + m(a[2], b[2])  + m(a[1], b[3])  + m(a[0], b[4]);

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));
        debug_assert!(b.iter().all(|&x| x < (1 << 54)));

        // Casting carries to u64 and back tells the compiler the
        // addition is u128 + u64 rather than u128 + u128.
        let mut out = [0u64; 5];

        c1 += ((c0 >> 51) as u64) as u128;
        out[0] = (c0 as u64) & LOW_51_BIT_MASK;

        c2 += ((c1 >> 51) as u64) as u128;
        out[1] = (c1 as u64) & LOW_51_BIT_MASK;

        c3 += ((c2 >> 51) as u64) as u128;
        out[2] = (c2 as u64) & LOW_51_BIT_MASK;

        c4 += ((c3 >> 51) as u64) as u128;
        out[3] = (c3 as u64) & LOW_51_BIT_MASK;

        let carry: u64 = (c4 >> 51) as u64;
        out[4] = (c4 as u64) & LOW_51_BIT_MASK;

        out[0] += carry * 19;

        // Now out[i] < 2^(51 + epsilon) for all i.
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }
}

impl FieldElement {
    pub(crate) const fn from_limbs(limbs: [u64; 5]) -> FieldElement {
        FieldElement(limbs)
    }

    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);

    /// Determine if this field element is negative, in the sense of the
    /// Ed25519 encoding: the low bit of the canonical encoding is set.
    pub(crate) fn is_negative(&self) -> Choice {
        let bytes = self.as_bytes();
        (bytes[0] & 1).into()
    }

    /// Given 64-bit input limbs, weakly reduce to enforce the bound
    /// limbs\[i\] < 2^52.
    #[inline(always)]
    fn reduce(mut limbs: [u64; 5]) -> FieldElement {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Load a `FieldElement` from the low 255 bits of a 256-bit input.
    ///
    /// The top bit is masked off; in the point encoding it carries the
    /// sign of `x`, not field data.  This does not check that the input
    /// was canonical; callers that need canonicity (point decompression)
    /// re-encode and compare.
    #[rustfmt::skip] // keep alignment of bit shifts
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        fn load8(input: &[u8], i: usize) -> u64 {
            u64::from_le_bytes(input[i..i + 8].try_into().unwrap())
        }

        FieldElement([
            // load bits [  0, 64), no shift
             load8(bytes,  0)        & LOW_51_BIT_MASK,
            // load bits [ 48,112), shift to [ 51,112)
            (load8(bytes,  6) >>  3) & LOW_51_BIT_MASK,
            // load bits [ 96,160), shift to [102,160)
            (load8(bytes, 12) >>  6) & LOW_51_BIT_MASK,
            // load bits [152,216), shift to [153,216)
            (load8(bytes, 19) >>  1) & LOW_51_BIT_MASK,
            // load bits [192,256), shift to [204,256)
            (load8(bytes, 24) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Serialize to 32 bytes.  The output is the canonical little-endian
    /// encoding of the fully reduced representative in \\([0, p)\\).
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub fn as_bytes(&self) -> [u8; 32] {
        // Write h = pq + r with 0 <= r < p.  After a weak reduction
        // h < 2*p, so q is 0 or 1, and h >= p <==> h + 19 >= 2^255,
        // i.e. q is the carry bit of h + 19.
        let mut limbs = FieldElement::reduce(self.0).0;

        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // r = h - pq = h + 19q - 2^255q
        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        // Discarding the final carry subtracts 2^255 q.
        limbs[4] &= LOW_51_BIT_MASK;

        let mut s = [0u8; 32];
        s[0]  =   limbs[0]                           as u8;
        s[1]  =  (limbs[0] >>  8)                    as u8;
        s[2]  =  (limbs[0] >> 16)                    as u8;
        s[3]  =  (limbs[0] >> 24)                    as u8;
        s[4]  =  (limbs[0] >> 32)                    as u8;
        s[5]  =  (limbs[0] >> 40)                    as u8;
        s[6]  = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[7]  =  (limbs[1] >>  5)                    as u8;
        s[8]  =  (limbs[1] >> 13)                    as u8;
        s[9]  =  (limbs[1] >> 21)                    as u8;
        s[10] =  (limbs[1] >> 29)                    as u8;
        s[11] =  (limbs[1] >> 37)                    as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] =  (limbs[2] >>  2)                    as u8;
        s[14] =  (limbs[2] >> 10)                    as u8;
        s[15] =  (limbs[2] >> 18)                    as u8;
        s[16] =  (limbs[2] >> 26)                    as u8;
        s[17] =  (limbs[2] >> 34)                    as u8;
        s[18] =  (limbs[2] >> 42)                    as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] =  (limbs[3] >>  7)                    as u8;
        s[21] =  (limbs[3] >> 15)                    as u8;
        s[22] =  (limbs[3] >> 23)                    as u8;
        s[23] =  (limbs[3] >> 31)                    as u8;
        s[24] =  (limbs[3] >> 39)                    as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] =  (limbs[4] >>  4)                    as u8;
        s[27] =  (limbs[4] >> 12)                    as u8;
        s[28] =  (limbs[4] >> 20)                    as u8;
        s[29] =  (limbs[4] >> 28)                    as u8;
        s[30] =  (limbs[4] >> 36)                    as u8;
        s[31] =  (limbs[4] >> 44)                    as u8;

        debug_assert!(s[31] & 0b1000_0000 == 0);

        s
    }

    /// Compute `self^(2^k)` by `k` successive squarings, `k > 0`.
    #[rustfmt::skip] // keep alignment of c* calculations
    pub fn pow2k(&self, mut k: u32) -> FieldElement {
        debug_assert!(k > 0);

        let mut a: [u64; 5] = self.0;

        loop {
            let a3_19 = 19 * a[3];
            let a4_19 = 19 * a[4];

            let     c0: u128 = m(a[0], a[0])  + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
            let mut c1: u128 = m(a[3], a3_19) + 2 * (m(a[0], a[1])  + m(a[2], a4_19));
            let mut c2: u128 = m(a[1], a[1])  + 2 * (m(a[0], a[2])  + m(a[4], a3_19));
            let mut c3: u128 = m(a[4], a4_19) + 2 * (m(a[0], a[3])  + m(a[1], a[2]));
            let mut c4: u128 = m(a[2], a[2])  + 2 * (m(a[0], a[4])  + m(a[1], a[3]));

            c1 += ((c0 >> 51) as u64) as u128;
            a[0] = (c0 as u64) & LOW_51_BIT_MASK;

            c2 += ((c1 >> 51) as u64) as u128;
            a[1] = (c1 as u64) & LOW_51_BIT_MASK;

            c3 += ((c2 >> 51) as u64) as u128;
            a[2] = (c2 as u64) & LOW_51_BIT_MASK;

            c4 += ((c3 >> 51) as u64) as u128;
            a[3] = (c3 as u64) & LOW_51_BIT_MASK;

            let carry: u64 = (c4 >> 51) as u64;
            a[4] = (c4 as u64) & LOW_51_BIT_MASK;

            a[0] += carry * 19;

            a[1] += a[0] >> 51;
            a[0] &= LOW_51_BIT_MASK;

            k -= 1;
            if k == 0 {
                break;
            }
        }

        FieldElement(a)
    }

    /// The square of this field element.
    pub fn square(&self) -> FieldElement {
        self.pow2k(1)
    }

    /// Two times the square of this field element.
    pub fn square2(&self) -> FieldElement {
        let mut square = self.pow2k(1);
        for i in 0..5 {
            square.0[i] *= 2;
        }
        square
    }

    /// Compute `(self^(2^250 - 1), self^11)`, the shared prefix of the
    /// inversion and square-root addition chains.
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each t_i below is self raised to the power whose binary
        // expansion has ones exactly at the listed bit positions.
        let t0 = self.square();        // 1
        let t1 = t0.square().square(); // 3
        let t2 = self * &t1;           // 3,0
        let t3 = &t0 * &t2;            // 3,1,0
        let t4 = t3.square();          // 4,2,1
        let t5 = &t2 * &t4;            // 4,3,2,1,0
        let t6 = t5.pow2k(5);          // 9,8,7,6,5
        let t7 = &t6 * &t5;            // 9..0
        let t8 = t7.pow2k(10);         // 19..10
        let t9 = &t8 * &t7;            // 19..0
        let t10 = t9.pow2k(20);        // 39..20
        let t11 = &t10 * &t9;          // 39..0
        let t12 = t11.pow2k(10);       // 49..10
        let t13 = &t12 * &t7;          // 49..0
        let t14 = t13.pow2k(50);       // 99..50
        let t15 = &t14 * &t13;         // 99..0
        let t16 = t15.pow2k(100);      // 199..100
        let t17 = &t16 * &t15;         // 199..0
        let t18 = t17.pow2k(50);       // 249..50
        let t19 = &t18 * &t13;         // 249..0

        (t19, t3)
    }

    /// Compute the multiplicative inverse `self^(p-2)` via a fixed
    /// addition chain (254 squarings, 11 multiplications).
    ///
    /// Zero has no inverse; this maps zero to zero, which is exactly
    /// what the Montgomery-u conversion needs at the identity.
    pub fn invert(&self) -> FieldElement {
        // p - 2 has ones at bit positions 254..5, 3, 1, 0
        let (t19, t3) = self.pow22501();
        let t20 = t19.pow2k(5);
        &t20 * &t3
    }

    /// Raise this field element to the power `(p-5)/8 = 2^252 - 3`,
    /// used in fractional square root extraction.
    fn pow_p58(&self) -> FieldElement {
        let (t19, _) = self.pow22501();
        let t20 = t19.pow2k(2);
        self * &t20
    }

    /// Compute \\(\sqrt{u/v}\\), choosing the nonnegative root.
    ///
    /// Returns `(Choice(1), +sqrt(u/v))` if `u/v` is square (or `u` is
    /// zero), and `(Choice(0), +sqrt(i*u/v))` otherwise.  The failure
    /// case is what point decompression uses to reject encodings with
    /// no corresponding x-coordinate.
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // r = (u * v^3) * (u * v^7)^((p-5)/8) is a candidate root of
        // u/v, possibly off by a factor of sqrt(-1).
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let neg_u = -u;
        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&neg_u);
        let flipped_sign_sqrt_i = check.ct_eq(&(&neg_u * &constants::SQRT_M1));

        let r_prime = &constants::SQRT_M1 * &r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Choose the nonnegative square root.
        let r_is_negative = r.is_negative();
        let neg_r = -&r;
        r.conditional_assign(&neg_r, r_is_negative);

        (correct_sign_sqrt | flipped_sign_sqrt, r)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// The basepoint y-coordinate, 4/5 mod p.
    const FOUR_FIFTHS: [u8; 32] = [
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ];

    #[test]
    fn bytes_roundtrip() {
        let a = FieldElement::from_bytes(&FOUR_FIFTHS);
        assert_eq!(a.as_bytes(), FOUR_FIFTHS);
    }

    #[test]
    fn from_bytes_masks_high_bit() {
        let mut all_ones = [0xffu8; 32];
        let a = FieldElement::from_bytes(&all_ones);
        all_ones[31] = 0x7f;
        let b = FieldElement::from_bytes(&all_ones);
        assert_eq!(a, b);
    }

    #[test]
    fn encode_is_canonical() {
        // 2^255 - 18 is a non-canonical encoding of 1.
        let mut non_canonical = [0xffu8; 32];
        non_canonical[0] = 0xee;
        non_canonical[31] = 0x7f;
        let one = FieldElement::from_bytes(&non_canonical);
        assert_eq!(one.as_bytes(), FieldElement::ONE.as_bytes());
    }

    #[test]
    fn mul_vs_square() {
        let a = FieldElement::from_bytes(&FOUR_FIFTHS);
        assert_eq!((&a * &a).as_bytes(), a.square().as_bytes());
    }

    #[test]
    fn invert_roundtrips() {
        let a = FieldElement::from_bytes(&FOUR_FIFTHS);
        let ainv = a.invert();
        assert_eq!((&a * &ainv).as_bytes(), FieldElement::ONE.as_bytes());
    }

    #[test]
    fn invert_of_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.invert().as_bytes(), [0u8; 32]);
    }

    #[test]
    fn sub_and_neg_agree() {
        let a = FieldElement::from_bytes(&FOUR_FIFTHS);
        let lhs = &FieldElement::ZERO - &a;
        assert_eq!(lhs.as_bytes(), (-&a).as_bytes());
    }

    #[test]
    fn sqrt_ratio_of_four_is_two() {
        let four = &(&FieldElement::ONE + &FieldElement::ONE)
            + &(&FieldElement::ONE + &FieldElement::ONE);
        let (was_square, r) = FieldElement::sqrt_ratio_i(&four, &FieldElement::ONE);
        assert!(bool::from(was_square));
        assert_eq!(r.square().as_bytes(), four.as_bytes());
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        let minus_one = -&FieldElement::ONE;
        assert_eq!(constants::SQRT_M1.square().as_bytes(), minus_one.as_bytes());
    }
}
