// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Arithmetic on scalars modulo the group order
//! \\(\ell = 2\^{252} + 27742317777372353535851937790883648493\\).
//!
//! The public [`Scalar`] type holds a canonical 32-byte little-endian
//! encoding of an integer in \\([0, \ell)\\).  Arithmetic unpacks into
//! [`Scalar52`], five `u64` limbs in radix \\(2\^{52}\\), and reduces
//! with Montgomery multiplication.  Every constructor except
//! `clamp_integer` produces a reduced scalar, so signing arithmetic can
//! assume its inputs are canonical.

use core::fmt::Debug;
use core::ops::Index;
use core::ops::{Add, Mul};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use zeroize::Zeroize;

/// The scalar \\( \ell \\), the order of the prime-order subgroup, in
/// radix-\\(2\^{52}\\) limbs.
const L: Scalar52 = Scalar52([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// `L` * `LFACTOR` = -1 (mod 2^52)
const LFACTOR: u64 = 0x51da312547e1b;

/// `R` = R % L where R = 2^260
const R: Scalar52 = Scalar52([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// `RR` = (R^2) % L where R = 2^260
const RR: Scalar52 = Scalar52([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

/// An integer modulo the group order, held as its canonical 32-byte
/// little-endian encoding.
#[derive(Copy, Clone, Default)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; 32];
        #[allow(clippy::needless_range_loop)]
        for i in 0..32 {
            bytes[i] = u8::conditional_select(&a.bytes[i], &b.bytes[i], choice);
        }
        Scalar { bytes }
    }
}

impl Index<usize> for Scalar {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar52::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'b Scalar) -> Scalar {
        // Both inputs are canonical, so the unpacked sum is < 2*L and a
        // single conditional subtraction reduces it.
        Scalar52::add(&self.unpack(), &rhs.unpack()).pack()
    }
}

impl Scalar {
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ],
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        // Pad to 512 bits and run the wide reduction, so the result is
        // canonical even when the input exceeds ell.
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&bytes);
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo \\( \ell \\).
    ///
    /// This is the reduction applied to every SHA-512 output in
    /// signing and verification.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        Scalar52::from_bytes_wide(input).pack()
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// Returns `None` if the input encodes an integer \\( \geq \ell \\).
    /// Signature parsing uses this to reject malleable `s` values.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<Scalar> {
        let high_bit_unset = (bytes[31] >> 7).ct_eq(&0);
        let candidate = Scalar { bytes };
        let reduced = Scalar::from_bytes_mod_order(bytes);
        CtOption::new(candidate, high_bit_unset & candidate.ct_eq(&reduced))
    }

    /// View this `Scalar` as a sequence of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its underlying sequence of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Unpack this `Scalar` to five 52-bit limbs.
    pub(crate) fn unpack(&self) -> Scalar52 {
        Scalar52::from_bytes(&self.bytes)
    }

    /// Write this scalar in radix 16, with coefficients in \\([-8, 8)\\).
    ///
    /// The scalar must be canonical; the top digit then absorbs the
    /// final carry without overflow, giving exactly 64 signed digits.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix: convert from radix 256 (bytes) to
        // radix 16 (nibbles), digits in [0, 16).
        #[allow(clippy::identity_op)]
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            (x >> 0) & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self[i]) as i8;
            output[2 * i + 1] = top_half(self[i]) as i8;
        }

        // Step 2: recenter coefficients from [0, 16) to [-8, 8).
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }

        output
    }

    /// Compute a width-\\(w\\) non-adjacent form of this scalar, for
    /// \\(2 \leq w \leq 8\\): 256 signed coefficients, each zero or odd
    /// with magnitude below \\(2\^{w-1}\\), no two nonzero coefficients
    /// within \\(w\\) positions of each other.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        debug_assert!(self[31] <= 127);
        debug_assert!((2..=8).contains(&w));

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        for i in 0..4 {
            x_u64[i] = u64::from_le_bytes(self.bytes[i * 8..(i + 1) * 8].try_into().unwrap());
        }

        let width = 1 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf: u64 = if bit_idx < 64 - w {
                // This window's bits are contained in a single u64.
                x_u64[u64_idx] >> bit_idx
            } else {
                // Combine the current u64's bits with bits from the
                // next u64.
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                // The window is not odd, so stepping one bit keeps the
                // sliding property intact.
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }
}

/// Clamp a 256-bit integer for use as a Curve25519 private scalar:
/// clear the low three bits, clear the top bit, set bit 254.
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// The `Scalar52` struct represents an element in
/// \\(\mathbb Z / \ell \mathbb Z\\) as five 52-bit limbs.
#[derive(Copy, Clone)]
pub(crate) struct Scalar52(pub [u64; 5]);

impl Debug for Scalar52 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar52: {:?}", &self.0[..])
    }
}

impl Zeroize for Scalar52 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Index<usize> for Scalar52 {
    type Output = u64;
    fn index(&self, index: usize) -> &u64 {
        &self.0[index]
    }
}

/// u64 * u64 = u128 multiply helper
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl Scalar52 {
    pub const ZERO: Scalar52 = Scalar52([0, 0, 0, 0, 0]);

    /// Unpack a 32 byte / 256 bit scalar into 5 52-bit limbs.
    pub fn from_bytes(bytes: &[u8; 32]) -> Scalar52 {
        let mut words = [0u64; 4];
        for i in 0..4 {
            words[i] = u64::from_le_bytes(bytes[i * 8..(i + 1) * 8].try_into().unwrap());
        }

        let mask = (1u64 << 52) - 1;
        let mut s = Scalar52::ZERO;

        s.0[0] = words[0] & mask;
        s.0[1] = ((words[0] >> 52) | (words[1] << 12)) & mask;
        s.0[2] = ((words[1] >> 40) | (words[2] << 24)) & mask;
        s.0[3] = ((words[2] >> 28) | (words[3] << 36)) & mask;
        s.0[4] = (words[3] >> 16) & mask;

        s
    }

    /// Reduce a 64 byte / 512 bit scalar mod `L`, by computing
    /// `lo * R + hi * R^2 = (lo + hi * 2^260) * R mod L` in Montgomery
    /// form and converting back.
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar52 {
        let mut words = [0u64; 8];
        for i in 0..8 {
            words[i] = u64::from_le_bytes(bytes[i * 8..(i + 1) * 8].try_into().unwrap());
        }

        let mask = (1u64 << 52) - 1;
        let mut lo = Scalar52::ZERO;
        let mut hi = Scalar52::ZERO;

        lo.0[0] = words[0] & mask;
        lo.0[1] = ((words[0] >> 52) | (words[1] << 12)) & mask;
        lo.0[2] = ((words[1] >> 40) | (words[2] << 24)) & mask;
        lo.0[3] = ((words[2] >> 28) | (words[3] << 36)) & mask;
        lo.0[4] = ((words[3] >> 16) | (words[4] << 48)) & mask;

        hi.0[0] = (words[4] >> 4) & mask;
        hi.0[1] = ((words[4] >> 56) | (words[5] << 8)) & mask;
        hi.0[2] = ((words[5] >> 44) | (words[6] << 20)) & mask;
        hi.0[3] = ((words[6] >> 32) | (words[7] << 32)) & mask;
        hi.0[4] = words[7] >> 20;

        lo = Scalar52::montgomery_mul(&lo, &R); // (lo * R) / R = lo
        hi = Scalar52::montgomery_mul(&hi, &RR); // (hi * R^2) / R = hi * R

        Scalar52::add(&hi, &lo)
    }

    /// Pack the limbs of this `Scalar52` into 32 bytes.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub fn as_bytes(&self) -> [u8; 32] {
        let mut s = [0u8; 32];

        s[0]  =  self.0[0]                      as u8;
        s[1]  = (self.0[0] >>  8)               as u8;
        s[2]  = (self.0[0] >> 16)               as u8;
        s[3]  = (self.0[0] >> 24)               as u8;
        s[4]  = (self.0[0] >> 32)               as u8;
        s[5]  = (self.0[0] >> 40)               as u8;
        s[6]  = ((self.0[0] >> 48) | (self.0[1] << 4)) as u8;
        s[7]  = (self.0[1] >>  4)               as u8;
        s[8]  = (self.0[1] >> 12)               as u8;
        s[9]  = (self.0[1] >> 20)               as u8;
        s[10] = (self.0[1] >> 28)               as u8;
        s[11] = (self.0[1] >> 36)               as u8;
        s[12] = (self.0[1] >> 44)               as u8;
        s[13] =  self.0[2]                      as u8;
        s[14] = (self.0[2] >>  8)               as u8;
        s[15] = (self.0[2] >> 16)               as u8;
        s[16] = (self.0[2] >> 24)               as u8;
        s[17] = (self.0[2] >> 32)               as u8;
        s[18] = (self.0[2] >> 40)               as u8;
        s[19] = ((self.0[2] >> 48) | (self.0[3] << 4)) as u8;
        s[20] = (self.0[3] >>  4)               as u8;
        s[21] = (self.0[3] >> 12)               as u8;
        s[22] = (self.0[3] >> 20)               as u8;
        s[23] = (self.0[3] >> 28)               as u8;
        s[24] = (self.0[3] >> 36)               as u8;
        s[25] = (self.0[3] >> 44)               as u8;
        s[26] =  self.0[4]                      as u8;
        s[27] = (self.0[4] >>  8)               as u8;
        s[28] = (self.0[4] >> 16)               as u8;
        s[29] = (self.0[4] >> 24)               as u8;
        s[30] = (self.0[4] >> 32)               as u8;
        s[31] = (self.0[4] >> 40)               as u8;

        s
    }

    /// Pack into the canonical `Scalar` byte representation.
    pub fn pack(&self) -> Scalar {
        Scalar {
            bytes: self.as_bytes(),
        }
    }

    /// Compute `a + b` (mod L), where both inputs are below `L`.
    pub fn add(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let mut sum = Scalar52::ZERO;
        let mask = (1u64 << 52) - 1;

        // a + b
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a[i] + b[i] + (carry >> 52);
            sum.0[i] = carry & mask;
        }

        // subtract L if the sum is >= L
        Scalar52::sub(&sum, &L)
    }

    /// Compute `a - b` (mod L), where both inputs are below `L`.
    pub fn sub(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let mut difference = Scalar52::ZERO;
        let mask = (1u64 << 52) - 1;

        // a - b
        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a[i].wrapping_sub(b[i] + (borrow >> 63));
            difference.0[i] = borrow & mask;
        }

        // conditionally add L if the difference is negative
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference[i] + (L[i] & underflow_mask);
            difference.0[i] = carry & mask;
        }

        difference
    }

    /// Compute `a * b` as the 9-limb 104-bit-coefficient product.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of z[*] calculations
    pub (crate) fn mul_internal(a: &Scalar52, b: &Scalar52) -> [u128; 9] {
        let mut z = [0u128; 9];

        z[0] = m(a[0], b[0]);
        z[1] = m(a[0], b[1]) + m(a[1], b[0]);
        z[2] = m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]);
        z[3] = m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]);
        z[4] = m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]);
        z[5] =                 m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]);
        z[6] =                                 m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]);
        z[7] =                                                 m(a[3], b[4]) + m(a[4], b[3]);
        z[8] =                                                                 m(a[4], b[4]);

        z
    }

    /// Compute `limbs/R` (mod L), where R is the Montgomery modulus 2^260.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of part1/part2 calls
    pub (crate) fn montgomery_reduce(limbs: &[u128; 9]) -> Scalar52 {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(LFACTOR) & ((1u64 << 52) - 1);
            ((sum + m(p, L[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & ((1u64 << 52) - 1);
            (sum >> 52, w)
        }

        // note: l[3] is zero, so its multiples can be skipped
        let l = &L;

        // the first half computes the Montgomery adjustment factor n,
        // and begins adding n*L to make limbs divisible by R
        let (carry, n0) = part1(        limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3]               + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4])               + m(n2, l[2]) + m(n3, l[1]));

        // limbs is divisible by R now, so we can divide by R by simply
        // storing the upper half as the result
        let (carry, r0) = part2(carry + limbs[5]               + m(n1, l[4])               + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6]                             + m(n2, l[4])               + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7]                                           + m(n3, l[4]));
        let (carry, r3) = part2(carry + limbs[8]                                                         + m(n4, l[4]));
        let         r4 = carry as u64;

        // result may be >= L, so attempt to subtract L
        Scalar52::sub(&Scalar52([r0, r1, r2, r3, r4]), l)
    }

    /// Compute `(a * b) / R` (mod L), where R is the Montgomery
    /// modulus 2^260.
    #[inline(never)]
    pub fn montgomery_mul(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        Scalar52::montgomery_reduce(&Scalar52::mul_internal(a, b))
    }

    /// Compute `a * b` (mod L).
    #[inline(never)]
    pub fn mul(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let ab = Scalar52::montgomery_mul(a, b); // (a * b) / R
        Scalar52::montgomery_mul(&ab, &RR) // (a * b) / R * R^2 / R = a * b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// x = 7237005577332262213973186563042994240801631723825162898930247062703686954002
    pub static X: Scalar52 = Scalar52([
        0x000d9ce5a30a2c12,
        0x000215d086329a7e,
        0x000fffffffeb2106,
        0x000fffffffffffff,
        0x00000fffffffffff,
    ]);

    /// y = 6145104759870991071742105800796537629880401874866217824609283457819451087098
    pub static Y: Scalar52 = Scalar52([
        0x000b75071e1458fa,
        0x000bf9d75e1ecdac,
        0x000433d2baf0672b,
        0x0005fffcc11fad13,
        0x00000d96018bb825,
    ]);

    /// x*y = 36752150652102274958925982391442301741 (mod l)
    static X_TIMES_Y: Scalar52 = Scalar52([
        0x000ee6d76ba7632d,
        0x000ed50d71d84e02,
        0x00000000001ba634,
        0x0000000000000000,
        0x0000000000000000,
    ]);

    #[test]
    fn mul() {
        let res = Scalar52::mul(&X, &Y);
        for i in 0..5 {
            assert!(res[i] == X_TIMES_Y[i]);
        }
    }

    #[test]
    fn add_and_sub_invert() {
        let sum = Scalar52::add(&X, &Y);
        let diff = Scalar52::sub(&sum, &Y);
        for i in 0..5 {
            assert!(diff[i] == X[i]);
        }
    }

    #[test]
    fn sub_of_zero_wraps_to_l_minus() {
        // 0 - 1 = L - 1
        let one = Scalar52([1, 0, 0, 0, 0]);
        let res = Scalar52::sub(&Scalar52::ZERO, &one);
        let expected = Scalar52([
            0x0002631a5cf5d3ec,
            0x000dea2f79cd6581,
            0x000000000014def9,
            0x0000000000000000,
            0x0000100000000000,
        ]);
        for i in 0..5 {
            assert!(res[i] == expected[i]);
        }
    }

    #[test]
    fn wide_reduction_of_extremes_is_canonical() {
        for input in [[0u8; 64], [0xffu8; 64]] {
            let s = Scalar::from_bytes_mod_order_wide(&input);
            // canonical means the value re-parses unchanged
            let again = Scalar::from_canonical_bytes(s.to_bytes());
            assert!(bool::from(again.is_some()));
        }
    }

    #[test]
    fn from_canonical_bytes_rejects_ell() {
        // canonical encoding of L
        let l_bytes: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];
        assert!(bool::from(Scalar::from_canonical_bytes(l_bytes).is_none()));
        let mut l_minus_one = l_bytes;
        l_minus_one[0] -= 1;
        assert!(bool::from(
            Scalar::from_canonical_bytes(l_minus_one).is_some()
        ));
    }

    #[test]
    fn scalar_mul_add_matches_packed_ops() {
        let x = X.pack();
        let y = Y.pack();
        let lhs = &(&x * &y) + &x;
        let rhs = Scalar52::add(&Scalar52::mul(&x.unpack(), &y.unpack()), &x.unpack()).pack();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn radix_16_digit_bounds_and_value() {
        let x = Y.pack();
        let digits = x.as_radix_16();
        // reconstruct the low 64 bits with wrapping arithmetic
        let mut acc = 0u64;
        let mut pow = 1u64;
        for d in digits {
            assert!((-8..=8).contains(&(d as i32)));
            acc = acc.wrapping_add((d as i64 as u64).wrapping_mul(pow));
            pow = pow.wrapping_mul(16);
        }
        let low = u64::from_le_bytes(x.bytes[..8].try_into().unwrap());
        assert_eq!(acc, low);
    }

    #[test]
    fn naf_is_sparse_and_odd() {
        let x = Y.pack();
        for w in [5usize, 8] {
            let naf = x.non_adjacent_form(w);
            for (i, &digit) in naf.iter().enumerate() {
                if digit == 0 {
                    continue;
                }
                assert!(digit % 2 != 0);
                assert!((digit as i32).abs() < (1 << (w - 1)));
                for j in 1..w {
                    if i + j < 256 {
                        assert_eq!(naf[i + j], 0);
                    }
                }
            }
        }
    }

    #[test]
    fn clamping_fixes_bits() {
        let clamped = clamp_integer([0xffu8; 32]);
        assert_eq!(clamped[0] & 0b0000_0111, 0);
        assert_eq!(clamped[31] & 0b1000_0000, 0);
        assert_eq!(clamped[31] & 0b0100_0000, 0b0100_0000);
    }
}
