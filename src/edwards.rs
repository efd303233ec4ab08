// -*- mode: rust; -*-
//
// This file is part of nacl25519.

//! Group operations for points on the twisted Edwards form of
//! Curve25519, \\( -x\^2 + y\^2 = 1 - \frac{121665}{121666} x\^2 y\^2 \\).
//!
//! Points are kept in extended twisted Edwards coordinates
//! \\((X:Y:Z:T)\\) with \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\).
//! The auxiliary models used inside scalar multiplication live in
//! [`crate::curve_models`].
//!
//! Scalar multiplication comes in three flavors:
//!
//! * [`EdwardsBasepointTable::mul_base`], fixed-base against the
//!   precomputed radix-16 tables, constant time;
//! * `&scalar * &point`, variable-base with a runtime radix-16 table,
//!   constant time;
//! * [`EdwardsPoint::vartime_double_scalar_mul_basepoint`], the
//!   interleaved \\(aA + bB\\) used only on public data during
//!   signature verification.

#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;
use crate::curve_models::{
    AffineNielsPoint, CompletedPoint, ProjectiveNielsPoint, ProjectivePoint,
};
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::{clamp_integer, Scalar};
use crate::traits::Identity;
use crate::window::{LookupTable, NafLookupTable5};

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\),
/// marshalled into 32 bytes.
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte gives the sign of
/// \\(x\\).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// Returns `None`:
    ///
    /// * if the \\(y\\)-coordinate is not the canonical encoding of a
    ///   field element (a second encoding of the same point would
    ///   otherwise be accepted);
    /// * if the encoding does not correspond to a point on the curve.
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        let Y = FieldElement::from_bytes(self.as_bytes());

        // Reject a non-canonical y before doing any curve math.
        let mut canonical = self.to_bytes();
        canonical[31] &= 0x7f;
        if Y.as_bytes() != canonical {
            return None;
        }

        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; // u = y²-1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; // v = dy²+1
        let (is_valid_y_coord, mut X) = FieldElement::sqrt_ratio_i(&u, &v);

        if !bool::from(is_valid_y_coord) {
            return None;
        }

        // sqrt_ratio_i always returns the nonnegative square root;
        // flip it to match the encoded sign of x.
        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);
        let neg_X = -&X;
        X.conditional_assign(&neg_X, compressed_sign_bit ^ X.is_negative());

        Some(EdwardsPoint {
            X,
            Y,
            Z,
            T: &X * &Y,
        })
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ])
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

impl Zeroize for EdwardsPoint {
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y = FieldElement::ONE;
        self.Z = FieldElement::ONE;
        self.T.zeroize();
    }
}

impl Eq for EdwardsPoint {}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // Cross-multiply to compare x = X/Z and y = Y/Z without
        // inverting.
        let sx = &self.X * &other.Z;
        let ox = &other.X * &self.Z;
        let sy = &self.Y * &other.Z;
        let oy = &other.Y * &self.Z;

        sx.ct_eq(&ox) & sy.ct_eq(&oy)
    }
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Convert to a ProjectiveNielsPoint
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Convert the representation of this point from extended
    /// coordinates to projective coordinates.
    pub(crate) const fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Dehomogenize to an AffineNielsPoint.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    /// Convert this `EdwardsPoint` on the Edwards model to the
    /// corresponding `MontgomeryPoint` on the Montgomery model.
    ///
    /// Note that this is a one-way conversion, since the Montgomery
    /// model does not retain sign information.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        // We have u = (1+y)/(1-y) = (Z+Y)/(Z-Y).
        //
        // The denominator is zero only when y = 1, the identity or the
        // 2-torsion point (0, -1); in either case the `invert` maps it
        // to u = 0, the conventional encoding.
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        let u = &U * &W.invert();
        MontgomeryPoint(u.as_bytes())
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s: [u8; 32] = y.as_bytes();
        s[31] ^= u8::conditional_select(&0u8, &0b1000_0000, x.is_negative());
        CompressedEdwardsY(s)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }

    /// Compute \\([2\^k] P \\) by successive doublings.  Requires
    /// \\( k > 0 \\).
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.as_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.as_projective();
        }
        // Unroll last iteration so we can go directly as_extended()
        s.double().as_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    /// Constant-time variable-base scalar multiplication: build a
    /// lookup table of \\([P, 2P, \ldots, 8P]\\) and process the scalar
    /// as 64 signed radix-16 digits.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        let lookup_table = LookupTable::<ProjectiveNielsPoint>::from(self);
        let scalar_digits = scalar.as_radix_16();
        // Compute s*P as
        //
        //    s*P = P*(s_0 +   s_1*16^1 +   s_2*16^2 + ... +   s_63*16^63)
        //        = s_0*P + 16*(s_1*P + 16*(s_2*P + 16*( ... + s_63*P)...))
        //
        // so we multiply by 16 (doubling 4 times) between additions.
        let mut tmp2: ProjectivePoint;
        let mut tmp3 = EdwardsPoint::identity();
        let mut tmp1 = &tmp3 + &lookup_table.select(scalar_digits[63]);
        // Now tmp1 = s_63*P in P1xP1 coords
        for i in (0..63).rev() {
            tmp2 = tmp1.as_projective(); // tmp2 =    (prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 =  2*(prev) in P1xP1 coords
            tmp2 = tmp1.as_projective(); // tmp2 =  2*(prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 =  4*(prev) in P1xP1 coords
            tmp2 = tmp1.as_projective(); // tmp2 =  4*(prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 =  8*(prev) in P1xP1 coords
            tmp2 = tmp1.as_projective(); // tmp2 =  8*(prev) in P2 coords
            tmp1 = tmp2.double(); // tmp1 = 16*(prev) in P1xP1 coords
            tmp3 = tmp1.as_extended(); // tmp3 = 16*(prev) in P3 coords
            tmp1 = &tmp3 + &lookup_table.select(scalar_digits[i]);
            // Now tmp1 = s_i*P + 16*(prev) in P1xP1 coords
        }
        tmp1.as_extended()
    }
}

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

impl EdwardsPoint {
    /// Fixed-base scalar multiplication by the Ed25519 basepoint.
    pub fn mul_base(scalar: &Scalar) -> Self {
        constants::ED25519_BASEPOINT_TABLE.mul_base(scalar)
    }

    /// Multiply this point by `clamp_integer(bytes)`.  The multiple is
    /// not reduced mod \\( \ell \\); with a clamped integer the result
    /// matches the X25519-style derivation exactly.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> Self {
        // The radix-16 recoding only needs the high bit clear, which
        // clamping guarantees, so no reduction is required.
        let s = Scalar {
            bytes: clamp_integer(bytes),
        };
        &self * &s
    }

    /// Fixed-base scalar multiplication of `clamp_integer(bytes)` by
    /// the Ed25519 basepoint.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> Self {
        let s = Scalar {
            bytes: clamp_integer(bytes),
        };
        Self::mul_base(&s)
    }

    /// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the
    /// Ed25519 basepoint.
    ///
    /// Used only during signature verification, where every input is
    /// public.  The two NAF expansions are interleaved: width-5 digits
    /// for \\(A\\) against a runtime table of odd multiples, width-8
    /// digits for \\(B\\) against the static table in
    /// [`crate::constants`].
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        let a_naf = a.non_adjacent_form(5);
        let b_naf = b.non_adjacent_form(8);

        // Find the starting index: the most significant position where
        // either NAF is nonzero.
        let mut i: usize = 255;
        for j in (0..256).rev() {
            i = j;
            if a_naf[i] != 0 || b_naf[i] != 0 {
                break;
            }
        }

        let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
        let table_B = &constants::BASEPOINT_ODD_LOOKUP_TABLE;

        let mut r = ProjectivePoint::identity();
        loop {
            let mut t = r.double();

            match a_naf[i].cmp(&0) {
                core::cmp::Ordering::Greater => {
                    t = &t.as_extended() + &table_A.select(a_naf[i] as usize)
                }
                core::cmp::Ordering::Less => {
                    t = &t.as_extended() - &table_A.select((-a_naf[i]) as usize)
                }
                core::cmp::Ordering::Equal => {}
            }

            match b_naf[i].cmp(&0) {
                core::cmp::Ordering::Greater => {
                    t = &t.as_extended() + &table_B.select(b_naf[i] as usize)
                }
                core::cmp::Ordering::Less => {
                    t = &t.as_extended() - &table_B.select((-b_naf[i]) as usize)
                }
                core::cmp::Ordering::Equal => {}
            }

            r = t.as_projective();

            if i == 0 {
                break;
            }
            i -= 1;
        }

        r.as_extended()
    }
}

// ------------------------------------------------------------------------
// Fixed-base tables
// ------------------------------------------------------------------------

/// A precomputed table of multiples of the Ed25519 basepoint, for
/// accelerating fixed-base scalar multiplication.
///
/// Row \\(i\\) of the table contains
/// \\([1, 2, \ldots, 8] \cdot 16\^{2i} B\\) in affine Niels form, so a
/// scalar written as 64 signed radix-16 digits needs 64 table lookups,
/// 64 mixed additions, and 4 doublings.
#[derive(Clone)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

impl EdwardsBasepointTable {
    /// Compute \\(sB\\) for the basepoint \\(B\\), in constant time.
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.as_radix_16();

        // The digits a_i are bounded by 16^i, and the table row i
        // stores multiples of 16^{2i} B, so split into even and odd
        // digit positions:
        //
        //    sB = (sum_{odd i} a_i 16^i B) + (sum_{even i} a_i 16^i B)
        //
        // The first sum uses rows directly on odd digits; multiplying
        // its running total by 16 aligns the even digits with the same
        // rows.
        let tables = &self.0;
        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_base(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    fn mul(self, basepoint_table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        basepoint_table.mul_base(self)
    }
}

impl Debug for EdwardsBasepointTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EdwardsBasepointTable([\n{:?}])", &self.0)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    /// The compressed Ed25519 basepoint, y = 4/5.
    const BASE_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ]);

    /// 4493907448824000747700850167940867464579944529806937181821189941592931634714
    fn test_scalar_a() -> Scalar {
        Scalar {
            bytes: [
                0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a,
                0xd8, 0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e,
                0x7b, 0x7f, 0x23, 0x76, 0xef, 0x09,
            ],
        }
    }

    /// 2506056684125797857694181776241676200180934651973138769173342316833279714961
    fn test_scalar_b() -> Scalar {
        Scalar {
            bytes: [
                0x91, 0x26, 0x7a, 0xcf, 0x25, 0xc2, 0x09, 0x1b, 0xa2, 0x17, 0x74, 0x7b, 0x66,
                0xf0, 0xb3, 0x2e, 0x9d, 0xf2, 0xa5, 0x67, 0x41, 0xcf, 0xda, 0xc4, 0x56, 0xa7,
                0xd4, 0xaa, 0xb8, 0x60, 0x8a, 0x05,
            ],
        }
    }

    #[test]
    fn basepoint_compress() {
        assert_eq!(constants::ED25519_BASEPOINT.compress(), BASE_CMPRSSD);
    }

    #[test]
    fn basepoint_decompress() {
        let P = BASE_CMPRSSD.decompress().unwrap();
        assert_eq!(P.compress(), BASE_CMPRSSD);
        assert_eq!(P, constants::ED25519_BASEPOINT);
    }

    #[test]
    fn decompress_rejects_non_point() {
        // y = 2 gives a non-square x² candidate.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert!(CompressedEdwardsY(bytes).decompress().is_none());
    }

    #[test]
    fn decompress_rejects_non_canonical_y() {
        // 2^255 - 18 encodes y = 1 non-canonically.
        let mut bytes = [0xffu8; 32];
        bytes[0] = 0xee;
        bytes[31] = 0x7f;
        assert!(CompressedEdwardsY(bytes).decompress().is_none());

        // The canonical encoding of the same point is accepted.
        assert!(CompressedEdwardsY::identity().decompress().is_some());
    }

    #[test]
    fn double_vs_add() {
        let B = &constants::ED25519_BASEPOINT;
        assert_eq!(B.double(), B + B);
    }

    #[test]
    fn neg_cancels() {
        let B = constants::ED25519_BASEPOINT;
        assert!((&B + &(-B).as_projective_niels())
            .as_extended()
            .is_identity());
    }

    #[test]
    fn fixed_base_matches_variable_base() {
        let a = test_scalar_a();
        let aB_fixed = EdwardsPoint::mul_base(&a);
        let aB_variable = &constants::ED25519_BASEPOINT * &a;
        assert_eq!(aB_fixed, aB_variable);
    }

    #[test]
    fn scalar_mul_identity_and_one() {
        assert!(EdwardsPoint::mul_base(&Scalar::ZERO).is_identity());
        assert_eq!(
            EdwardsPoint::mul_base(&Scalar::ONE),
            constants::ED25519_BASEPOINT
        );
    }

    #[test]
    fn vartime_double_base_matches_separate_muls() {
        let a = test_scalar_a();
        let b = test_scalar_b();
        let A = EdwardsPoint::mul_base(&b); // arbitrary point
        let expected = &(&a * &A) + &EdwardsPoint::mul_base(&b);
        let got = EdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &A, &b);
        assert_eq!(got, expected);
    }

    #[test]
    fn mul_base_clamped_matches_montgomery_derivation() {
        // clamped fixed-base mult followed by the birational map must
        // agree with the ladder on the basepoint, u = 9.
        let privkey = [0x77u8; 32];
        let edwards_u = EdwardsPoint::mul_base_clamped(privkey).to_montgomery();
        let ladder_u = constants::X25519_BASEPOINT.mul_clamped(privkey);
        assert_eq!(edwards_u, ladder_u);
    }

    #[test]
    fn basepoint_to_montgomery_is_nine() {
        let mut nine = [0u8; 32];
        nine[0] = 9;
        assert_eq!(
            constants::ED25519_BASEPOINT.to_montgomery(),
            MontgomeryPoint(nine)
        );
    }
}
