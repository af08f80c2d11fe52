//! Fixed-width coordinate encoding and curve membership.

use crate::{curve::CurveParameters, Error, Result};
use elliptic_curve::bigint::{
    modular::runtime_mod::{DynResidue, DynResidueParams},
    Encoding, U576,
};
use subtle::{ConstantTimeEq, ConstantTimeLess};

/// Number of octets in a [`U576`].
const UINT_BYTES: usize = 72;

/// Point in affine coordinates.
///
/// Carries no reference to a curve: whether it is valid is always decided
/// against an explicit [`CurveParameters`] with [`is_on_curve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffinePoint {
    /// x-coordinate
    pub x: U576,

    /// y-coordinate
    pub y: U576,
}

impl AffinePoint {
    /// Create a point from its coordinates.
    pub const fn new(x: U576, y: U576) -> Self {
        Self { x, y }
    }
}

/// Encode `value` as a big-endian octet string of exactly
/// `ceil(field_bits / 8)` octets, left-padded with zeros.
pub fn encode(field_bits: usize, value: &U576) -> Result<Vec<u8>> {
    let max = (field_bits + 7) / 8;
    let len = (value.bits() + 7) / 8;

    if len > max {
        return Err(Error::EncodingOverflow { len, max });
    }

    let bytes = value.to_be_bytes();
    let mut out = vec![0u8; max];
    out[max - len..].copy_from_slice(&bytes[UINT_BYTES - len..]);
    Ok(out)
}

/// Decode an unsigned big-endian octet string.
///
/// Leading zero octets are ignored, so any width is accepted as long as the
/// value itself fits in a [`U576`].
pub fn decode(bytes: &[u8]) -> Result<U576> {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len());
    let significant = &bytes[start..];

    if significant.len() > UINT_BYTES {
        return Err(Error::EncodingOverflow {
            len: significant.len(),
            max: UINT_BYTES,
        });
    }

    let mut buf = [0u8; UINT_BYTES];
    buf[UINT_BYTES - significant.len()..].copy_from_slice(significant);
    Ok(U576::from_be_bytes(buf))
}

/// Is `point` a solution of `y² = x³ + ax + b (mod p)` with both coordinates
/// fully reduced?
///
/// Runs in constant time with respect to the coordinates.
pub fn is_on_curve(params: &CurveParameters, point: &AffinePoint) -> bool {
    let p = &params.p;

    // Montgomery form requires an odd modulus.
    if p.as_words()[0] & 1 == 0 {
        return false;
    }

    let in_range = ConstantTimeLess::ct_lt(&point.x, p) & ConstantTimeLess::ct_lt(&point.y, p);

    let modulus = DynResidueParams::new(p);
    let x = DynResidue::new(&point.x, modulus);
    let y = DynResidue::new(&point.y, modulus);
    let a = DynResidue::new(&params.a, modulus);
    let b = DynResidue::new(&params.b, modulus);

    let lhs = y.square();
    let rhs = x.square().mul(&x).add(&a.mul(&x)).add(&b);

    (in_range & lhs.retrieve().ct_eq(&rhs.retrieve())).into()
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, is_on_curve, AffinePoint};
    use crate::{
        curve::{CurveId, P256, P521},
        Error,
    };
    use elliptic_curve::bigint::U576;
    use hex_literal::hex;

    #[test]
    fn generators_are_on_curve() {
        for curve in CurveId::ALL {
            let params = curve.parameters();
            assert!(is_on_curve(params, &params.generator), "{curve}");
        }
    }

    #[test]
    fn perturbed_point_is_not_on_curve() {
        let g = P256.generator;
        let point = AffinePoint::new(g.x, g.y.wrapping_add(&U576::ONE));
        assert!(!is_on_curve(&P256, &point));
        assert!(!is_on_curve(&P256, &AffinePoint::default()));
    }

    #[test]
    fn unreduced_coordinates_are_rejected() {
        let g = P256.generator;
        let point = AffinePoint::new(g.x.wrapping_add(&P256.p), g.y);
        assert!(!is_on_curve(&P256, &point));

        let point = AffinePoint::new(g.x, g.y.wrapping_add(&P256.p));
        assert!(!is_on_curve(&P256, &point));
    }

    #[test]
    fn even_modulus() {
        let mut params = P256.clone();
        params.p = params.p.wrapping_add(&U576::ONE);
        assert!(!is_on_curve(&params, &params.generator));
    }

    #[test]
    fn encode_pads_to_field_width() {
        let one = encode(256, &U576::ONE).unwrap();
        assert_eq!(one.len(), 32);
        assert_eq!(one[31], 1);
        assert!(one[..31].iter().all(|&b| b == 0));

        assert_eq!(encode(521, &P521.generator.x).unwrap().len(), 66);
        assert_eq!(encode(8, &U576::ZERO).unwrap(), [0]);
    }

    #[test]
    fn encode_overflow() {
        assert_eq!(
            encode(256, &P521.p),
            Err(Error::EncodingOverflow { len: 66, max: 32 })
        );
    }

    #[test]
    fn decode_ignores_leading_zeros() {
        let value = decode(&hex!("00000000000102")).unwrap();
        assert_eq!(value, U576::from_u16(0x0102));
        assert_eq!(decode(&[]).unwrap(), U576::ZERO);
        assert_eq!(decode(&[0u8; 100]).unwrap(), U576::ZERO);
    }

    #[test]
    fn decode_overflow() {
        assert_eq!(
            decode(&[0xff; 73]),
            Err(Error::EncodingOverflow { len: 73, max: 72 })
        );
    }

    #[test]
    fn encode_decode() {
        let g = P521.generator;
        let x = encode(P521.field_bits(), &g.x).unwrap();
        assert_eq!(decode(&x).unwrap(), g.x);
    }
}
