//! JOSE curve identifiers and elliptic curve domain parameters.
//!
//! Only the curves registered for EC JWKs in [RFC 7518 Section 6.2.1.1] are
//! supported. Parameters are matched by value, so a key built from parameters
//! equal to one of the statics below is recognized regardless of where its
//! parameters came from.
//!
//! [RFC 7518 Section 6.2.1.1]: https://www.rfc-editor.org/rfc/rfc7518.html#section-6.2.1.1

use crate::{point::AffinePoint, Error, Result};
use core::{fmt, str::FromStr};
use elliptic_curve::bigint::U576;

/// Short Weierstrass curve `y² = x³ + ax + b` over the prime field `GF(p)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParameters {
    /// Field modulus.
    pub p: U576,

    /// `a` coefficient.
    pub a: U576,

    /// `b` coefficient.
    pub b: U576,

    /// Base point.
    pub generator: AffinePoint,

    /// Order of the base point.
    pub order: U576,

    /// Cofactor.
    pub cofactor: u32,
}

impl CurveParameters {
    /// Bit length of the field modulus.
    pub fn field_bits(&self) -> usize {
        self.p.bits()
    }

    /// Number of octets in a fixed-width encoding of a field element.
    pub fn field_bytes(&self) -> usize {
        (self.field_bits() + 7) / 8
    }

    /// Bit length of the base point order, i.e. the key size used by ECDSA.
    pub fn order_bits(&self) -> usize {
        self.order.bits()
    }
}

/// NIST P-256 (`secp256r1`).
pub static P256: CurveParameters = CurveParameters {
    p: U576::from_be_hex("00000000000000000000000000000000000000000000000000000000000000000000000000000000ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
    a: U576::from_be_hex("00000000000000000000000000000000000000000000000000000000000000000000000000000000ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
    b: U576::from_be_hex("000000000000000000000000000000000000000000000000000000000000000000000000000000005ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
    generator: AffinePoint::new(
        U576::from_be_hex("000000000000000000000000000000000000000000000000000000000000000000000000000000006b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
        U576::from_be_hex("000000000000000000000000000000000000000000000000000000000000000000000000000000004fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
    ),
    order: U576::from_be_hex("00000000000000000000000000000000000000000000000000000000000000000000000000000000ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
    cofactor: 1,
};

/// NIST P-384 (`secp384r1`).
pub static P384: CurveParameters = CurveParameters {
    p: U576::from_be_hex("000000000000000000000000000000000000000000000000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff"),
    a: U576::from_be_hex("000000000000000000000000000000000000000000000000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc"),
    b: U576::from_be_hex("000000000000000000000000000000000000000000000000b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef"),
    generator: AffinePoint::new(
        U576::from_be_hex("000000000000000000000000000000000000000000000000aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7"),
        U576::from_be_hex("0000000000000000000000000000000000000000000000003617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f"),
    ),
    order: U576::from_be_hex("000000000000000000000000000000000000000000000000ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973"),
    cofactor: 1,
};

/// NIST P-521 (`secp521r1`).
pub static P521: CurveParameters = CurveParameters {
    p: U576::from_be_hex("00000000000001ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"),
    a: U576::from_be_hex("00000000000001fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffc"),
    b: U576::from_be_hex("0000000000000051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00"),
    generator: AffinePoint::new(
        U576::from_be_hex("00000000000000c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66"),
        U576::from_be_hex("000000000000011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650"),
    ),
    order: U576::from_be_hex("00000000000001fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409"),
    cofactor: 1,
};

/// JOSE curve identifier (`crv` JWK parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurveId {
    /// `P-256`
    P256,

    /// `P-384`
    P384,

    /// `P-521`
    P521,
}

impl CurveId {
    /// All supported curves.
    pub const ALL: [CurveId; 3] = [CurveId::P256, CurveId::P384, CurveId::P521];

    /// JOSE identifier of this curve.
    pub const fn as_str(self) -> &'static str {
        match self {
            CurveId::P256 => "P-256",
            CurveId::P384 => "P-384",
            CurveId::P521 => "P-521",
        }
    }

    /// Domain parameters of this curve.
    pub fn parameters(self) -> &'static CurveParameters {
        match self {
            CurveId::P256 => &P256,
            CurveId::P384 => &P384,
            CurveId::P521 => &P521,
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self> {
        CurveId::ALL
            .into_iter()
            .find(|curve| curve.as_str() == id)
            .ok_or_else(|| {
                tracing::debug!(crv = %id, "unrecognized EC curve id");
                Error::UnsupportedCurve(format!("Unrecognized JWA EC curve id '{id}'"))
            })
    }
}

/// Look up the domain parameters for a JOSE curve identifier.
pub fn by_id(id: &str) -> Result<&'static CurveParameters> {
    id.parse::<CurveId>().map(CurveId::parameters)
}

/// Find the JOSE curve identifier for the given domain parameters.
pub fn by_parameters(params: &CurveParameters) -> Result<CurveId> {
    CurveId::ALL
        .into_iter()
        .find(|curve| curve.parameters() == params)
        .ok_or_else(|| {
            Error::UnsupportedCurve(
                "The specified ECKey curve does not match a JWA standard curve id.".to_owned(),
            )
        })
}
