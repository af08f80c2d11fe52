//! Elliptic Curve public JSON Web Keys ([RFC 7518 Section 6.2.1]).
//!
//! Coordinates supplied by an untrusted party are only accepted once they have
//! been shown to lie on the claimed curve. Without this check an attacker can
//! submit a point on a weaker curve and recover the private key of whoever
//! performs key agreement with it ([invalid curve attack]). The same check is
//! applied when exporting a native key.
//!
//! [RFC 7518 Section 6.2.1]: https://www.rfc-editor.org/rfc/rfc7518.html#section-6.2.1
//! [invalid curve attack]: https://safecurves.cr.yp.to/twist.html

use crate::{
    curve::{self, CurveId},
    engine::{KeyFactory, RustCryptoEngine},
    key::EcPublicKey,
    point::{self, AffinePoint},
    Error, Result,
};
use base64ct::{Base64UrlUnpadded, Encoding as _};
use elliptic_curve::bigint::U576;
use serde_json::{Map, Value};

/// Key type parameter value for Elliptic Curve keys.
pub const KEY_TYPE: &str = "EC";

/// Parameters which may hold secret key material and are never echoed back
/// in diagnostics.
const SECRET_PARAMS: &[&str] = &["d", "k", "p", "q", "dp", "dq", "qi", "oth"];

const REDACTED: &str = "<redacted>";

/// EC public JWK whose point has been verified to lie on its curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcPublicJwk {
    curve: CurveId,
    point: AffinePoint,
}

impl EcPublicJwk {
    /// Curve of this key (`crv`).
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Public point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }

    /// Base64URL fixed-width `x` coordinate.
    pub fn x(&self) -> Result<String> {
        self.coordinate(&self.point.x)
    }

    /// Base64URL fixed-width `y` coordinate.
    pub fn y(&self) -> Result<String> {
        self.coordinate(&self.point.y)
    }

    /// Render the JWK parameters: `kty`, `crv`, `x` and `y`.
    pub fn to_values(&self) -> Result<Map<String, Value>> {
        let mut values = Map::new();
        values.insert("kty".into(), KEY_TYPE.into());
        values.insert("crv".into(), self.curve.as_str().into());
        values.insert("x".into(), self.x()?.into());
        values.insert("y".into(), self.y()?.into());
        Ok(values)
    }

    /// JSON object of the members required for an [RFC 7638] thumbprint, in
    /// lexicographic order and without whitespace.
    ///
    /// Hashing the result is left to the caller.
    ///
    /// [RFC 7638]: https://www.rfc-editor.org/rfc/rfc7638
    pub fn thumbprint_members(&self) -> Result<String> {
        Ok(format!(
            r#"{{"crv":"{}","kty":"{}","x":"{}","y":"{}"}}"#,
            self.curve,
            KEY_TYPE,
            self.x()?,
            self.y()?
        ))
    }

    fn coordinate(&self, value: &U576) -> Result<String> {
        let bytes = point::encode(self.curve.parameters().field_bits(), value)?;
        Ok(Base64UrlUnpadded::encode_string(&bytes))
    }
}

/// Converts between native EC public keys and EC public JWKs.
#[derive(Clone, Debug, Default)]
pub struct EcJwkFactory<F = RustCryptoEngine> {
    key_factory: F,
}

impl EcJwkFactory {
    /// Create a factory backed by [`RustCryptoEngine`].
    pub fn new() -> Self {
        Self::with_key_factory(RustCryptoEngine)
    }
}

impl<F: KeyFactory> EcJwkFactory<F> {
    /// Create a factory which builds native keys with `key_factory`.
    pub fn with_key_factory(key_factory: F) -> Self {
        Self { key_factory }
    }

    /// Export a native public key.
    ///
    /// Fails with [`Error::UnsupportedCurve`] unless the key's curve is one of
    /// the JOSE curves, and with [`Error::InvalidKey`] if its point is not on
    /// that curve.
    pub fn from_key(&self, key: &EcPublicKey) -> Result<EcPublicJwk> {
        let curve = curve::by_parameters(key.params())?;

        if !point::is_on_curve(key.params(), key.point()) {
            tracing::warn!(crv = %curve, "EC public key point is not on its curve");
            return Err(Error::InvalidKey(format!(
                "ECPublicKey's ECPoint does not exist on elliptic curve '{curve}' \
                 and may not be used to create '{curve}' JWKs."
            )));
        }

        Ok(EcPublicJwk {
            curve,
            point: *key.point(),
        })
    }

    /// Import JWK parameters.
    ///
    /// `crv`, `x` and `y` are required. `kty`, when present, must be `EC`.
    /// Coordinates which do not lie on the named curve are rejected with
    /// [`Error::InvalidKey`].
    pub fn from_values(&self, values: &Map<String, Value>) -> Result<EcPublicJwk> {
        if let Some(kty) = values.get("kty") {
            if kty.as_str() != Some(KEY_TYPE) {
                return Err(Error::MalformedKey(format!(
                    "EC JWK 'kty' (Key Type) value must be '{KEY_TYPE}', found {kty}"
                )));
            }
        }

        let crv = required_string(values, "crv", "Curve")?;
        let x = required_string(values, "x", "X Coordinate")?;
        let y = required_string(values, "y", "Y Coordinate")?;
        let x = decode_coordinate(x, "x", "X Coordinate")?;
        let y = decode_coordinate(y, "y", "Y Coordinate")?;

        let curve: CurveId = crv.parse()?;
        let params = curve.parameters();

        // A coordinate too wide for any supported field cannot be on the curve.
        let point = match (x, y) {
            (Some(x), Some(y)) => Some(AffinePoint::new(x, y)),
            _ => None,
        }
        .filter(|point| point::is_on_curve(params, point));

        match point {
            Some(point) => Ok(EcPublicJwk { curve, point }),
            None => {
                tracing::warn!(crv = %curve, "EC JWK coordinates are not on the named curve");
                Err(Error::InvalidKey(format!(
                    "EC JWK x,y coordinates do not exist on elliptic curve '{curve}'. This \
                     could be due simply to an incorrectly-created JWK or possibly an attempted \
                     Invalid Curve Attack (see https://safecurves.cr.yp.to/twist.html for more \
                     information). JWK: {}",
                    redacted(values)
                )))
            }
        }
    }

    /// Build a native public key from a validated JWK.
    pub fn materialize(&self, jwk: &EcPublicJwk) -> Result<EcPublicKey> {
        self.key_factory
            .generate_public(jwk.curve.parameters(), &jwk.point)
    }
}

fn required_string<'a>(
    values: &'a Map<String, Value>,
    name: &str,
    description: &str,
) -> Result<&'a str> {
    match values.get(name) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(Error::MalformedKey(format!(
            "EC JWK '{name}' ({description}) value must be a string."
        ))),
        None => Err(Error::MalformedKey(format!(
            "EC JWK is missing required '{name}' ({description}) value."
        ))),
    }
}

/// Decode a Base64URL coordinate. `Ok(None)` means the value is too wide to be
/// represented at all.
fn decode_coordinate(value: &str, name: &str, description: &str) -> Result<Option<U576>> {
    let bytes = Base64UrlUnpadded::decode_vec(value).map_err(|e| {
        Error::MalformedKey(format!(
            "Unable to decode EC JWK '{name}' ({description}) value: {e}"
        ))
    })?;

    match point::decode(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(Error::EncodingOverflow { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Render JWK parameters as JSON with secret parameters masked.
fn redacted(values: &Map<String, Value>) -> String {
    let masked: Map<String, Value> = values
        .iter()
        .map(|(name, value)| {
            if SECRET_PARAMS.contains(&name.as_str()) {
                (name.clone(), Value::from(REDACTED))
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect();

    Value::Object(masked).to_string()
}
