//! Native key representations.
//!
//! Keys are plain component holders. Nothing here validates them: that is done
//! by [`EcJwkFactory`](crate::EcJwkFactory) on import/export and by the
//! signature algorithms before a key is handed to the crypto engine.

use crate::{curve::CurveParameters, point::AffinePoint};
use core::fmt;
use zeroize::Zeroizing;

/// Any key a JOSE algorithm may be asked to use.
#[derive(Clone, Debug)]
pub enum Key {
    /// Elliptic Curve key.
    Ec(EcKey),

    /// RSA key.
    Rsa(RsaKey),

    /// Symmetric key.
    Octet(SecretKey),
}

impl Key {
    /// Human-readable type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Key::Ec(key) => key.type_name(),
            Key::Rsa(RsaKey::Public { .. }) => "RSAPublicKey",
            Key::Rsa(RsaKey::Private { .. }) => "RSAPrivateKey",
            Key::Octet(_) => "SecretKey",
        }
    }

    /// Borrow the EC key, if this is one.
    pub fn as_ec(&self) -> Option<&EcKey> {
        match self {
            Key::Ec(key) => Some(key),
            Key::Rsa(_) | Key::Octet(_) => None,
        }
    }
}

/// Elliptic Curve key.
#[derive(Clone, Debug)]
pub enum EcKey {
    /// Public key.
    Public(EcPublicKey),

    /// Private key.
    Private(EcPrivateKey),
}

impl EcKey {
    /// Domain parameters of the key's curve.
    pub fn params(&self) -> &CurveParameters {
        match self {
            EcKey::Public(key) => key.params(),
            EcKey::Private(key) => key.params(),
        }
    }

    /// Human-readable type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            EcKey::Public(_) => "ECPublicKey",
            EcKey::Private(_) => "ECPrivateKey",
        }
    }
}

/// Elliptic Curve public key: a point on a curve.
///
/// The point is not checked against the curve on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcPublicKey {
    params: CurveParameters,
    point: AffinePoint,
}

impl EcPublicKey {
    /// Create a public key from its curve and point.
    pub fn new(params: CurveParameters, point: AffinePoint) -> Self {
        Self { params, point }
    }

    /// Domain parameters of the key's curve.
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    /// Public point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }
}

/// Elliptic Curve private key: a big-endian secret scalar on a curve.
#[derive(Clone)]
pub struct EcPrivateKey {
    params: CurveParameters,
    d: Zeroizing<Vec<u8>>,
}

impl EcPrivateKey {
    /// Create a private key from its curve and big-endian secret scalar.
    pub fn new(params: CurveParameters, d: &[u8]) -> Self {
        Self {
            params,
            d: Zeroizing::new(d.to_vec()),
        }
    }

    /// Domain parameters of the key's curve.
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    /// Big-endian secret scalar.
    pub fn d(&self) -> &[u8] {
        &self.d
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// RSA key components, big-endian.
#[derive(Clone)]
pub enum RsaKey {
    /// Public key.
    Public {
        /// Modulus.
        n: Vec<u8>,

        /// Public exponent.
        e: Vec<u8>,
    },

    /// Private key.
    Private {
        /// Modulus.
        n: Vec<u8>,

        /// Private exponent.
        d: Zeroizing<Vec<u8>>,
    },
}

impl fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsaKey::Public { n, e } => f
                .debug_struct("RsaKey::Public")
                .field("n", n)
                .field("e", e)
                .finish(),
            RsaKey::Private { n, .. } => f
                .debug_struct("RsaKey::Private")
                .field("n", n)
                .finish_non_exhaustive(),
        }
    }
}

/// Symmetric key bytes.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    /// Create a symmetric key.
    pub fn new(bytes: &[u8]) -> Self {
        Self(Zeroizing::new(bytes.to_vec()))
    }

    /// Key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl From<EcPublicKey> for EcKey {
    fn from(key: EcPublicKey) -> EcKey {
        EcKey::Public(key)
    }
}

impl From<EcPrivateKey> for EcKey {
    fn from(key: EcPrivateKey) -> EcKey {
        EcKey::Private(key)
    }
}

impl From<EcKey> for Key {
    fn from(key: EcKey) -> Key {
        Key::Ec(key)
    }
}

impl From<EcPublicKey> for Key {
    fn from(key: EcPublicKey) -> Key {
        Key::Ec(key.into())
    }
}

impl From<EcPrivateKey> for Key {
    fn from(key: EcPrivateKey) -> Key {
        Key::Ec(key.into())
    }
}

impl From<RsaKey> for Key {
    fn from(key: RsaKey) -> Key {
        Key::Rsa(key)
    }
}

impl From<SecretKey> for Key {
    fn from(key: SecretKey) -> Key {
        Key::Octet(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{EcPrivateKey, EcPublicKey, Key, RsaKey, SecretKey};
    use crate::curve::P256;
    use zeroize::Zeroizing;

    #[test]
    fn type_names() {
        let public = Key::from(EcPublicKey::new(P256.clone(), P256.generator));
        let private = Key::from(EcPrivateKey::new(P256.clone(), &[1; 32]));
        let rsa = Key::from(RsaKey::Private {
            n: vec![0xc5; 256],
            d: Zeroizing::new(vec![0x42; 256]),
        });
        let octet = Key::from(SecretKey::new(b"secret"));

        assert_eq!(public.type_name(), "ECPublicKey");
        assert_eq!(private.type_name(), "ECPrivateKey");
        assert_eq!(rsa.type_name(), "RSAPrivateKey");
        assert_eq!(octet.type_name(), "SecretKey");

        assert!(public.as_ec().is_some());
        assert!(rsa.as_ec().is_none());
    }

    #[test]
    fn debug_omits_secrets() {
        let private = EcPrivateKey::new(P256.clone(), &[0xab; 32]);
        let debug = format!("{private:?}");
        assert!(debug.starts_with("EcPrivateKey"));
        assert!(!debug.contains("171, 171"));

        let octet = SecretKey::new(b"hunter2");
        assert_eq!(format!("{octet:?}"), "SecretKey(..)");
    }
}
