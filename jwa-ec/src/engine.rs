//! Crypto engine and key factory seams.
//!
//! The signature algorithms and the JWK factory never touch curve arithmetic
//! themselves. Signing, verification and key construction are delegated to a
//! [`CryptoEngine`] and a [`KeyFactory`], which work on ASN.1 DER signatures.
//! [`RustCryptoEngine`] implements both on top of the [`p256`], [`p384`] and
//! [`p521`] crates.

use crate::{
    curve::{self, CurveId, CurveParameters},
    key::{EcPrivateKey, EcPublicKey},
    point::{self, AffinePoint},
    Error, Result,
};
use ecdsa_core::signature::{Signer, Verifier};
use rand_core::OsRng;
use zeroize::Zeroizing;

/// ECDSA signing and verification over ASN.1 DER signatures.
pub trait CryptoEngine {
    /// Sign `payload`, returning an ASN.1 DER `ECDSA-Sig-Value`.
    fn sign_der(&self, key: &EcPrivateKey, payload: &[u8]) -> Result<Vec<u8>>;

    /// Verify an ASN.1 DER `ECDSA-Sig-Value` over `payload`.
    ///
    /// Returns `Ok(false)` for a well-formed signature which does not verify,
    /// and [`Error::InvalidKey`] if `key` cannot be used for verification.
    fn verify_der(&self, key: &EcPublicKey, payload: &[u8], der: &[u8]) -> Result<bool>;
}

/// Construction of native public keys from their components.
pub trait KeyFactory {
    /// Build a public key for the given curve and point.
    fn generate_public(
        &self,
        params: &CurveParameters,
        point: &AffinePoint,
    ) -> Result<EcPublicKey>;
}

/// [`CryptoEngine`] and [`KeyFactory`] backed by the RustCrypto NIST curve
/// crates.
///
/// Zero-sized: construct one wherever it is needed. Native keys are rebuilt
/// from their components on every call and dropped afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct RustCryptoEngine;

/// Run `$body` with `$c` bound to the curve crate for `$curve`.
macro_rules! with_curve {
    ($curve:expr, $c:ident => $body:expr) => {
        match $curve {
            CurveId::P256 => {
                use p256 as $c;
                $body
            }
            CurveId::P384 => {
                use p384 as $c;
                $body
            }
            CurveId::P521 => {
                use p521 as $c;
                $body
            }
        }
    };
}

impl RustCryptoEngine {
    /// Generate a random key pair on the given curve.
    pub fn generate_key_pair(&self, curve: CurveId) -> Result<(EcPrivateKey, EcPublicKey)> {
        let params = curve.parameters();

        with_curve!(curve, c => {
            let signing_key = c::ecdsa::SigningKey::random(&mut OsRng);
            let d = Zeroizing::new(signing_key.to_bytes());
            let encoded = c::ecdsa::VerifyingKey::from(&signing_key).to_encoded_point(false);

            let (x, y) = match (encoded.x(), encoded.y()) {
                (Some(x), Some(y)) => (point::decode(x)?, point::decode(y)?),
                _ => {
                    return Err(Error::KeyConstruction(format!(
                        "generated {curve} public key is the identity"
                    )))
                }
            };

            Ok((
                EcPrivateKey::new(params.clone(), d.as_slice()),
                EcPublicKey::new(params.clone(), AffinePoint::new(x, y)),
            ))
        })
    }
}

impl CryptoEngine for RustCryptoEngine {
    fn sign_der(&self, key: &EcPrivateKey, payload: &[u8]) -> Result<Vec<u8>> {
        let curve = curve::by_parameters(key.params())?;

        with_curve!(curve, c => {
            let signing_key = c::ecdsa::SigningKey::from_slice(key.d()).map_err(|_| {
                Error::InvalidKey(format!("{curve} private key scalar is out of range"))
            })?;
            let signature: c::ecdsa::Signature = signing_key
                .try_sign(payload)
                .map_err(|e| Error::SigningFailed(e.to_string()))?;

            Ok(signature.to_der().as_bytes().to_vec())
        })
    }

    fn verify_der(&self, key: &EcPublicKey, payload: &[u8], der: &[u8]) -> Result<bool> {
        let curve = curve::by_parameters(key.params())?;
        let sec1 = sec1_uncompressed(key)?;

        with_curve!(curve, c => {
            let verifying_key = c::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| {
                tracing::debug!(crv = %curve, "engine rejected EC public key");
                Error::InvalidKey(format!("{curve} public key is not usable for verification"))
            })?;
            let signature = c::ecdsa::Signature::from_der(der)
                .map_err(|e| Error::SignatureVerificationFailed(e.to_string()))?;

            Ok(verifying_key.verify(payload, &signature).is_ok())
        })
    }
}

impl KeyFactory for RustCryptoEngine {
    fn generate_public(
        &self,
        params: &CurveParameters,
        point: &AffinePoint,
    ) -> Result<EcPublicKey> {
        let curve = curve::by_parameters(params)?;
        let key = EcPublicKey::new(params.clone(), *point);
        let sec1 = sec1_uncompressed(&key)?;

        with_curve!(curve, c => {
            c::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map_err(|e| Error::KeyConstruction(format!("{curve} public key: {e}")))?;
        });

        Ok(key)
    }
}

/// SEC1 uncompressed encoding: `0x04 || x || y`.
fn sec1_uncompressed(key: &EcPublicKey) -> Result<Vec<u8>> {
    let field_bits = key.params().field_bits();
    let x = point::encode(field_bits, &key.point().x)?;
    let y = point::encode(field_bits, &key.point().y)?;

    let mut sec1 = Vec::with_capacity(1 + x.len() + y.len());
    sec1.push(0x04);
    sec1.extend_from_slice(&x);
    sec1.extend_from_slice(&y);
    Ok(sec1)
}

#[cfg(test)]
mod tests {
    use super::{CryptoEngine, KeyFactory, RustCryptoEngine};
    use crate::{
        curve::{CurveId, P256},
        key::EcPublicKey,
        point::{is_on_curve, AffinePoint},
        Error,
    };
    use elliptic_curve::bigint::U576;

    #[test]
    fn generated_points_are_on_curve() {
        for curve in CurveId::ALL {
            let (private, public) = RustCryptoEngine.generate_key_pair(curve).unwrap();
            assert_eq!(private.params(), curve.parameters());
            assert_eq!(private.d().len(), curve.parameters().field_bytes());
            assert!(is_on_curve(public.params(), public.point()));
        }
    }

    #[test]
    fn sign_and_verify_der() {
        for curve in CurveId::ALL {
            let (private, public) = RustCryptoEngine.generate_key_pair(curve).unwrap();
            let der = RustCryptoEngine.sign_der(&private, b"payload").unwrap();
            assert_eq!(der[0], 0x30);
            assert!(RustCryptoEngine.verify_der(&public, b"payload", &der).unwrap());
            assert!(!RustCryptoEngine.verify_der(&public, b"other", &der).unwrap());
        }
    }

    #[test]
    fn off_curve_public_key() {
        let g = P256.generator;
        let point = AffinePoint::new(g.x, g.y.wrapping_add(&U576::ONE));
        let key = EcPublicKey::new(P256.clone(), point);
        let der = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01];
        assert!(matches!(
            RustCryptoEngine.verify_der(&key, b"payload", &der),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            RustCryptoEngine.generate_public(key.params(), key.point()),
            Err(Error::KeyConstruction(_))
        ));
    }

    #[test]
    fn generate_public() {
        let key = RustCryptoEngine
            .generate_public(&P256, &P256.generator)
            .unwrap();
        assert_eq!(key.point(), &P256.generator);
    }
}
