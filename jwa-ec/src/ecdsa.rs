//! ECDSA JWS algorithms ([RFC 7518 Section 3.4]).
//!
//! Signatures are produced and consumed in the fixed-width `R || S` encoding.
//! Before a signature reaches the crypto engine it is checked to have the
//! exact length required by the algorithm and `0 < r, s < n`, which rejects
//! forgeries such as the all-zero signatures of [CVE-2022-21449] regardless of
//! the engine's own checks.
//!
//! [RFC 7518 Section 3.4]: https://www.rfc-editor.org/rfc/rfc7518.html#section-3.4
//! [CVE-2022-21449]: https://neilmadden.blog/2022/04/19/psychic-signatures-in-java/

pub mod der;

use crate::{
    config::Config,
    curve::{CurveId, CurveParameters},
    engine::{CryptoEngine, RustCryptoEngine},
    key::{EcKey, EcPrivateKey, EcPublicKey, Key},
    point, Error, Result,
};
use core::fmt;
use elliptic_curve::bigint::U576;
use subtle::{ConstantTimeEq, ConstantTimeLess};

/// ECDSA using P-256 and SHA-256.
pub const ES256: EcdsaAlgorithm = EcdsaAlgorithm {
    id: "ES256",
    curve: CurveId::P256,
    order_bits: 256,
};

/// ECDSA using P-384 and SHA-384.
pub const ES384: EcdsaAlgorithm = EcdsaAlgorithm {
    id: "ES384",
    curve: CurveId::P384,
    order_bits: 384,
};

/// ECDSA using P-521 and SHA-512.
pub const ES512: EcdsaAlgorithm = EcdsaAlgorithm {
    id: "ES512",
    curve: CurveId::P521,
    order_bits: 521,
};

/// Maximum overhead of an ASN.1 DER `ECDSA-Sig-Value` over `R || S`: a
/// SEQUENCE header with a one octet long form length, and two INTEGER headers
/// each with a sign padding octet.
const MAX_DER_OVERHEAD: usize = 3 + 2 * 3;

const RFC_7518_SECTION_3_4: &str =
    "[RFC 7518, Section 3.4](https://www.rfc-editor.org/rfc/rfc7518.html#section-3.4)";

/// Parameters of a request to sign a payload.
#[derive(Clone, Copy, Debug)]
pub struct SignRequest<'a> {
    /// Data to sign.
    pub payload: &'a [u8],

    /// Signing key.
    pub key: &'a Key,
}

impl<'a> SignRequest<'a> {
    /// Create a new signing request.
    pub fn new(payload: &'a [u8], key: &'a Key) -> Self {
        Self { payload, key }
    }
}

/// Parameters of a request to verify a signature.
#[derive(Clone, Copy, Debug)]
pub struct VerifyRequest<'a> {
    /// Signed data.
    pub payload: &'a [u8],

    /// Verification key.
    pub key: &'a Key,

    /// Signature to verify.
    pub signature: &'a [u8],
}

impl<'a> VerifyRequest<'a> {
    /// Create a new verification request.
    pub fn new(payload: &'a [u8], key: &'a Key, signature: &'a [u8]) -> Self {
        Self {
            payload,
            key,
            signature,
        }
    }
}

/// ECDSA JWS algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EcdsaAlgorithm {
    id: &'static str,
    curve: CurveId,
    order_bits: usize,
}

impl EcdsaAlgorithm {
    /// All ECDSA algorithms.
    pub const ALL: [EcdsaAlgorithm; 3] = [ES256, ES384, ES512];

    /// JWS `alg` identifier.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Curve used by this algorithm.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Bit length of the curve order required of keys.
    pub fn order_bits(&self) -> usize {
        self.order_bits
    }

    /// Length of an `R || S` signature.
    pub fn signature_len(&self) -> usize {
        2 * bytes_len(self.order_bits)
    }

    /// Look up an algorithm by its JWS `alg` identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.id == id)
    }

    /// The algorithm for the given curve.
    pub fn for_curve(curve: CurveId) -> Self {
        match curve {
            CurveId::P256 => ES256,
            CurveId::P384 => ES384,
            CurveId::P521 => ES512,
        }
    }

    /// The algorithm whose key size matches an EC key's order bit length.
    pub fn find_by_key(key: &Key) -> Option<Self> {
        match key {
            Key::Ec(key) => {
                let order_bits = key.params().order_bits();
                Self::ALL.into_iter().find(|alg| alg.order_bits == order_bits)
            }
            Key::Rsa(_) | Key::Octet(_) => None,
        }
    }

    /// Generate a key pair on this algorithm's curve.
    pub fn generate_key_pair(&self) -> Result<(EcPrivateKey, EcPublicKey)> {
        RustCryptoEngine.generate_key_pair(self.curve)
    }

    /// Sign a payload, returning an `R || S` signature.
    pub fn sign(&self, request: &SignRequest<'_>) -> Result<Vec<u8>> {
        self.sign_with(&RustCryptoEngine, request)
    }

    /// Sign a payload with the given engine, returning an `R || S` signature.
    pub fn sign_with<E: CryptoEngine>(
        &self,
        engine: &E,
        request: &SignRequest<'_>,
    ) -> Result<Vec<u8>> {
        let key = self.signing_key(request.key)?;

        let der = engine
            .sign_der(key, request.payload)
            .map_err(|e| match e {
                Error::InvalidKey(_) | Error::SigningFailed(_) => e,
                Error::UnsupportedCurve(msg) => Error::InvalidKey(msg),
                other => Error::SigningFailed(other.to_string()),
            })?;

        der::der_to_concat(&der, self.signature_len())
    }

    /// Verify an `R || S` signature using the process-wide [`Config`].
    ///
    /// Returns `Ok(false)` for any signature which cannot be valid, including
    /// signatures of the wrong length or with out-of-range `r`/`s`. Errors are
    /// reserved for keys which may not be used with this algorithm.
    pub fn verify(&self, request: &VerifyRequest<'_>) -> Result<bool> {
        self.verify_with_config(request, Config::current())
    }

    /// Verify a signature using an explicit [`Config`].
    pub fn verify_with_config(&self, request: &VerifyRequest<'_>, config: Config) -> Result<bool> {
        self.verify_with(&RustCryptoEngine, request, config)
    }

    /// Verify a signature with the given engine and [`Config`].
    pub fn verify_with<E: CryptoEngine>(
        &self,
        engine: &E,
        request: &VerifyRequest<'_>,
        config: Config,
    ) -> Result<bool> {
        let key = self.verification_key(request.key)?;
        let signature = request.signature;
        let len = self.signature_len();

        let concat = if signature.len() == len {
            signature.to_vec()
        } else if config.legacy_der_signatures && self.is_plausible_der(signature) {
            match der::der_to_concat(signature, len) {
                Ok(concat) => concat,
                Err(_) => return Ok(false),
            }
        } else {
            tracing::debug!(
                alg = self.id,
                len = signature.len(),
                expected = len,
                "rejecting ECDSA signature with invalid length"
            );
            return Ok(false);
        };

        let (r, s) = concat.split_at(len / 2);

        if !in_range(key.params(), r)? || !in_range(key.params(), s)? {
            tracing::debug!(alg = self.id, "rejecting ECDSA signature with out-of-range r or s");
            return Ok(false);
        }

        let der = der::concat_to_der(&concat)?;

        engine
            .verify_der(key, request.payload, &der)
            .map_err(|e| match e {
                Error::InvalidKey(_) | Error::SignatureVerificationFailed(_) => e,
                Error::UnsupportedCurve(msg) => Error::InvalidKey(msg),
                other => Error::SignatureVerificationFailed(other.to_string()),
            })
    }

    fn signing_key<'k>(&self, key: &'k Key) -> Result<&'k EcPrivateKey> {
        let key = match self.ec_key(key, "signing")? {
            EcKey::Private(key) => key,
            EcKey::Public(_) => {
                return Err(Error::InvalidKey(format!(
                    "{} signing keys must be PrivateKeys. Provided key type: ECPublicKey.",
                    self.id
                )))
            }
        };

        self.check_key_size(key.params(), "signing")?;
        Ok(key)
    }

    fn verification_key<'k>(&self, key: &'k Key) -> Result<&'k EcPublicKey> {
        let key = match self.ec_key(key, "verification")? {
            EcKey::Public(key) => key,
            EcKey::Private(_) => {
                return Err(Error::InvalidKey(format!(
                    "{} verification keys must be PublicKeys. Provided key type: ECPrivateKey.",
                    self.id
                )))
            }
        };

        self.check_key_size(key.params(), "verification")?;
        Ok(key)
    }

    fn ec_key<'k>(&self, key: &'k Key, role: &str) -> Result<&'k EcKey> {
        match key {
            Key::Ec(key) => Ok(key),
            Key::Rsa(_) | Key::Octet(_) => Err(Error::InvalidKey(format!(
                "{} {role} keys must be ECKeys. Provided key type: {}.",
                self.id,
                key.type_name()
            ))),
        }
    }

    fn check_key_size(&self, params: &CurveParameters, role: &str) -> Result<()> {
        let order_bits = params.order_bits();

        if order_bits != self.order_bits {
            return Err(Error::InvalidKey(format!(
                "The provided Elliptic Curve {role} key size (aka order bit length) is {}, \
                 but the '{}' algorithm requires EC Keys with {} per {RFC_7518_SECTION_3_4}.",
                bits_msg(order_bits),
                self.id,
                bits_msg(self.order_bits),
            )));
        }

        Ok(())
    }

    fn is_plausible_der(&self, signature: &[u8]) -> bool {
        signature.first() == Some(&0x30)
            && signature.len() >= 8
            && signature.len() <= self.signature_len() + MAX_DER_OVERHEAD
    }
}

impl fmt::Display for EcdsaAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

/// Is the big-endian `value` in `1..n`?
fn in_range(params: &CurveParameters, value: &[u8]) -> Result<bool> {
    let value = point::decode(value)?;
    let zero = value.ct_eq(&U576::ZERO);
    let below_order = ConstantTimeLess::ct_lt(&value, &params.order);
    Ok((!zero & below_order).into())
}

fn bytes_len(bits: usize) -> usize {
    (bits + 7) / 8
}

fn bits_msg(bits: usize) -> String {
    format!("{bits} bits ({} bytes)", bytes_len(bits))
}
