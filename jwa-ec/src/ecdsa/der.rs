//! ASN.1 DER <-> JOSE signature transcoding.
//!
//! ECDSA implementations produce the ASN.1 DER encoding of
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```
//!
//! whereas JWS ([RFC 7518 Section 3.4]) requires the fixed-width
//! concatenation `R || S`, each half left-padded with zeros to the byte length
//! of the curve order.
//!
//! The `ECDSA-Sig-Value` is decoded with the `der` crate, which rejects
//! non-canonical encodings such as redundant leading zeros and non-minimal
//! lengths. On top of that only the length forms an `ECDSA-Sig-Value` can need
//! for the supported curves are accepted: short form, and long form with a
//! single length octet.
//!
//! [RFC 7518 Section 3.4]: https://www.rfc-editor.org/rfc/rfc7518.html#section-3.4

use crate::{Error, Result};
use ::der::{
    asn1::UintRef, Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence,
    SliceReader, Tag, Writer,
};

/// ASN.1 `SEQUENCE` tag.
const SEQUENCE_TAG: u8 = 0x30;

/// Long form length with a single length octet.
const LONG_FORM_1: u8 = 0x81;

/// Smallest possible `ECDSA-Sig-Value`: two single-octet integers.
const MIN_DER_LEN: usize = 8;

/// Convert an ASN.1 DER `ECDSA-Sig-Value` into the `R || S` form of
/// `output_len` bytes.
pub fn der_to_concat(der: &[u8], output_len: usize) -> Result<Vec<u8>> {
    if output_len == 0 || output_len % 2 != 0 {
        return Err(malformed(format!(
            "R || S length must be even and non-zero, got {output_len}"
        )));
    }

    if der.len() < MIN_DER_LEN || der[0] != SEQUENCE_TAG {
        return Err(malformed("expected ASN.1 DER SEQUENCE"));
    }

    if der[1] > LONG_FORM_1 {
        return Err(malformed("unsupported DER length encoding"));
    }

    let sig = decode_signature(der).map_err(|e| malformed(e.to_string()))?;

    let half = output_len / 2;
    let r = integer_bytes(&sig.r, half)?;
    let s = integer_bytes(&sig.s, half)?;

    let mut concat = vec![0u8; output_len];
    concat[half - r.len()..half].copy_from_slice(r);
    concat[output_len - s.len()..].copy_from_slice(s);
    Ok(concat)
}

/// Convert an `R || S` signature into an ASN.1 DER `ECDSA-Sig-Value`.
pub fn concat_to_der(concat: &[u8]) -> Result<Vec<u8>> {
    if concat.is_empty() || concat.len() % 2 != 0 {
        return Err(malformed(format!(
            "R || S length must be even and non-zero, got {}",
            concat.len()
        )));
    }

    let (r, s) = concat.split_at(concat.len() / 2);
    let der = encode_signature(r, s).map_err(|e| malformed(e.to_string()))?;

    // Must be readable by `der_to_concat`.
    if der[1] > LONG_FORM_1 {
        return Err(malformed("signature is too long to DER encode"));
    }

    Ok(der)
}

/// Decode a complete `ECDSA-Sig-Value`, rejecting trailing data.
fn decode_signature(der: &[u8]) -> ::der::Result<SignatureRef<'_>> {
    let mut reader = SliceReader::new(der)?;
    let header = Header::decode(&mut reader)?;
    header.tag.assert_eq(Tag::Sequence)?;

    let sig = reader.read_nested(header.length, |reader| {
        SignatureRef::decode_value(reader, header)
    })?;

    reader.finish(sig)
}

fn encode_signature(r: &[u8], s: &[u8]) -> ::der::Result<Vec<u8>> {
    SignatureRef {
        r: UintRef::new(r)?,
        s: UintRef::new(s)?,
    }
    .to_der()
}

/// Magnitude of an `INTEGER` which must fit in `half` octets once sign
/// padding is removed.
fn integer_bytes<'a>(value: &'a UintRef<'_>, half: usize) -> Result<&'a [u8]> {
    let encoded_len = value
        .value_len()
        .and_then(usize::try_from)
        .map_err(|e| malformed(e.to_string()))?;

    // One extra octet is allowed for the sign padding.
    if encoded_len > half + 1 || value.as_bytes().len() > half {
        return Err(malformed("DER INTEGER is too wide for the curve"));
    }

    Ok(value.as_bytes())
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> ::der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> ::der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> ::der::Result<Self> {
        Ok(Self {
            r: UintRef::decode(reader)?,
            s: UintRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}

fn malformed(reason: impl Into<String>) -> Error {
    let reason = reason.into();
    tracing::debug!(%reason, "ECDSA signature transcoding failed");
    Error::MalformedSignature(reason)
}
