//! Fixed-width coordinate encoding tests.

use elliptic_curve::bigint::Encoding as _;
use jwa_ec::{point, CurveId, U576};
use proptest::prelude::*;

/// Build a value from up to 72 big-endian octets, keeping only the low
/// `field_bits` bits.
fn masked(field_bits: usize, bytes: &[u8]) -> U576 {
    let len = (field_bits + 7) / 8;
    let mut buf = [0u8; 72];
    buf[72 - len..].copy_from_slice(&bytes[..len]);

    if field_bits % 8 != 0 {
        buf[72 - len] &= (1u8 << (field_bits % 8)) - 1;
    }

    U576::from_be_bytes(buf)
}

fn assert_round_trip(curve: CurveId, value: &U576) {
    let field_bits = curve.parameters().field_bits();
    let encoded = point::encode(field_bits, value).unwrap();
    assert_eq!(encoded.len(), curve.parameters().field_bytes(), "{curve}");
    assert_eq!(&point::decode(&encoded).unwrap(), value, "{curve}");
}

#[test]
fn zero_round_trips() {
    for curve in CurveId::ALL {
        assert_round_trip(curve, &U576::ZERO);
    }
}

#[test]
fn largest_value_round_trips() {
    for curve in CurveId::ALL {
        let field_bits = curve.parameters().field_bits();
        let max = masked(field_bits, &[0xff; 72]);
        assert_eq!(max.bits(), field_bits);
        assert_round_trip(curve, &max);
    }

    let max = masked(521, &[0xff; 72]);
    let encoded = point::encode(521, &max).unwrap();
    assert_eq!(encoded[0], 0x01);
    assert!(encoded[1..].iter().all(|&b| b == 0xff));
}

proptest! {
    #[test]
    fn p256_round_trip(bytes in any::<[u8; 32]>()) {
        let value = masked(256, &bytes);
        let encoded = point::encode(256, &value).unwrap();
        prop_assert_eq!(encoded.len(), 32);
        prop_assert_eq!(point::decode(&encoded).unwrap(), value);
    }

    #[test]
    fn p384_round_trip(bytes in proptest::collection::vec(any::<u8>(), 48)) {
        let value = masked(384, &bytes);
        let encoded = point::encode(384, &value).unwrap();
        prop_assert_eq!(encoded.len(), 48);
        prop_assert_eq!(point::decode(&encoded).unwrap(), value);
    }

    #[test]
    fn p521_round_trip(bytes in proptest::collection::vec(any::<u8>(), 66)) {
        let value = masked(521, &bytes);
        let encoded = point::encode(521, &value).unwrap();
        prop_assert_eq!(encoded.len(), 66);
        prop_assert_eq!(point::decode(&encoded).unwrap(), value);
    }
}
