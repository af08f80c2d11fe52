#![no_main]
// Targets: EC public JWK import
use jwa_ec::{point::is_on_curve, EcJwkFactory};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(values) = serde_json::from_slice::<Map<String, Value>>(data) else {
        return;
    };

    let factory = EcJwkFactory::new();

    if let Ok(jwk) = factory.from_values(&values) {
        // Only points on the named curve may be imported
        assert!(is_on_curve(jwk.curve().parameters(), jwk.point()));

        let exported = jwk.to_values().unwrap();
        assert_eq!(factory.from_values(&exported).unwrap(), jwk);
    }
});
