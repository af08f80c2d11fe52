#![no_main]
// Targets: DER <-> R || S transcoding, ES256/ES384/ES512 verification
use jwa_ec::{
    ecdsa::{
        der::{concat_to_der, der_to_concat},
        EcdsaAlgorithm, VerifyRequest,
    },
    Config, Key,
};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static KEYS: OnceLock<Vec<(EcdsaAlgorithm, Key)>> = OnceLock::new();

fn keys() -> &'static [(EcdsaAlgorithm, Key)] {
    KEYS.get_or_init(|| {
        EcdsaAlgorithm::ALL
            .into_iter()
            .map(|alg| {
                let (_, public) = alg.generate_key_pair().unwrap();
                (alg, Key::from(public))
            })
            .collect()
    })
}

fuzz_target!(|data: &[u8]| {
    let legacy = Config {
        legacy_der_signatures: true,
    };

    for (alg, key) in keys() {
        let len = alg.signature_len();

        // Anything accepted must re-encode to an equivalent signature
        if let Ok(concat) = der_to_concat(data, len) {
            assert_eq!(concat.len(), len);
            let der = concat_to_der(&concat).unwrap();
            assert_eq!(der_to_concat(&der, len).unwrap(), concat);
        }

        // Random signatures never verify and never error with a valid key
        let request = VerifyRequest::new(b"fuzz", key, data);
        assert!(!alg.verify_with_config(&request, Config::default()).unwrap());
        assert!(!alg.verify_with_config(&request, legacy).unwrap());
    }

    if let Ok(der) = concat_to_der(data) {
        assert_eq!(der_to_concat(&der, data.len()).unwrap(), data);
    }
});
