//! ES256/ES384/ES512 benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use hex_literal::hex;
use jwa_ec::{
    ecdsa::{der, EcdsaAlgorithm, SignRequest, VerifyRequest},
    Config, Key,
};
use std::hint::black_box;

const PAYLOAD: [u8; 32] = hex!("1cf6bc6c7f642a84994119e206c9f0753ff100709f4fd12f2338c1be60bf4175");

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ECDSA");

    for alg in EcdsaAlgorithm::ALL {
        let (private, public) = alg.generate_key_pair().unwrap();
        let (private, public) = (Key::from(private), Key::from(public));
        let signature = alg.sign(&SignRequest::new(&PAYLOAD, &private)).unwrap();

        group.bench_function(format!("{alg} sign"), |b| {
            b.iter(|| alg.sign(&SignRequest::new(black_box(&PAYLOAD), &private)))
        });

        group.bench_function(format!("{alg} verify"), |b| {
            b.iter(|| {
                let request = VerifyRequest::new(black_box(&PAYLOAD), &public, &signature);
                alg.verify_with_config(&request, Config::default())
            })
        });
    }

    group.finish();
}

fn bench_transcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");

    for alg in EcdsaAlgorithm::ALL {
        let concat = vec![0xa5; alg.signature_len()];
        let encoded = der::concat_to_der(&concat).unwrap();

        group.bench_function(format!("{alg} concat to DER"), |b| {
            b.iter(|| der::concat_to_der(black_box(&concat)))
        });

        group.bench_function(format!("{alg} DER to concat"), |b| {
            b.iter(|| der::der_to_concat(black_box(&encoded), alg.signature_len()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ecdsa, bench_transcode);
criterion_main!(benches);
