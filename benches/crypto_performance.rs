//! Derivation and signing benchmarks.
//!
//! Targets: path derivation and a full build-encode-sign pass both well under 1ms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xian_wallet::blockchain::types::TransactionPayload;
use xian_wallet::core::value::Kwargs;
use xian_wallet::crypto::{DerivationPath, KeyDerivation, SigningWallet};
use xian_wallet::transaction::{canonical_bytes, TransactionSigner};

fn bench_key_derivation(c: &mut Criterion) {
    let kd = KeyDerivation::new(&[7u8; 64]).expect("master key");
    let path: DerivationPath = "m/44/0/0/0/0".parse().expect("path");

    c.bench_function("derive_key_depth_5", |b| {
        b.iter(|| kd.derive_key(black_box(&path)).expect("derive failed"));
    });

    c.bench_function("master_key_from_seed", |b| {
        b.iter(|| KeyDerivation::new(black_box(&[7u8; 64])).expect("master key"));
    });
}

fn bench_signing(c: &mut Criterion) {
    let wallet = SigningWallet::from_seed(&[1u8; 32]);
    let message = b"transfer 100 to bob";

    c.bench_function("ed25519_sign", |b| {
        b.iter(|| wallet.sign(black_box(message)));
    });
}

fn bench_full_signing_flow(c: &mut Criterion) {
    let wallet = SigningWallet::from_seed(&[1u8; 32]);
    let mut kwargs = Kwargs::new();
    kwargs.insert("to".into(), "bob".into());
    kwargs.insert("amount".into(), 100i64.into());
    let payload = TransactionPayload {
        chain_id: "xian-1".into(),
        contract: "currency".into(),
        function: "transfer".into(),
        kwargs,
        nonce: 42,
        sender: wallet.public_key_hex(),
        stamps_supplied: 0,
    };

    c.bench_function("canonical_bytes", |b| {
        b.iter(|| canonical_bytes(black_box(&payload)).expect("encode failed"));
    });

    c.bench_function("sign_payload", |b| {
        b.iter(|| TransactionSigner::sign(black_box(&payload), &wallet).expect("sign failed"));
    });
}

criterion_group!(benches, bench_key_derivation, bench_signing, bench_full_signing_flow);
criterion_main!(benches);
