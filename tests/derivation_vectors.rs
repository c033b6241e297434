//! tests/derivation_vectors.rs
//!
//! Fixed vectors and properties of the HKDF-SHA512 derivation ladder.

use proptest::prelude::*;
use xian_wallet::crypto::{DerivationPath, KeyDerivation};
use xian_wallet::WalletError;

const ROOT_KEY_SEED: &str = "fa7d8d21d90e0dd81191521d54b1ebfa812080daf6f00d083656cc88b108dbdf";
const ROOT_PUBLIC_KEY: &str = "59ada6dbf8e0bf034a650cd155c8221288f1e2560d16ecb5bad0f3fc808c702a";
const BIP44_KEY_SEED: &str = "d93d44eb9a14a26c3c00af69a2a63df10af3f2b9c985e1f4833d9d88451f9b28";
const BIP44_PUBLIC_KEY: &str = "0b041d0913b9d0b1f88e58131019fbed3b4fa21de7e98668e797c8f0e590a221";

fn zero_seed() -> KeyDerivation {
    KeyDerivation::new(&[0u8; 64]).expect("master key")
}

#[test]
fn test_zero_seed_root_vector() {
    let kd = zero_seed();
    let seed = kd.derive_key(&DerivationPath::root()).unwrap();
    assert_eq!(hex::encode(&seed[..]), ROOT_KEY_SEED);

    let wallet = kd.wallet(&DerivationPath::root()).unwrap();
    assert_eq!(wallet.public_key_hex(), ROOT_PUBLIC_KEY);
}

#[test]
fn test_zero_seed_bip44_style_vector() {
    let kd = zero_seed();
    let path: DerivationPath = "m/44/0/0/0/0".parse().unwrap();
    assert_eq!(path, DerivationPath::from([44, 0, 0, 0, 0]));

    let seed = kd.derive_key(&path).unwrap();
    assert_eq!(hex::encode(&seed[..]), BIP44_KEY_SEED);
    assert_eq!(kd.wallet(&path).unwrap().public_key_hex(), BIP44_PUBLIC_KEY);
}

#[test]
fn test_path_from_parts_rejects_negative_and_huge() {
    assert!(matches!(
        DerivationPath::try_from(&[44i64, -1][..]),
        Err(WalletError::InvalidPath(_))
    ));
    assert!(matches!(
        DerivationPath::try_from(&[1i64 << 40][..]),
        Err(WalletError::InvalidPath(_))
    ));
    assert!("44/x/0".parse::<DerivationPath>().is_err());
}

#[test]
fn test_seed_length_is_enforced() {
    assert!(matches!(KeyDerivation::from_slice(&[0u8; 32]), Err(WalletError::InvalidKey(_))));
    assert!(KeyDerivation::from_slice(&[0u8; 64]).is_ok());
}

#[test]
fn test_generate_new_returns_reusable_seed() {
    let (kd, seed) = KeyDerivation::generate_new().unwrap();
    let again = KeyDerivation::new(&seed).unwrap();
    let path = DerivationPath::from([44, 0, 0, 0, 0]);
    assert_eq!(
        kd.wallet(&path).unwrap().public_key_hex(),
        again.wallet(&path).unwrap().public_key_hex()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_derivation_is_deterministic(
        seed in proptest::collection::vec(any::<u8>(), 64),
        path in proptest::collection::vec(0u32..10_000, 0..6),
    ) {
        let path = DerivationPath::from(path);
        let a = KeyDerivation::from_slice(&seed).unwrap().derive_key(&path).unwrap();
        let b = KeyDerivation::from_slice(&seed).unwrap().derive_key(&path).unwrap();
        prop_assert_eq!(&a[..], &b[..]);
    }

    #[test]
    fn prop_extending_a_path_changes_the_key(
        path in proptest::collection::vec(0u32..1_000, 0..5),
        next in 0u32..1_000,
    ) {
        let kd = zero_seed();
        let parent = DerivationPath::from(path);
        let child = parent.child(next);
        let a = kd.derive_key(&parent).unwrap();
        let b = kd.derive_key(&child).unwrap();
        prop_assert_ne!(&a[..], &b[..]);
    }
}
