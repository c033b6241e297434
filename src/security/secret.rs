//! Aliases for secret key material that must be zeroized on drop.
use zeroize::Zeroizing;

/// Length of a wallet lineage seed in bytes.
pub const SEED_LEN: usize = 64;

/// Length of an Ed25519 private seed in bytes.
pub const WALLET_KEY_SEED_LEN: usize = 32;

/// Root seed of one wallet lineage. Zeroed when dropped.
pub type Seed = Zeroizing<[u8; SEED_LEN]>;

/// Private scalar seed of a single Ed25519 identity. Zeroed when dropped.
pub type WalletKeySeed = Zeroizing<[u8; WALLET_KEY_SEED_LEN]>;

/// Copy a 32-byte slice into a `WalletKeySeed`, returning `None` on length mismatch.
pub fn wallet_key_seed_from_slice(bytes: &[u8]) -> Option<WalletKeySeed> {
    if bytes.len() != WALLET_KEY_SEED_LEN {
        return None;
    }
    let mut seed = Zeroizing::new([0u8; WALLET_KEY_SEED_LEN]);
    seed.copy_from_slice(bytes);
    Some(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_key_seed_from_slice() {
        let seed = wallet_key_seed_from_slice(&[7u8; 32]).unwrap();
        assert_eq!(seed.as_slice(), &[7u8; 32]);
        assert!(wallet_key_seed_from_slice(&[7u8; 31]).is_none());
        assert!(wallet_key_seed_from_slice(&[7u8; 33]).is_none());
    }
}
