//! Random seed material for new wallet lineages.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::security::secret::{Seed, WalletKeySeed, SEED_LEN, WALLET_KEY_SEED_LEN};

/// Source of cryptographically secure seed material.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedGenerator;

impl SeedGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Fill a fresh 64-byte seed from the operating system's CSPRNG.
    ///
    /// # Panics
    /// If the OS entropy source is unavailable. There is no meaningful way to
    /// continue constructing key material without it.
    pub fn generate_seed(&self) -> Seed {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        fill_from_os(seed.as_mut());
        seed
    }

    /// Fresh 32-byte Ed25519 private seed for a standalone random wallet.
    ///
    /// # Panics
    /// Under the same condition as `generate_seed`.
    pub fn generate_key_seed(&self) -> WalletKeySeed {
        let mut seed = Zeroizing::new([0u8; WALLET_KEY_SEED_LEN]);
        fill_from_os(seed.as_mut());
        seed
    }
}

fn fill_from_os(buf: &mut [u8]) {
    if let Err(e) = OsRng.try_fill_bytes(buf) {
        panic!("OS entropy source unavailable: {}", e);
    }
}

/// Shorthand for `SeedGenerator::new().generate_seed()`.
pub fn generate_seed() -> Seed {
    SeedGenerator::new().generate_seed()
}
