//! Ed25519 signing identity.
//!
//! A `SigningWallet` owns one private seed. The public key is always recomputed
//! from it, never accepted from outside alongside it.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::errors::{Result, WalletError};
use crate::crypto::seed::SeedGenerator;
use crate::security::redaction::redact_hex_bytes;
use crate::security::secret::{wallet_key_seed_from_slice, WalletKeySeed, WALLET_KEY_SEED_LEN};

pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

pub struct SigningWallet {
    signing_key: SigningKey,
    public_key: [u8; PUBLIC_KEY_LEN],
}

impl SigningWallet {
    /// Generate a fresh key pair from `SeedGenerator` randomness.
    ///
    /// # Panics
    /// If the OS entropy source is unavailable, like `SeedGenerator::generate_seed`.
    pub fn generate() -> Self {
        let seed = SeedGenerator::new().generate_key_seed();
        let wallet = Self::from_seed(&seed);
        info!(public_key = %wallet.public_key_hex(), "Generated new wallet");
        wallet
    }

    /// Rebuild a wallet from its 32-byte private seed.
    pub fn from_seed(seed: &[u8; WALLET_KEY_SEED_LEN]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Like `from_seed`, but checks the length first.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let seed = wallet_key_seed_from_slice(bytes).ok_or_else(|| {
            WalletError::InvalidKey(format!(
                "private seed must be {} bytes, got {}",
                WALLET_KEY_SEED_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self::from_seed(&seed))
    }

    /// Restore from a lowercase or uppercase hex private seed, `0x` prefix optional.
    pub fn from_hex(private_key_hex: &str) -> Result<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(hex::decode(key_hex)?);
        Self::from_slice(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = signing_key.verifying_key().to_bytes();
        debug!("Wallet key pair ready");
        Self { signing_key, public_key }
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public_key
    }

    /// Lowercase hex public key; this is the wallet's address on the ledger.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    /// Copy of the private seed. Zeroed when the returned buffer drops.
    pub fn private_seed(&self) -> WalletKeySeed {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Hex export of the private seed, for backups.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.private_seed().as_slice()))
    }

    /// Deterministic RFC 8032 signature over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Verify a signature made by this wallet.
    pub fn verify_own(&self, message: &[u8], signature: &[u8]) -> bool {
        Self::verify(message, signature, &self.public_key)
    }

    /// Check `signature` over `message` against `public_key`.
    ///
    /// Never fails loudly: wrong lengths, undecodable points and bad signatures
    /// all return `false`.
    pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        let Some(verifying_key) = decode_public_key(public_key) else {
            return false;
        };
        verifying_key.verify(message, &signature).is_ok()
    }

    /// True iff `bytes` is a 32-byte encoding of a point on the curve.
    ///
    /// Small-order points are accepted; prime-order subgroup membership is not checked.
    pub fn is_valid_public_key(bytes: &[u8]) -> bool {
        decode_public_key(bytes).is_some()
    }
}

fn decode_public_key(bytes: &[u8]) -> Option<VerifyingKey> {
    let bytes: &[u8; PUBLIC_KEY_LEN] = bytes.try_into().ok()?;
    VerifyingKey::from_bytes(bytes).ok()
}

impl fmt::Debug for SigningWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningWallet")
            .field("public_key", &self.public_key_hex())
            .field("private_seed", &redact_hex_bytes(self.signing_key.as_bytes()))
            .finish()
    }
}
