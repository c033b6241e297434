//! Deterministic key derivation ladder.
//!
//! ```text
//! seed (64 bytes)
//!    ↓  HKDF-SHA512 extract + expand (no salt, no info)
//! master key (64 bytes)
//!    ↓  HKDF-SHA512 expand only, PRK = current, info = decimal(index)   (once per segment)
//! child key state (64 bytes)
//!    ↓  first 32 bytes
//! Ed25519 private seed
//! ```
//!
//! Every segment uses the same step. There is no hardened/normal split and no
//! extra domain separation; node-side recomputation must match bit for bit.

use std::fmt;
use std::str::FromStr;

use hkdf::Hkdf;
use sha2::Sha512;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::errors::{Result, WalletError};
use crate::crypto::seed::SeedGenerator;
use crate::crypto::wallet::SigningWallet;
use crate::security::secret::{Seed, WalletKeySeed, SEED_LEN, WALLET_KEY_SEED_LEN};

const KEY_STATE_LEN: usize = 64;

/// Ordered list of child indices. Empty means the root wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend the path by one segment.
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl From<&[u32]> for DerivationPath {
    fn from(indices: &[u32]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for DerivationPath {
    fn from(indices: [u32; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl TryFrom<&[i64]> for DerivationPath {
    type Error = WalletError;

    fn try_from(segments: &[i64]) -> Result<Self> {
        segments
            .iter()
            .enumerate()
            .map(|(pos, &segment)| {
                u32::try_from(segment).map_err(|_| {
                    WalletError::InvalidPath(format!(
                        "segment {} at position {} is not a non-negative 32-bit index",
                        segment, pos
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()
            .map(Self)
    }
}

/// Parses `"44/0/0"`, `"m/44/0/0"`, and `""` / `"m"` for the root.
impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = match trimmed {
            "" | "m" | "M" => return Ok(Self::root()),
            _ => trimmed
                .strip_prefix("m/")
                .or_else(|| trimmed.strip_prefix("M/"))
                .unwrap_or(trimmed),
        };

        body.split('/')
            .enumerate()
            .map(|(pos, segment)| {
                let valid = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
                if !valid {
                    return Err(WalletError::InvalidPath(format!(
                        "segment '{}' at position {} is not a decimal index",
                        segment, pos
                    )));
                }
                segment.parse::<u32>().map_err(|_| {
                    WalletError::InvalidPath(format!(
                        "segment '{}' at position {} exceeds {}",
                        segment,
                        pos,
                        u32::MAX
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()
            .map(Self)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// Derives wallet key seeds from one root seed.
///
/// Holds only the master key computed at construction; derivation never mutates it.
pub struct KeyDerivation {
    master_key: Zeroizing<[u8; KEY_STATE_LEN]>,
}

impl KeyDerivation {
    /// Build from a 64-byte seed, running the full HKDF extract + expand pass once.
    pub fn new(seed: &[u8; SEED_LEN]) -> Result<Self> {
        let hk = Hkdf::<Sha512>::new(None, seed);
        let mut master_key = Zeroizing::new([0u8; KEY_STATE_LEN]);
        hk.expand(&[], master_key.as_mut()).map_err(|e| {
            WalletError::KeyDerivation(format!("master key expansion failed: {}", e))
        })?;
        debug!("Master key derived from seed");
        Ok(Self { master_key })
    }

    /// Like `new`, but checks the seed length first.
    pub fn from_slice(seed: &[u8]) -> Result<Self> {
        let seed: &[u8; SEED_LEN] = seed.try_into().map_err(|_| {
            WalletError::InvalidKey(format!("seed must be {} bytes, got {}", SEED_LEN, seed.len()))
        })?;
        Self::new(seed)
    }

    /// Start a new lineage from a freshly generated seed.
    ///
    /// The seed is returned so the caller can back it up; it is the only way to
    /// recreate the lineage.
    pub fn generate_new() -> Result<(Self, Seed)> {
        let seed = SeedGenerator::new().generate_seed();
        let derivation = Self::new(&seed)?;
        info!("Created new derivation root");
        Ok((derivation, seed))
    }

    /// Walk `path` from the master key and return the 32-byte Ed25519 private seed.
    pub fn derive_key(&self, path: &DerivationPath) -> Result<WalletKeySeed> {
        let mut current = Zeroizing::new(*self.master_key);

        for &index in path.indices() {
            let hk = Hkdf::<Sha512>::from_prk(current.as_ref()).map_err(|e| {
                WalletError::KeyDerivation(format!("invalid key state at index {}: {}", index, e))
            })?;
            let mut next = Zeroizing::new([0u8; KEY_STATE_LEN]);
            hk.expand(index.to_string().as_bytes(), next.as_mut()).map_err(|e| {
                WalletError::KeyDerivation(format!("expansion failed at index {}: {}", index, e))
            })?;
            current = next;
        }

        let mut key_seed = Zeroizing::new([0u8; WALLET_KEY_SEED_LEN]);
        key_seed.copy_from_slice(&current[..WALLET_KEY_SEED_LEN]);
        debug!(path = %path, "Derived wallet key seed");
        Ok(key_seed)
    }

    /// Derive the key seed at `path` and wrap it in a signing wallet.
    pub fn wallet(&self, path: &DerivationPath) -> Result<SigningWallet> {
        let key_seed = self.derive_key(path)?;
        let wallet = SigningWallet::from_seed(&key_seed);
        info!(path = %path, public_key = %wallet.public_key_hex(), "Derived wallet");
        Ok(wallet)
    }
}

impl fmt::Debug for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDerivation").field("master_key", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_seed_derivation() -> KeyDerivation {
        KeyDerivation::new(&[0u8; SEED_LEN]).unwrap()
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let path = DerivationPath::from([44, 0, 0, 0, 0]);
        let k1 = zero_seed_derivation().derive_key(&path).unwrap();
        let k2 = zero_seed_derivation().derive_key(&path).unwrap();
        assert_eq!(k1.as_slice(), k2.as_slice());
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn test_root_path_is_master_key_prefix() {
        let kd = zero_seed_derivation();
        let root = kd.derive_key(&DerivationPath::root()).unwrap();
        assert_eq!(root.as_slice(), &kd.master_key[..32]);

        // Master key is plain RFC 5869 HKDF-SHA512 over the seed.
        let hk = Hkdf::<Sha512>::new(None, &[0u8; SEED_LEN]);
        let mut expected = [0u8; 64];
        hk.expand(&[], &mut expected).unwrap();
        assert_eq!(&expected[..], &kd.master_key[..]);
    }

    #[test]
    fn test_single_step_is_expand_only() {
        let kd = zero_seed_derivation();
        let child = kd.derive_key(&DerivationPath::from([7])).unwrap();

        let hk = Hkdf::<Sha512>::from_prk(&kd.master_key[..]).unwrap();
        let mut expected = [0u8; 64];
        hk.expand(b"7", &mut expected).unwrap();
        assert_eq!(child.as_slice(), &expected[..32]);
    }

    #[test]
    fn test_path_sensitivity() {
        let kd = zero_seed_derivation();
        let a = kd.derive_key(&DerivationPath::from([0, 1])).unwrap();
        let b = kd.derive_key(&DerivationPath::from([1, 0])).unwrap();
        let c = kd.derive_key(&DerivationPath::from([0])).unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
        assert_ne!(a.as_slice(), c.as_slice());
    }

    #[test]
    fn test_different_seeds_differ() {
        let path = DerivationPath::from([44, 0]);
        let a = KeyDerivation::new(&[0u8; 64]).unwrap().derive_key(&path).unwrap();
        let b = KeyDerivation::new(&[1u8; 64]).unwrap().derive_key(&path).unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_path_parsing() {
        assert_eq!("m/44/0/0".parse::<DerivationPath>().unwrap().indices(), &[44, 0, 0]);
        assert_eq!("44/0".parse::<DerivationPath>().unwrap().indices(), &[44, 0]);
        assert!("m".parse::<DerivationPath>().unwrap().is_root());
        assert!("".parse::<DerivationPath>().unwrap().is_root());
        assert_eq!(DerivationPath::from([44, 0, 1]).to_string(), "m/44/0/1");
    }

    #[test]
    fn test_invalid_paths_rejected() {
        for bad in ["m/44'/0", "m/-1", "m/1.5", "m//0", "m/abc", "m/4294967296"] {
            let err = bad.parse::<DerivationPath>().unwrap_err();
            assert!(matches!(err, WalletError::InvalidPath(_)), "{} should be rejected", bad);
        }
        let err = DerivationPath::try_from(&[44i64, -1][..]).unwrap_err();
        assert!(matches!(err, WalletError::InvalidPath(_)));
        assert!(DerivationPath::try_from(&[44i64, 0, 0][..]).is_ok());
    }

    #[test]
    fn test_seed_length_checked() {
        assert!(matches!(
            KeyDerivation::from_slice(&[0u8; 32]).unwrap_err(),
            WalletError::InvalidKey(_)
        ));
    }

    #[test]
    fn test_wallet_matches_derived_seed() {
        let kd = zero_seed_derivation();
        let path = DerivationPath::from([44, 0, 0, 0, 0]);
        let wallet = kd.wallet(&path).unwrap();
        let seed = kd.derive_key(&path).unwrap();
        assert_eq!(wallet.public_key(), SigningWallet::from_seed(&seed).public_key());
    }
}
