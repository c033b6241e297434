pub mod kdf;
pub mod seed;
pub mod wallet;

pub use self::kdf::{DerivationPath, KeyDerivation};
pub use self::seed::{generate_seed, SeedGenerator};
pub use self::wallet::{SigningWallet, PUBLIC_KEY_LEN, SIGNATURE_LEN};
