// src/security/mod.rs
//! Secret handling helpers shared by the key derivation and signing code.

pub mod redaction;
pub mod secret;

pub use redaction::{redact_body, redact_hex_bytes};
pub use secret::{Seed, WalletKeySeed, SEED_LEN, WALLET_KEY_SEED_LEN};
