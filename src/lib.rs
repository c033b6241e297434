#![allow(clippy::needless_return)]
#![allow(clippy::len_zero)]
// src/lib.rs
//! Client-side wallet and transaction toolkit for Xian ledger nodes.
//!
//! Keys come from a 64-byte seed through an HKDF-SHA512 ladder, transactions are
//! signed with Ed25519 over a canonical JSON encoding, and everything that
//! touches the network goes through the `NodeClient` trait.

pub mod blockchain;
pub mod cli;
pub mod core;
pub mod crypto;
pub mod network;
pub mod security;
pub mod service;
pub mod transaction;

pub use crate::core::{ClientConfig, FailureKind, NodeError, Result, WalletError};
pub use crate::crypto::{DerivationPath, KeyDerivation, SeedGenerator, SigningWallet};
pub use crate::transaction::{
    BroadcastOutcome, SubmissionPipeline, TransactionBuilder, TransactionSigner,
};
