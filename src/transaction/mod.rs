//! Payload assembly, signing and submission.

pub mod builder;
pub mod nonce;
pub mod pipeline;
pub mod signer;

pub use builder::{random_nonce, Provenance, TransactionBuilder, UnsignedTransaction};
pub use nonce::{NonceCoordinator, SenderGuard};
pub use pipeline::{BroadcastOutcome, SubmissionPipeline};
pub use signer::{canonical_bytes, TransactionSigner};
