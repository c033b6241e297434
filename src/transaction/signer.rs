//! Canonical payload encoding and signing.
//!
//! The canonical form is compact JSON with the payload fields in declaration
//! order (`chainId, contract, function, kwargs, nonce, sender, stampsSupplied`)
//! and every map key-sorted. It is byte-identical to the `payload` the node
//! receives, so the node can re-derive it from the submitted JSON.

use tracing::debug;

use crate::blockchain::types::{SignedTransaction, TransactionPayload};
use crate::core::errors::{Result, WalletError};
use crate::crypto::wallet::SigningWallet;

/// Bytes that get signed for `payload`.
pub fn canonical_bytes(payload: &TransactionPayload) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(payload)?)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionSigner;

impl TransactionSigner {
    /// Sign the canonical bytes of `payload` with `wallet`.
    ///
    /// The payload's sender must be the wallet's own public key; a node would
    /// reject anything else, so it is refused here as a local error.
    pub fn sign(payload: &TransactionPayload, wallet: &SigningWallet) -> Result<SignedTransaction> {
        let signer_hex = wallet.public_key_hex();
        if !payload.sender.eq_ignore_ascii_case(&signer_hex) {
            return Err(WalletError::InvalidKey(format!(
                "payload sender {} does not match signing wallet {}",
                payload.sender, signer_hex
            )));
        }

        let message = canonical_bytes(payload)?;
        let signature = wallet.sign(&message);
        debug!(sender = %signer_hex, nonce = payload.nonce, "Signed payload");

        Ok(SignedTransaction { payload: payload.clone(), signature: hex::encode(signature) })
    }

    /// Recompute the canonical bytes and check the signature against the sender
    /// key, the way the node does. Malformed hex yields `false`.
    pub fn verify(signed: &SignedTransaction) -> bool {
        let Ok(message) = canonical_bytes(&signed.payload) else {
            return false;
        };
        let (Ok(signature), Ok(public_key)) =
            (hex::decode(&signed.signature), hex::decode(&signed.payload.sender))
        else {
            return false;
        };
        SigningWallet::verify(&message, &signature, &public_key)
    }
}
