//! Dry-run and broadcast of payloads for one signing wallet.

use std::sync::Arc;

use tracing::{info, warn};

use crate::blockchain::traits::NodeClient;
use crate::blockchain::types::{
    Admission, SignedTransaction, SimulationResult, TransactionPayload, TransactionState,
};
use crate::core::config::ClientConfig;
use crate::core::errors::{FailureKind, NodeError, Result};
use crate::core::value::Kwargs;
use crate::crypto::wallet::SigningWallet;
use crate::transaction::builder::{Provenance, TransactionBuilder, UnsignedTransaction};
use crate::transaction::nonce::NonceCoordinator;
use crate::transaction::signer::TransactionSigner;

/// What happened to a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// The node admitted the transaction. Execution results must be polled separately.
    Accepted,
    /// The node answered and refused the transaction.
    Rejected { status: u16, reason: String },
    /// Nothing usable came back from the node, or broadcast was not attempted.
    Failed(NodeError),
}

impl BroadcastOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BroadcastOutcome::Accepted)
    }

    /// `Accepted` or `Rejected`; a failed broadcast leaves the transaction `Signed`.
    pub fn state(&self) -> TransactionState {
        match self {
            BroadcastOutcome::Accepted => TransactionState::Accepted,
            BroadcastOutcome::Rejected { .. } => TransactionState::Rejected,
            BroadcastOutcome::Failed(_) => TransactionState::Signed,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            BroadcastOutcome::Failed(e) => Some(e.kind),
            _ => None,
        }
    }
}

impl From<Admission> for BroadcastOutcome {
    fn from(admission: Admission) -> Self {
        match admission {
            Admission::Accepted => BroadcastOutcome::Accepted,
            Admission::Rejected { status, reason } => BroadcastOutcome::Rejected { status, reason },
        }
    }
}

pub struct SubmissionPipeline {
    client: Arc<dyn NodeClient>,
    wallet: SigningWallet,
    builder: TransactionBuilder,
    nonces: NonceCoordinator,
}

impl SubmissionPipeline {
    pub fn new(client: Arc<dyn NodeClient>, wallet: SigningWallet) -> Self {
        let builder = TransactionBuilder::new(client.clone(), wallet.public_key_hex());
        Self { client, wallet, builder, nonces: NonceCoordinator::new() }
    }

    /// Like `new`, taking the fallback chain id from `config`.
    pub fn with_config(
        client: Arc<dyn NodeClient>,
        wallet: SigningWallet,
        config: &ClientConfig,
    ) -> Self {
        let mut pipeline = Self::new(client, wallet);
        pipeline.builder =
            pipeline.builder.with_fallback_chain_id(config.fallback_chain_id.clone());
        pipeline
    }

    /// Share a lock table with other pipelines that may submit for the same sender.
    pub fn with_nonce_coordinator(mut self, nonces: NonceCoordinator) -> Self {
        self.nonces = nonces;
        self
    }

    pub fn wallet(&self) -> &SigningWallet {
        &self.wallet
    }

    pub fn builder(&self) -> &TransactionBuilder {
        &self.builder
    }

    pub async fn create_unsigned(
        &self,
        contract: &str,
        function: &str,
        kwargs: Kwargs,
    ) -> UnsignedTransaction {
        self.builder.create_unsigned(contract, function, kwargs).await
    }

    pub fn sign(&self, payload: &TransactionPayload) -> Result<SignedTransaction> {
        TransactionSigner::sign(payload, &self.wallet)
    }

    /// Dry-run the unsigned payload. No ledger or nonce state changes.
    pub async fn simulate(&self, payload: &TransactionPayload) -> SimulationResult {
        match self.client.simulate(payload).await {
            Ok(result) => {
                info!(
                    contract = %payload.contract,
                    function = %payload.function,
                    success = result.success,
                    stamps_used = result.stamps_used,
                    "Simulation finished"
                );
                result
            }
            Err(e) => {
                warn!(endpoint = self.client.endpoint(), error = %e, "Simulation failed");
                SimulationResult::failed(&e)
            }
        }
    }

    /// Sign `payload` and post it to the node.
    ///
    /// Errors only for local problems (sender mismatch, encoding); node and
    /// transport failures come back as `BroadcastOutcome::Failed`. No retries.
    pub async fn broadcast(&self, payload: &TransactionPayload) -> Result<BroadcastOutcome> {
        let signed = self.sign(payload)?;
        Ok(self.broadcast_signed(&signed).await)
    }

    /// Post an already signed transaction.
    pub async fn broadcast_signed(&self, signed: &SignedTransaction) -> BroadcastOutcome {
        let outcome = match self.client.submit(signed).await {
            Ok(admission) => BroadcastOutcome::from(admission),
            Err(e) => BroadcastOutcome::Failed(e),
        };
        match &outcome {
            BroadcastOutcome::Accepted => {
                info!(
                    sender = %signed.payload.sender,
                    nonce = signed.payload.nonce,
                    "Transaction accepted"
                )
            }
            BroadcastOutcome::Rejected { status, .. } => {
                warn!(
                    sender = %signed.payload.sender,
                    nonce = signed.payload.nonce,
                    status,
                    "Transaction rejected"
                )
            }
            BroadcastOutcome::Failed(e) => {
                warn!(
                    sender = %signed.payload.sender,
                    nonce = signed.payload.nonce,
                    error = %e,
                    "Broadcast failed"
                )
            }
        }
        outcome
    }

    /// Build, sign and broadcast while holding this sender's lock, so that
    /// concurrent submissions through the same coordinator never reuse a nonce.
    ///
    /// A payload whose nonce had to be replaced by a random placeholder is not
    /// broadcast; the outcome carries the nonce lookup error instead.
    pub async fn submit(
        &self,
        contract: &str,
        function: &str,
        kwargs: Kwargs,
    ) -> Result<BroadcastOutcome> {
        let _guard = self.nonces.acquire(self.builder.sender()).await;
        let unsigned = self.create_unsigned(contract, function, kwargs).await;

        if let Provenance::Fallback(e) = unsigned.nonce_source {
            warn!(contract, function, error = %e, "Not broadcasting without a node nonce");
            return Ok(BroadcastOutcome::Failed(e));
        }
        self.broadcast(&unsigned.payload).await
    }
}
