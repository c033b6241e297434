//! Assembles unsigned payloads, pulling chain id and nonce from the node.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};

use crate::blockchain::traits::NodeClient;
use crate::blockchain::types::{TransactionPayload, TransactionState};
use crate::core::config::DEFAULT_FALLBACK_CHAIN_ID;
use crate::core::errors::NodeError;
use crate::core::value::Kwargs;

/// Where a metadata field of a payload came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Node,
    /// The node lookup failed with this error and a local value was substituted.
    Fallback(NodeError),
}

impl Provenance {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Provenance::Fallback(_))
    }
}

/// A payload together with how trustworthy its chain id and nonce are.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedTransaction {
    pub payload: TransactionPayload,
    pub chain_id_source: Provenance,
    pub nonce_source: Provenance,
}

impl UnsignedTransaction {
    /// False when the nonce is a random placeholder. Such a payload is fine for
    /// simulation but should be rebuilt with a node nonce before broadcast.
    pub fn is_broadcast_safe(&self) -> bool {
        !self.nonce_source.is_fallback()
    }

    pub fn state(&self) -> TransactionState {
        TransactionState::Unsigned
    }

    pub fn into_payload(self) -> TransactionPayload {
        self.payload
    }
}

/// Random non-negative 63-bit nonce used when the node cannot supply one.
pub fn random_nonce() -> u64 {
    OsRng.next_u64() >> 1
}

#[derive(Clone)]
pub struct TransactionBuilder {
    client: Arc<dyn NodeClient>,
    sender: String,
    fallback_chain_id: String,
}

impl TransactionBuilder {
    /// Builder for payloads sent by `sender` (hex public key).
    pub fn new(client: Arc<dyn NodeClient>, sender: impl Into<String>) -> Self {
        Self {
            client,
            sender: sender.into(),
            fallback_chain_id: DEFAULT_FALLBACK_CHAIN_ID.to_string(),
        }
    }

    pub fn with_fallback_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.fallback_chain_id = chain_id.into();
        self
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Assemble a payload with `stampsSupplied = 0`.
    ///
    /// Never fails: node errors are replaced by the fallback chain id or a random
    /// nonce and recorded in the returned provenance.
    pub async fn create_unsigned(
        &self,
        contract: &str,
        function: &str,
        kwargs: Kwargs,
    ) -> UnsignedTransaction {
        let (chain_id, chain_id_source) = self.fetch_chain_id().await;
        let (nonce, nonce_source) = self.fetch_nonce().await;

        debug!(
            contract,
            function,
            chain_id = %chain_id,
            nonce,
            "Built unsigned payload"
        );

        UnsignedTransaction {
            payload: TransactionPayload {
                chain_id,
                contract: contract.to_string(),
                function: function.to_string(),
                kwargs,
                nonce,
                sender: self.sender.clone(),
                stamps_supplied: 0,
            },
            chain_id_source,
            nonce_source,
        }
    }

    async fn fetch_chain_id(&self) -> (String, Provenance) {
        match self.client.chain_id().await {
            Ok(chain_id) => (chain_id, Provenance::Node),
            Err(e) => {
                warn!(
                    endpoint = self.client.endpoint(),
                    error = %e,
                    fallback = %self.fallback_chain_id,
                    "Chain id unavailable, using fallback"
                );
                (self.fallback_chain_id.clone(), Provenance::Fallback(e))
            }
        }
    }

    async fn fetch_nonce(&self) -> (u64, Provenance) {
        match self.client.nonce(&self.sender).await {
            Ok(nonce) => (nonce, Provenance::Node),
            Err(e) => {
                warn!(
                    endpoint = self.client.endpoint(),
                    sender = %self.sender,
                    error = %e,
                    "Nonce unavailable, using random placeholder; do not broadcast"
                );
                (random_nonce(), Provenance::Fallback(e))
            }
        }
    }
}
