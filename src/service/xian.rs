//! Facade tying one signing wallet to one node.

use std::sync::Arc;

use tracing::info;

use crate::blockchain::traits::NodeClient;
use crate::blockchain::types::{TransferRequest, TransferResult};
use crate::core::config::ClientConfig;
use crate::core::errors::{NodeError, Result};
use crate::crypto::wallet::SigningWallet;
use crate::network::node_client::HttpNodeClient;
use crate::service::contracts::ContractService;
use crate::transaction::pipeline::SubmissionPipeline;

pub struct XianService {
    client: Arc<dyn NodeClient>,
    pipeline: SubmissionPipeline,
}

impl XianService {
    /// Connect to the node described by `config` over HTTP.
    pub fn new(config: &ClientConfig, wallet: SigningWallet) -> Result<Self> {
        let client: Arc<dyn NodeClient> = Arc::new(HttpNodeClient::new(config)?);
        Ok(Self::with_client(client, wallet, config))
    }

    pub fn with_client(
        client: Arc<dyn NodeClient>,
        wallet: SigningWallet,
        config: &ClientConfig,
    ) -> Self {
        let pipeline = SubmissionPipeline::with_config(client.clone(), wallet, config);
        Self { client, pipeline }
    }

    /// Hex public key of the wallet.
    pub fn address(&self) -> String {
        self.pipeline.wallet().public_key_hex()
    }

    pub async fn get_balance(&self, address: &str) -> Result<u64> {
        if address.trim().is_empty() {
            return Err(NodeError::validation("address must not be empty").into());
        }
        Ok(self.client.balance(address).await?)
    }

    /// Native transfer through `POST /send`, from this wallet's address.
    pub async fn send(&self, amount: u64, to: &str) -> Result<TransferResult> {
        if to.trim().is_empty() {
            return Err(NodeError::validation("recipient must not be empty").into());
        }
        let request = TransferRequest { from: self.address(), to: to.to_string(), amount };
        let result = self.client.send(&request).await?;
        info!(to, amount, success = result.success, hash = %result.hash, "Transfer submitted");
        Ok(result)
    }

    pub fn contracts(&self) -> ContractService {
        ContractService::new(self.client.clone(), self.address())
    }

    /// Signed-transaction path: build, simulate, sign and broadcast.
    pub fn transactions(&self) -> &SubmissionPipeline {
        &self.pipeline
    }
}
