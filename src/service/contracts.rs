//! Contract deployment, read-only calls and state inspection.

use std::sync::Arc;

use tracing::info;

use crate::blockchain::traits::NodeClient;
use crate::blockchain::types::{ContractCall, ContractState, DeployRequest};
use crate::core::errors::{NodeError, Result};
use crate::core::value::{Kwargs, Value};

/// Contract endpoints of the node, acting as `owner` (hex public key).
#[derive(Clone)]
pub struct ContractService {
    client: Arc<dyn NodeClient>,
    owner: String,
}

impl ContractService {
    pub fn new(client: Arc<dyn NodeClient>, owner: impl Into<String>) -> Self {
        Self { client, owner: owner.into() }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Upload contract source under `name`. The source is passed through untouched.
    pub async fn deploy(&self, name: &str, code: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(NodeError::validation("contract name must not be empty").into());
        }
        if code.trim().is_empty() {
            return Err(NodeError::validation("contract code must not be empty").into());
        }
        let request = DeployRequest {
            name: name.to_string(),
            code: code.to_string(),
            owner: self.owner.clone(),
        };
        self.client.deploy_contract(&request).await?;
        info!(contract = name, owner = %self.owner, "Contract deployed");
        Ok(())
    }

    /// Read-only call; nothing is signed and no nonce is consumed.
    pub async fn call(&self, contract: &str, method: &str, args: Kwargs) -> Result<Value> {
        let call = ContractCall {
            contract: contract.to_string(),
            method: method.to_string(),
            args,
            caller: self.owner.clone(),
        };
        Ok(self.client.call_contract(&call).await?)
    }

    pub async fn state(&self, contract: &str) -> Result<ContractState> {
        Ok(self.client.contract_state(contract).await?)
    }
}
