//! Wire types exchanged with a Xian node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::errors::{FailureKind, NodeError};
use crate::core::value::{Kwargs, Value};

/// Unsigned contract call. Field order here is the canonical signing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub chain_id: String,
    pub contract: String,
    pub function: String,
    pub kwargs: Kwargs,
    /// Meaningful only for `sender`; the node decides whether it is acceptable.
    pub nonce: u64,
    /// Hex-encoded Ed25519 public key.
    pub sender: String,
    pub stamps_supplied: u64,
}

/// Payload plus a hex Ed25519 signature over its canonical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub payload: TransactionPayload,
    pub signature: String,
}

/// Answer of the dry-run endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub success: bool,
    #[serde(default)]
    pub stamps_used: u64,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    /// Set when the simulation never reached the node or its answer was unusable.
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl SimulationResult {
    pub fn failed(err: &NodeError) -> Self {
        Self {
            success: false,
            stamps_used: 0,
            result: None,
            error: Some(err.message.clone()),
            failure: Some(err.kind),
        }
    }
}

/// Whether the node admitted a signed transaction for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// The node answered and explicitly refused the submission.
    Rejected { status: u16, reason: String },
}

/// Lifecycle of a transaction as seen by this client.
///
/// `Unsigned -> Signed -> Accepted | Rejected`. Simulation is a side branch of
/// `Unsigned` and never changes the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    Unsigned,
    Signed,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: u64,
}

/// Body of `POST /send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub success: bool,
    #[serde(default)]
    pub hash: String,
}

/// Body of `POST /contracts/deploy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRequest {
    pub name: String,
    pub code: String,
    pub owner: String,
}

/// Body of `POST /contracts/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCall {
    pub contract: String,
    pub method: String,
    pub args: Kwargs,
    pub caller: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractState {
    pub contract_name: String,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    #[serde(default)]
    pub methods: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_json_shape() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("amount".into(), 10i64.into());
        let payload = TransactionPayload {
            chain_id: "xian-1".into(),
            contract: "currency".into(),
            function: "transfer".into(),
            kwargs,
            nonce: 3,
            sender: "ab".into(),
            stamps_supplied: 0,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "chainId": "xian-1",
                "contract": "currency",
                "function": "transfer",
                "kwargs": {"amount": 10},
                "nonce": 3,
                "sender": "ab",
                "stampsSupplied": 0
            })
        );
    }

    #[test]
    fn test_simulation_result_decodes_partial_body() {
        let sim: SimulationResult =
            serde_json::from_value(json!({"success": true, "stampsUsed": 42})).unwrap();
        assert!(sim.success);
        assert_eq!(sim.stamps_used, 42);
        assert!(sim.result.is_none());
        assert!(sim.failure.is_none());

        let failed = SimulationResult::failed(&NodeError::transport("connection refused"));
        assert!(!failed.success);
        assert_eq!(failed.failure, Some(FailureKind::Transport));
    }

    #[test]
    fn test_contract_state_decodes() {
        let state: ContractState = serde_json::from_value(json!({
            "contractName": "currency",
            "variables": {"balances": {"alice": 5}},
            "methods": {"transfer": "def transfer(amount, to)"}
        }))
        .unwrap();
        assert_eq!(state.contract_name, "currency");
        assert_eq!(state.methods.len(), 1);
    }
}
