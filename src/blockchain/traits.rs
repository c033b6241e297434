use async_trait::async_trait;

use crate::blockchain::types::{
    Admission, ContractCall, ContractState, DeployRequest, SignedTransaction, SimulationResult,
    TransactionPayload, TransferRequest, TransferResult,
};
use crate::core::errors::NodeResult;
use crate::core::value::Value;

/// The node HTTP API as seen by the wallet core.
///
/// Implementations report every failure as a typed `NodeError`; none of these
/// methods retry.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Base URL or other identifier of the node, for logging.
    fn endpoint(&self) -> &str;

    /// `GET /chain_id`
    async fn chain_id(&self) -> NodeResult<String>;

    /// `GET /nonce?address=<hex>`. Non-integer answers are protocol errors.
    async fn nonce(&self, address: &str) -> NodeResult<u64>;

    /// `GET /balance?address=<hex>`
    async fn balance(&self, address: &str) -> NodeResult<u64>;

    /// `POST /send`
    async fn send(&self, request: &TransferRequest) -> NodeResult<TransferResult>;

    /// `POST /contracts/deploy`; success is signalled by status alone.
    async fn deploy_contract(&self, request: &DeployRequest) -> NodeResult<()>;

    /// `POST /contracts/call`. An empty or `null` answer is `Value::Null`.
    async fn call_contract(&self, call: &ContractCall) -> NodeResult<Value>;

    /// `GET /contracts/{name}/state`
    async fn contract_state(&self, name: &str) -> NodeResult<ContractState>;

    /// `POST /transactions/simulate` with the unsigned payload.
    async fn simulate(&self, payload: &TransactionPayload) -> NodeResult<SimulationResult>;

    /// `POST /transactions`
    async fn submit(&self, signed: &SignedTransaction) -> NodeResult<Admission>;
}
