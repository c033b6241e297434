//! reqwest-backed `NodeClient` for the Xian node HTTP API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::blockchain::traits::NodeClient;
use crate::blockchain::types::{
    Admission, BalanceResponse, ContractCall, ContractState, DeployRequest, SignedTransaction,
    SimulationResult, TransactionPayload, TransferRequest, TransferResult,
};
use crate::core::config::ClientConfig;
use crate::core::errors::{NodeError, NodeResult, Result, WalletError};
use crate::core::value::Value;
use crate::security::redaction::redact_body;

pub struct HttpNodeClient {
    client: Client,
    base_url: String,
}

impl HttpNodeClient {
    /// Build a client from validated settings. The request timeout is enforced here.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WalletError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client, base_url: config.base_url().to_string() })
    }

    /// Client for `node_url` with default settings.
    pub fn with_url(node_url: &str) -> Result<Self> {
        Self::new(&ClientConfig::new(node_url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> NodeResult<String> {
        debug!(endpoint = %self.base_url, path, "GET");
        let resp = self.client.get(self.url(path)).query(query).send().await?;
        read_success_body(resp).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> NodeResult<Response> {
        debug!(endpoint = %self.base_url, path, "POST");
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> NodeResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.post(path, body).await?;
        let text = read_success_body(resp).await?;
        decode(path, &text)
    }
}

/// Return the body of a 2xx response, or a protocol error carrying the status.
async fn read_success_body(resp: Response) -> NodeResult<String> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(NodeError::status(
            status.as_u16(),
            format!("node returned {}: {}", status, redact_body(&text)),
        ));
    }
    Ok(text)
}

fn decode<T: DeserializeOwned>(path: &str, text: &str) -> NodeResult<T> {
    serde_json::from_str(text).map_err(|e| {
        NodeError::protocol(format!(
            "undecodable body from {}: {} ({})",
            path,
            e,
            redact_body(text)
        ))
    })
}

/// Accepts a bare identifier or a JSON string.
pub fn parse_chain_id(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let chain_id = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        _ => trimmed.to_string(),
    };
    let chain_id = chain_id.trim();
    (!chain_id.is_empty()).then(|| chain_id.to_string())
}

/// Largest nonce the ledger accepts; nonces are 63-bit.
pub const MAX_NONCE: u64 = i64::MAX as u64;

/// Accepts plain text, a JSON number or a JSON string holding an integer in
/// `0..=MAX_NONCE`.
pub fn parse_nonce(body: &str) -> Option<u64> {
    let trimmed = body.trim();
    let nonce = match trimmed.parse::<u64>() {
        Ok(nonce) => nonce,
        Err(_) => match serde_json::from_str::<serde_json::Value>(trimmed).ok()? {
            serde_json::Value::Number(n) => n.as_u64()?,
            serde_json::Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        },
    };
    (nonce <= MAX_NONCE).then_some(nonce)
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn chain_id(&self) -> NodeResult<String> {
        let body = self.get("/chain_id", &[]).await?;
        parse_chain_id(&body).ok_or_else(|| NodeError::protocol("empty chain id"))
    }

    async fn nonce(&self, address: &str) -> NodeResult<u64> {
        let body = self.get("/nonce", &[("address", address)]).await?;
        parse_nonce(&body).ok_or_else(|| {
            NodeError::protocol(format!("nonce is not an integer: {}", redact_body(&body)))
        })
    }

    async fn balance(&self, address: &str) -> NodeResult<u64> {
        let body = self.get("/balance", &[("address", address)]).await?;
        let resp: BalanceResponse = decode("/balance", &body)?;
        Ok(resp.balance)
    }

    async fn send(&self, request: &TransferRequest) -> NodeResult<TransferResult> {
        self.post_json("/send", request).await
    }

    async fn deploy_contract(&self, request: &DeployRequest) -> NodeResult<()> {
        let resp = self.post("/contracts/deploy", request).await?;
        read_success_body(resp).await.map(|_| ())
    }

    async fn call_contract(&self, call: &ContractCall) -> NodeResult<Value> {
        let resp = self.post("/contracts/call", call).await?;
        let text = read_success_body(resp).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode("/contracts/call", &text)
    }

    async fn contract_state(&self, name: &str) -> NodeResult<ContractState> {
        if name.is_empty() || name.contains('/') {
            return Err(NodeError::validation(format!("invalid contract name '{}'", name)));
        }
        let path = format!("/contracts/{}/state", name);
        let body = self.get(&path, &[]).await?;
        decode(&path, &body)
    }

    async fn simulate(&self, payload: &TransactionPayload) -> NodeResult<SimulationResult> {
        self.post_json("/transactions/simulate", payload).await
    }

    async fn submit(&self, signed: &SignedTransaction) -> NodeResult<Admission> {
        let resp = self.post("/transactions", signed).await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(Admission::Accepted);
        }
        let reason = resp.text().await.unwrap_or_default();
        if status.is_client_error() {
            Ok(Admission::Rejected { status: status.as_u16(), reason })
        } else {
            Err(NodeError::status(
                status.as_u16(),
                format!("node returned {}: {}", status, redact_body(&reason)),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("42", Some(42); "plain text")]
    #[test_case(" 7\n", Some(7); "padded text")]
    #[test_case("\"9\"", Some(9); "json string")]
    #[test_case("1.5", None; "fraction")]
    #[test_case("-3", None; "negative")]
    #[test_case("abc", None; "garbage")]
    #[test_case("", None; "empty")]
    #[test_case("9223372036854775807", Some(i64::MAX as u64); "largest 63 bit")]
    #[test_case("9223372036854775808", None; "just past 63 bits")]
    #[test_case("18446744073709551615", None; "beyond 63 bits")]
    #[test_case("\"18446744073709551615\"", None; "beyond 63 bits as json string")]
    fn test_parse_nonce(body: &str, expected: Option<u64>) {
        assert_eq!(parse_nonce(body), expected);
    }

    #[test]
    fn test_parse_chain_id() {
        assert_eq!(parse_chain_id("xian-1").as_deref(), Some("xian-1"));
        assert_eq!(parse_chain_id("\"xian-testnet\"\n").as_deref(), Some("xian-testnet"));
        assert_eq!(parse_chain_id("  "), None);
        assert_eq!(parse_chain_id("\"\""), None);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let client = HttpNodeClient::with_url("http://localhost:52260/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:52260");
        assert_eq!(client.url("/chain_id"), "http://localhost:52260/chain_id");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HttpNodeClient::with_url("").is_err());
    }
}
