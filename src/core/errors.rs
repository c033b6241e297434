use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cause of a failed operation, so callers can branch on why rather than only on
/// whether something failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Network failure or timeout before a response was received.
    Transport,
    /// The node answered, but with a non-2xx status or an undecodable body.
    Protocol,
    /// Local input was malformed.
    Validation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Protocol => write!(f, "protocol"),
            FailureKind::Validation => write!(f, "validation"),
        }
    }
}

/// A failure reported by a node collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct NodeError {
    pub kind: FailureKind,
    pub message: String,
    /// HTTP status, when the node answered at all.
    pub status: Option<u16>,
}

impl NodeError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Transport, message: message.into(), status: None }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Protocol, message: message.into(), status: None }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Validation, message: message.into(), status: None }
    }

    /// A non-2xx answer from the node.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Protocol, message: message.into(), status: Some(status) }
    }

    pub fn is_retryable(&self) -> bool {
        match self.kind {
            FailureKind::Transport => true,
            FailureKind::Protocol => self.status.map_or(false, |s| s >= 500),
            FailureKind::Validation => false,
        }
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let kind = if err.is_decode() || status.is_some() {
            FailureKind::Protocol
        } else {
            FailureKind::Transport
        };
        Self { kind, message: err.to_string(), status }
    }
}

/// Result of a node interaction.
pub type NodeResult<T> = std::result::Result<T, NodeError>;

/// Error type for local wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// A derivation path segment was negative, non-numeric or out of range.
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    /// Key bytes had the wrong length or did not decode.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// HKDF rejected its input; never substituted with a fallback.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Signature bytes had the wrong length or did not decode.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Node(#[from] NodeError),
}

impl WalletError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WalletError::Node(err) => err.kind,
            _ => FailureKind::Validation,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            WalletError::Node(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Serialization(err.to_string())
    }
}

impl From<hex::FromHexError> for WalletError {
    fn from(err: hex::FromHexError) -> Self {
        WalletError::InvalidKey(format!("hex decode failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
