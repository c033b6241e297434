pub mod config;
pub mod errors;
pub mod value;

pub use config::ClientConfig;
pub use errors::{FailureKind, NodeError, NodeResult, Result, WalletError};
pub use value::{Kwargs, Value};
