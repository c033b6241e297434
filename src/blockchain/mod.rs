pub mod traits;
pub mod types;

pub use traits::NodeClient;
pub use types::{
    Admission, SignedTransaction, SimulationResult, TransactionPayload, TransactionState,
};
