pub mod contracts;
pub mod xian;

pub use contracts::ContractService;
pub use xian::XianService;
