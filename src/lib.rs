pub mod contract;
pub mod error;
pub mod msg;
pub mod payout;
pub mod seed;
pub mod state;
pub mod token;

pub use crate::error::ContractError;
