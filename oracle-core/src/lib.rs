pub mod contract;
mod error;
pub mod escrow;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

pub mod testing;
