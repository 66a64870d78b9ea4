//! Callback receiver that records every answer dispatched to it.
//! Exists to exercise the oracle's callback contract in tests.

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

pub mod testing;
