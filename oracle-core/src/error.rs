use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Payment token has been initialized")]
    AlreadyInitialized {},

    #[error("No matching pending question")]
    NoMatchingPendingQuestion {},

    #[error("Insufficient fee authorization: required {required}, allowance {allowance}")]
    InsufficientAuthorization {
        required: Uint128,
        allowance: Uint128,
    },
}
