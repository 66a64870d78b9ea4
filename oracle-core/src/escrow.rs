use crate::error::ContractError;
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Deps, QueryRequest, StdResult, Storage, Uint128, WasmMsg,
    WasmQuery,
};
use cosmwasm_schema::cw_serde;
use cw_storage_plus::Item;

/// Payment token and fee, written exactly once at instantiation.
#[cw_serde]
pub struct Config {
    pub payment_token: Addr,
    pub fee: Uint128,
}

const CONFIG: Item<Config> = Item::new("config");

/// Set the payment token and fee. Fails once set; there is no way to change
/// either afterwards, including for the deployer.
pub fn initialize(
    storage: &mut dyn Storage,
    payment_token: &Addr,
    fee: Uint128,
) -> Result<(), ContractError> {
    if CONFIG.may_load(storage)?.is_some() {
        return Err(ContractError::AlreadyInitialized {});
    }
    CONFIG.save(
        storage,
        &Config {
            payment_token: payment_token.clone(),
            fee,
        },
    )?;
    Ok(())
}

pub fn get_config(storage: &dyn Storage) -> StdResult<Config> {
    CONFIG.load(storage)
}

/// The requester's unspent fee allowance towards the oracle.
pub fn query_allowance(deps: &Deps, owner: &Addr, spender: &Addr) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    let res: cw20::AllowanceResponse = deps.querier.query(
        &QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: config.payment_token.to_string(),
            msg: to_json_binary(&cw20::Cw20QueryMsg::Allowance {
                owner: owner.to_string(),
                spender: spender.to_string(),
            })?,
        }),
    )?;
    Ok(res.allowance)
}

/// Assert the requester has authorized the oracle to move at least the fee.
/// Runs before any record is written so a failed submission leaves no state.
pub fn assert_fee_authorized(
    deps: &Deps,
    requester: &Addr,
    oracle: &Addr,
) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let allowance = query_allowance(deps, requester, oracle)?;
    if allowance < config.fee {
        return Err(ContractError::InsufficientAuthorization {
            required: config.fee,
            allowance,
        });
    }
    Ok(())
}

/// New transfer_from (sub_message) pulling the fee from the requester into
/// oracle-held escrow.
pub fn deposit_fee(
    storage: &dyn Storage,
    requester: &Addr,
    oracle: &Addr,
) -> StdResult<CosmosMsg> {
    let config = CONFIG.load(storage)?;

    Ok(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&cw20::Cw20ExecuteMsg::TransferFrom {
            owner: requester.to_string(),
            recipient: oracle.to_string(),
            amount: config.fee,
        })?,
        funds: vec![],
    }
    .into())
}

/// New transfer (sub_message) releasing the escrowed fee: to the divinity on
/// answer, back to the requester on cancellation.
pub fn release_fee(storage: &dyn Storage, recipient: &Addr) -> StdResult<CosmosMsg> {
    let config = CONFIG.load(storage)?;

    Ok(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&cw20::Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount: config.fee,
        })?,
        funds: vec![],
    }
    .into())
}
