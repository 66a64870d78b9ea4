#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, ReceivedAnswer, ReceivedResponse};
use crate::state::RECEIVED;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;
use oracle_library::callback::OracleCallbackMsg;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    RECEIVED.save(deps.storage, &vec![])?;

    Ok(Response::new().add_attribute("method", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        OracleCallbackMsg::ReceiveAnswer { answer, payload } => {
            let mut invocations = RECEIVED.load(deps.storage)?;
            invocations.push(ReceivedAnswer { answer, payload });
            RECEIVED.save(deps.storage, &invocations)?;

            Ok(Response::new()
                .add_attribute("method", "receive_answer")
                .add_attribute("answer", answer)
                .add_attribute("sender", info.sender))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Received {} => {
            let invocations = RECEIVED.load(deps.storage)?;
            to_json_binary(&ReceivedResponse { invocations })
        }
    }
}
