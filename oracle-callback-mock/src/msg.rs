use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use oracle_library::callback::CallbackPayload;

#[cw_serde]
pub struct InstantiateMsg {}

/// The receiver accepts exactly the oracle's callback interface.
pub type ExecuteMsg = oracle_library::callback::OracleCallbackMsg;

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Every callback received so far, in order.
    #[returns(ReceivedResponse)]
    Received {},
}

#[cw_serde]
pub struct ReceivedResponse {
    pub invocations: Vec<ReceivedAnswer>,
}

#[cw_serde]
pub struct ReceivedAnswer {
    pub answer: Uint128,
    pub payload: CallbackPayload,
}
