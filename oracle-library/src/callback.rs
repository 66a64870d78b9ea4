use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg};

/// Number of opaque data words carried alongside a callback target.
pub const PAYLOAD_WORDS: usize = 5;

/// Opaque payload stored with a question and forwarded verbatim at answer time.
pub type CallbackPayload = [Uint128; PAYLOAD_WORDS];

/// Message a callback receiver must accept.
///
/// Dispatched synchronously within the answer transaction; if the receiver
/// rejects it or the target is not a contract, the whole answer fails.
#[cw_serde]
pub enum OracleCallbackMsg {
    ReceiveAnswer {
        answer: Uint128,
        payload: CallbackPayload,
    },
}

/// New callback dispatch (sub_message) to the receiver contract.
pub fn new_dispatch_msg(
    target: &Addr,
    answer: Uint128,
    payload: CallbackPayload,
) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: target.to_string(),
        msg: to_json_binary(&OracleCallbackMsg::ReceiveAnswer { answer, payload })?,
        funds: vec![],
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::from_json;

    #[test]
    fn dispatch_msg_targets_receiver() {
        let deps = mock_dependencies();
        let receiver = deps.api.addr_make("receiver");
        let payload = [69u128, 420, 42069, 69420, 6942069].map(Uint128::new);

        let msg = new_dispatch_msg(&receiver, Uint128::new(456), payload).unwrap();
        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, receiver.to_string());
                assert_eq!(funds, vec![]);
                let decoded: OracleCallbackMsg = from_json(&msg).unwrap();
                assert_eq!(
                    decoded,
                    OracleCallbackMsg::ReceiveAnswer {
                        answer: Uint128::new(456),
                        payload,
                    }
                );
            }
            _ => panic!("expected wasm execute"),
        }
    }
}
