#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let payment_token = deps.api.addr_validate(&msg.payment_token)?;
    crate::escrow::initialize(deps.storage, &payment_token, msg.fee)?;

    let secret = oracle_library::nullifier::instance_pairing_secret(&env);
    crate::state::PAIRING_SECRET.save(deps.storage, &secret.to_vec().into())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("payment_token", payment_token)
        .add_attribute("fee", msg.fee))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SubmitQuestion {
            request,
            requester,
            divinity,
            callback,
        } => execute::submit_question(deps, env, info, request, requester, divinity, callback),
        ExecuteMsg::SubmitAnswer {
            request,
            requester,
            answer,
        } => execute::submit_answer(deps, env, info, request, requester, answer),
        ExecuteMsg::CancelQuestion { request } => {
            execute::cancel_question(deps, env, info, request)
        }
        ExecuteMsg::InitializePaymentToken { payment_token, fee } => {
            execute::initialize_payment_token(deps, env, info, payment_token, fee)
        }
    }
}

pub mod execute {
    use super::*;
    use crate::escrow;
    use crate::msg::CallbackMsg;
    use crate::state::{self, AnswerNote, QuestionNote};
    use cosmwasm_std::{Event, Uint128};
    use oracle_library::{callback, nullifier};

    /// Create the pending question and escrow the fee.
    ///
    /// The sender is not required to be the requester: a third party may
    /// submit on a requester's behalf, but the fee is always pulled from the
    /// requester's balance against the requester's own allowance.
    pub fn submit_question(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        request: Uint128,
        requester: String,
        divinity: String,
        callback: CallbackMsg,
    ) -> Result<Response, ContractError> {
        let requester = deps.api.addr_validate(&requester)?;
        let divinity = deps.api.addr_validate(&divinity)?;
        let callback = callback.validate(deps.api)?;

        escrow::assert_fee_authorized(&deps.as_ref(), &requester, &env.contract.address)?;

        let secret = state::PAIRING_SECRET.load(deps.storage)?;
        let salt = state::next_question_salt(deps.storage)?;
        let key = nullifier::derive_shared_key(
            request.u128(),
            &requester,
            &divinity,
            secret.as_slice(),
            salt,
        );

        let note = QuestionNote {
            request,
            requester: requester.clone(),
            divinity: divinity.clone(),
            shared_nullifier_key: key.to_vec().into(),
            callback,
        };
        state::save_question(deps.storage, &note)?;

        let deposit = escrow::deposit_fee(deps.storage, &requester, &env.contract.address)?;

        Ok(Response::new()
            .add_message(deposit)
            .add_event(
                Event::new("question_submitted")
                    .add_attribute("request", request)
                    .add_attribute("requester", requester)
                    .add_attribute("divinity", divinity)
                    .add_attribute("sender", info.sender),
            ))
    }

    /// Resolve a pending question addressed to the sender: nullify it, record
    /// both answer copies, release the fee, and dispatch the callback.
    pub fn submit_answer(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        request: Uint128,
        requester: String,
        answer: Uint128,
    ) -> Result<Response, ContractError> {
        let requester = deps.api.addr_validate(&requester)?;
        let divinity = info.sender;

        let note = state::find_pending_for_divinity(deps.storage, &divinity, request, &requester)?
            .ok_or(ContractError::NoMatchingPendingQuestion {})?;

        // The first answer a divinity gives for a request value is binding:
        // a repeat of the same request routed through another requester gets
        // the recorded answer, whatever was submitted this time. Answers the
        // divinity received as a requester carry no such weight.
        let answer = match state::find_answer_given_by(deps.storage, &divinity, request)? {
            Some(prior) => prior.answer,
            None => answer,
        };

        state::consume_question(deps.storage, &note)?;

        state::save_answer(
            deps.storage,
            &AnswerNote {
                request,
                answer,
                requester: requester.clone(),
                divinity: divinity.clone(),
                owner: requester.clone(),
            },
        )?;
        state::save_answer(
            deps.storage,
            &AnswerNote {
                request,
                answer,
                requester: requester.clone(),
                divinity: divinity.clone(),
                owner: divinity.clone(),
            },
        )?;

        let mut response = Response::new()
            .add_message(escrow::release_fee(deps.storage, &divinity)?)
            .add_event(
                Event::new("question_answered")
                    .add_attribute("request", request)
                    .add_attribute("requester", requester)
                    .add_attribute("divinity", divinity),
            );

        if let Some(target) = &note.callback.target {
            response = response.add_message(callback::new_dispatch_msg(
                target,
                answer,
                note.callback.payload,
            )?);
        }

        Ok(response)
    }

    /// Withdraw the sender's pending question and refund the escrowed fee.
    pub fn cancel_question(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        request: Uint128,
    ) -> Result<Response, ContractError> {
        let requester = info.sender;

        let note = state::find_pending_for_requester(deps.storage, &requester, request)?
            .ok_or(ContractError::NoMatchingPendingQuestion {})?;

        state::consume_question(deps.storage, &note)?;

        Ok(Response::new()
            .add_message(escrow::release_fee(deps.storage, &requester)?)
            .add_event(
                Event::new("question_cancelled")
                    .add_attribute("request", request)
                    .add_attribute("requester", requester)
                    .add_attribute("divinity", note.divinity),
            ))
    }

    /// Deploy-time only. Instantiation writes the config, so every call that
    /// reaches this handler is either externally-originated (Unauthorized) or
    /// a self-call against an initialized contract (AlreadyInitialized).
    pub fn initialize_payment_token(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        payment_token: String,
        fee: Uint128,
    ) -> Result<Response, ContractError> {
        if info.sender != env.contract.address {
            return Err(ContractError::Unauthorized {});
        }

        let payment_token = deps.api.addr_validate(&payment_token)?;
        escrow::initialize(deps.storage, &payment_token, fee)?;

        Ok(Response::new()
            .add_attribute("method", "initialize_payment_token")
            .add_attribute("payment_token", payment_token)
            .add_attribute("fee", fee))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Questions { owner, offset } => {
            to_json_binary(&query::questions(deps, owner, offset)?)
        }
        QueryMsg::PendingQuestions { divinity, offset } => {
            to_json_binary(&query::pending_questions(deps, divinity, offset)?)
        }
        QueryMsg::Answers { owner, offset } => {
            to_json_binary(&query::answers(deps, owner, offset)?)
        }
        QueryMsg::Answer { request, owner } => {
            to_json_binary(&query::answer(deps, request, owner)?)
        }
        QueryMsg::Fee {} => to_json_binary(&query::fee(deps)?),
        QueryMsg::PaymentToken {} => to_json_binary(&query::payment_token(deps)?),
    }
}

pub mod query {
    use super::*;
    use crate::escrow;
    use crate::msg::{
        AnswerResponse, AnswersResponse, FeeResponse, PaymentTokenResponse, QuestionsResponse,
    };
    use crate::state;
    use cosmwasm_std::Uint128;

    /// Records returned per page.
    pub const PAGE_SIZE: usize = 10;

    pub fn questions(deps: Deps, owner: String, offset: u32) -> StdResult<QuestionsResponse> {
        let owner = deps.api.addr_validate(&owner)?;
        let questions = state::paginate_questions(deps.storage, &owner, offset, PAGE_SIZE)?;
        Ok(QuestionsResponse { questions })
    }

    pub fn pending_questions(
        deps: Deps,
        divinity: String,
        offset: u32,
    ) -> StdResult<QuestionsResponse> {
        let divinity = deps.api.addr_validate(&divinity)?;
        let questions =
            state::paginate_pending_for_divinity(deps.storage, &divinity, offset, PAGE_SIZE)?;
        Ok(QuestionsResponse { questions })
    }

    pub fn answers(deps: Deps, owner: String, offset: u32) -> StdResult<AnswersResponse> {
        let owner = deps.api.addr_validate(&owner)?;
        let answers = state::paginate_answers(deps.storage, &owner, offset, PAGE_SIZE)?;
        Ok(AnswersResponse { answers })
    }

    pub fn answer(deps: Deps, request: Uint128, owner: String) -> StdResult<AnswerResponse> {
        let owner = deps.api.addr_validate(&owner)?;
        let answer = state::find_answer(deps.storage, &owner, request)?;
        Ok(AnswerResponse { answer })
    }

    pub fn fee(deps: Deps) -> StdResult<FeeResponse> {
        let config = escrow::get_config(deps.storage)?;
        Ok(FeeResponse { fee: config.fee })
    }

    pub fn payment_token(deps: Deps) -> StdResult<PaymentTokenResponse> {
        let config = escrow::get_config(deps.storage)?;
        Ok(PaymentTokenResponse {
            payment_token: config.payment_token,
        })
    }
}
