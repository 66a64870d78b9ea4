use crate::state::{AnswerNote, Callback, QuestionNote};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Api, StdResult, Uint128};
use oracle_library::callback::{CallbackPayload, PAYLOAD_WORDS};

#[cw_serde]
pub struct InstantiateMsg {
    /// The address of the cw20 contract the fee is denominated in.
    pub payment_token: String,
    /// The fee escrowed per question, in payment token units.
    pub fee: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Ask `divinity` a question on behalf of `requester`.
    ///
    /// Anyone may submit for a requester: the fee is pulled from the
    /// requester's balance against a standing allowance, so a relayer without
    /// one cannot spend on their behalf.
    SubmitQuestion {
        request: Uint128,
        requester: String,
        divinity: String,
        callback: CallbackMsg,
    },
    /// Answer the pending question `(request, requester)` addressed to the
    /// sender. Releases the escrowed fee to the sender and dispatches the
    /// stored callback, if any.
    SubmitAnswer {
        request: Uint128,
        requester: String,
        answer: Uint128,
    },
    /// Cancel the sender's pending question with this request value and
    /// refund the escrowed fee.
    CancelQuestion { request: Uint128 },
    /// Deploy-time configuration. Only callable by the contract itself;
    /// every externally-originated call fails, including the deployer's.
    InitializePaymentToken { payment_token: String, fee: Uint128 },
}

/// Callback requested at submission time, dispatched at answer time.
#[cw_serde]
pub struct CallbackMsg {
    /// Receiver contract. `None` disables the callback.
    pub target: Option<String>,
    /// Opaque words forwarded to the receiver after the answer.
    pub payload: CallbackPayload,
}

impl CallbackMsg {
    pub fn none() -> Self {
        CallbackMsg {
            target: None,
            payload: [Uint128::zero(); PAYLOAD_WORDS],
        }
    }

    pub fn to(target: impl Into<String>, payload: CallbackPayload) -> Self {
        CallbackMsg {
            target: Some(target.into()),
            payload,
        }
    }

    pub fn validate(&self, api: &dyn Api) -> StdResult<Callback> {
        let target = self
            .target
            .as_ref()
            .map(|addr| api.addr_validate(addr))
            .transpose()?;
        Ok(Callback {
            target,
            payload: self.payload,
        })
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// All live questions `owner` holds a copy of, as requester or divinity.
    #[returns(QuestionsResponse)]
    Questions { owner: String, offset: u32 },

    /// Live questions awaiting an answer from `divinity`.
    #[returns(QuestionsResponse)]
    PendingQuestions { divinity: String, offset: u32 },

    /// The answer copies owned by `owner`, in resolution order.
    #[returns(AnswersResponse)]
    Answers { owner: String, offset: u32 },

    /// The single answer copy of `owner` for this request value, if resolved.
    #[returns(AnswerResponse)]
    Answer { request: Uint128, owner: String },

    #[returns(FeeResponse)]
    Fee {},

    #[returns(PaymentTokenResponse)]
    PaymentToken {},
}

#[cw_serde]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionNote>,
}

#[cw_serde]
pub struct AnswersResponse {
    pub answers: Vec<AnswerNote>,
}

#[cw_serde]
pub struct AnswerResponse {
    pub answer: Option<AnswerNote>,
}

#[cw_serde]
pub struct FeeResponse {
    pub fee: Uint128,
}

#[cw_serde]
pub struct PaymentTokenResponse {
    pub payment_token: Addr,
}
