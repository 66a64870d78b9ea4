use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Order, StdError, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};
use oracle_library::callback::CallbackPayload;

/// Callback stored alongside a question, validated at the message boundary.
#[cw_serde]
pub struct Callback {
    pub target: Option<Addr>,
    pub payload: CallbackPayload,
}

/// One logical question. Stored once, canonically keyed by its shared
/// nullifier key, with an index entry per owning party. The requester's and
/// divinity's views therefore can never diverge.
#[cw_serde]
pub struct QuestionNote {
    pub request: Uint128,
    pub requester: Addr,
    pub divinity: Addr,
    pub shared_nullifier_key: HexBinary,
    pub callback: Callback,
}

/// One party's copy of a resolved answer. Immutable and never consumed;
/// `owner` is the only field differing between the two copies.
#[cw_serde]
pub struct AnswerNote {
    pub request: Uint128,
    pub answer: Uint128,
    pub requester: Addr,
    pub divinity: Addr,
    pub owner: Addr,
}

/// Instance-wide secret bound into every shared nullifier key.
pub const PAIRING_SECRET: Item<HexBinary> = Item::new("pairing_secret");

/// Monotone submission counter, the salt distinguishing resubmissions of an
/// identical `(request, requester, divinity)` triple.
const QUESTION_SEQ: Item<u64> = Item::new("question_seq");

/// Monotone answer counter, keys answer copies in resolution order.
const ANSWER_SEQ: Item<u64> = Item::new("answer_seq");

/// Canonical question records, keyed by shared nullifier key.
const QUESTIONS: Map<&[u8], QuestionNote> = Map::new("questions");

/// Owner-scoped index into [QUESTIONS]; one entry per party per question.
const QUESTION_OWNERS: Map<(&Addr, &[u8]), ()> = Map::new("question_owners");

/// Consumed nullifier keys. Permanent: a key in here can never key a live
/// record again, which is what makes resolution single-use.
const NULLIFIED: Map<&[u8], ()> = Map::new("nullified");

/// Answer copies per owner, in resolution order.
const ANSWERS: Map<(&Addr, u64), AnswerNote> = Map::new("answers");

pub fn next_question_salt(store: &mut dyn Storage) -> StdResult<u64> {
    let salt = QUESTION_SEQ.may_load(store)?.unwrap_or_default() + 1;
    QUESTION_SEQ.save(store, &salt)?;
    Ok(salt)
}

fn next_answer_seq(store: &mut dyn Storage) -> StdResult<u64> {
    let seq = ANSWER_SEQ.may_load(store)?.unwrap_or_default() + 1;
    ANSWER_SEQ.save(store, &seq)?;
    Ok(seq)
}

/// Store the canonical question record and both owner index entries.
/// A consumed key can never back a new record; derivation salts every
/// submission, so hitting the guard means the derivation broke.
pub fn save_question(store: &mut dyn Storage, note: &QuestionNote) -> StdResult<()> {
    let key = note.shared_nullifier_key.as_slice();
    if is_nullified(store, key) {
        return Err(StdError::generic_err("nullifier key already consumed"));
    }
    QUESTIONS.save(store, key, note)?;
    QUESTION_OWNERS.save(store, (&note.requester, key), &())?;
    QUESTION_OWNERS.save(store, (&note.divinity, key), &())?;
    Ok(())
}

/// Consume (nullify) a question: both parties lose observability at once and
/// the key joins the permanent nullifier set.
pub fn consume_question(store: &mut dyn Storage, note: &QuestionNote) -> StdResult<()> {
    let key = note.shared_nullifier_key.as_slice();
    QUESTIONS.remove(store, key);
    QUESTION_OWNERS.remove(store, (&note.requester, key));
    QUESTION_OWNERS.remove(store, (&note.divinity, key));
    NULLIFIED.save(store, key, &())
}

pub fn is_nullified(store: &dyn Storage, key: &[u8]) -> bool {
    NULLIFIED.has(store, key)
}

/// Locate the live question `(request, requester, divinity)`.
/// Returns None when the triple was never submitted or is already resolved.
pub fn find_pending_for_divinity(
    store: &dyn Storage,
    divinity: &Addr,
    request: Uint128,
    requester: &Addr,
) -> StdResult<Option<QuestionNote>> {
    for key in QUESTION_OWNERS
        .prefix(divinity)
        .keys(store, None, None, Order::Ascending)
    {
        let note = QUESTIONS.load(store, &key?)?;
        if note.request == request && note.requester == *requester && note.divinity == *divinity {
            return Ok(Some(note));
        }
    }
    Ok(None)
}

/// Locate the live question with this request value asked by `requester`.
pub fn find_pending_for_requester(
    store: &dyn Storage,
    requester: &Addr,
    request: Uint128,
) -> StdResult<Option<QuestionNote>> {
    for key in QUESTION_OWNERS
        .prefix(requester)
        .keys(store, None, None, Order::Ascending)
    {
        let note = QUESTIONS.load(store, &key?)?;
        if note.request == request && note.requester == *requester {
            return Ok(Some(note));
        }
    }
    Ok(None)
}

/// One page of the owner's live questions, either role.
pub fn paginate_questions(
    store: &dyn Storage,
    owner: &Addr,
    offset: u32,
    limit: usize,
) -> StdResult<Vec<QuestionNote>> {
    QUESTION_OWNERS
        .prefix(owner)
        .keys(store, None, None, Order::Ascending)
        .skip(offset as usize)
        .take(limit)
        .map(|key| QUESTIONS.load(store, &key?))
        .collect()
}

/// One page of the live questions awaiting an answer from `divinity`.
pub fn paginate_pending_for_divinity(
    store: &dyn Storage,
    divinity: &Addr,
    offset: u32,
    limit: usize,
) -> StdResult<Vec<QuestionNote>> {
    let mut page = Vec::new();
    let mut matched = 0u32;
    for key in QUESTION_OWNERS
        .prefix(divinity)
        .keys(store, None, None, Order::Ascending)
    {
        let note = QUESTIONS.load(store, &key?)?;
        // The owner index also lists questions this party asked.
        if note.divinity != *divinity {
            continue;
        }
        matched += 1;
        if matched <= offset {
            continue;
        }
        page.push(note);
        if page.len() >= limit {
            break;
        }
    }
    Ok(page)
}

/// Record one party's answer copy.
pub fn save_answer(store: &mut dyn Storage, note: &AnswerNote) -> StdResult<()> {
    let seq = next_answer_seq(store)?;
    ANSWERS.save(store, (&note.owner, seq), note)
}

/// One page of the owner's answer copies, in resolution order.
pub fn paginate_answers(
    store: &dyn Storage,
    owner: &Addr,
    offset: u32,
    limit: usize,
) -> StdResult<Vec<AnswerNote>> {
    ANSWERS
        .prefix(owner)
        .range(store, None, None, Order::Ascending)
        .skip(offset as usize)
        .take(limit)
        .map(|item| item.map(|(_, note)| note))
        .collect()
}

/// The first answer `divinity` gave for this request value, under any
/// requester. Answers the divinity received as a requester do not count.
pub fn find_answer_given_by(
    store: &dyn Storage,
    divinity: &Addr,
    request: Uint128,
) -> StdResult<Option<AnswerNote>> {
    for item in ANSWERS
        .prefix(divinity)
        .range(store, None, None, Order::Ascending)
    {
        let (_, note) = item?;
        if note.request == request && note.divinity == *divinity {
            return Ok(Some(note));
        }
    }
    Ok(None)
}

/// The owner's answer copy for this request value, if any.
pub fn find_answer(
    store: &dyn Storage,
    owner: &Addr,
    request: Uint128,
) -> StdResult<Option<AnswerNote>> {
    for item in ANSWERS
        .prefix(owner)
        .range(store, None, None, Order::Ascending)
    {
        let (_, note) = item?;
        if note.request == request {
            return Ok(Some(note));
        }
    }
    Ok(None)
}
