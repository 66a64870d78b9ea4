use cosmwasm_std::{Addr, Env};
use sha2::{Digest, Sha256};

/// Domain separator for shared nullifier key derivation.
const KEY_DOMAIN: &[u8] = b"oracle:shared_nullifier_key:v1";

/// Domain separator for the per-instance pairing secret.
const SECRET_DOMAIN: &[u8] = b"oracle:pairing_secret:v1";

/// Derive the per-instance pairing secret from the deployment context.
/// Computed once at instantiation and stored; every shared nullifier key of
/// this oracle instance is bound to it, so two instances deployed with the
/// same parameters produce disjoint key spaces.
pub fn instance_pairing_secret(env: &Env) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(SECRET_DOMAIN);
    hasher.update(env.contract.address.as_bytes());
    hasher.update(env.block.height.to_be_bytes());
    hasher.update(env.block.time.nanos().to_be_bytes());
    hasher.finalize().into()
}

/// Derive the shared nullifier key for one question submission.
///
/// The key is a pure function of the `(request, requester, divinity)` triple,
/// the instance pairing secret, and a per-submission salt. Both owner copies
/// of a question carry the same key; any two submissions differing in any
/// component of the triple, or resubmitting the same triple, get distinct
/// keys. The key doubles as the single-use consumption handle: once recorded
/// in the nullifier set, no record under it can ever be resolved again.
pub fn derive_shared_key(
    request: u128,
    requester: &Addr,
    divinity: &Addr,
    pairing_secret: &[u8],
    salt: u64,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(KEY_DOMAIN);
    hasher.update(pairing_secret);
    hasher.update(request.to_be_bytes());
    hasher.update((requester.as_bytes().len() as u32).to_be_bytes());
    hasher.update(requester.as_bytes());
    hasher.update(divinity.as_bytes());
    hasher.update(salt.to_be_bytes());
    hasher.finalize().into()
}
