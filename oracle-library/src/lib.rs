pub mod testing;

/// Derivation of the shared nullifier key that ties the two owner copies of a
/// question together and serves as its single-use consumption handle.
pub mod nullifier;

/// The callback interface a receiver contract implements to be notified of an
/// answer, and the dispatch message builder the oracle uses to invoke it.
pub mod callback;
