//! Fresh-randomness helpers.
//!
//! Unlike bucket selection, which is deterministic by contract, run
//! identifiers exist to label individual assignments and must be fresh every
//! time. This module owns the library's only sources of non-determinism.

use rand::Rng;

/// Generates a fresh run identifier for an eligible assignment.
///
/// 128 bits of thread-RNG material rendered as 32 hex characters. Run ids
/// are labels, not reproducible streams, so no seeding policy applies.
pub fn fresh_run_id() -> String {
    let material: u128 = rand::thread_rng().gen();
    format!("{material:032x}")
}
