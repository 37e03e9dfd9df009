//! Randomized presentation order for a full clinical assessment.

use mindwell_core::models::question::QuestionDefinition;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::clinical_catalog;

/// Shuffle all 26 clinical items with a freshly seeded thread-local RNG.
/// Each call yields an independent order.
pub fn build_shuffled_pool() -> Vec<QuestionDefinition> {
    build_shuffled_pool_with(&mut rand::thread_rng())
}

/// Fisher–Yates shuffle of the clinical catalog using `rng`.
pub fn build_shuffled_pool_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<QuestionDefinition> {
    let mut pool = clinical_catalog();
    pool.shuffle(rng);
    pool
}
