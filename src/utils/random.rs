// src/utils/random.rs

use std::sync::Mutex;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::models::question::Question;

/// Source of randomness for question sampling.
///
/// Implementations must return a permutation of the input: same elements, no
/// duplicates, no drops.
pub trait Shuffler: Send + Sync {
    fn shuffled(&self, questions: Vec<Question>) -> Vec<Question>;
}

/// Uniform Fisher-Yates shuffle on the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngShuffler;

impl Shuffler for ThreadRngShuffler {
    fn shuffled(&self, mut questions: Vec<Question>) -> Vec<Question> {
        questions.shuffle(&mut rand::thread_rng());
        questions
    }
}

/// Deterministic shuffler for tests and reproducible runs.
#[derive(Debug)]
pub struct SeededShuffler {
    rng: Mutex<StdRng>,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffled(&self, mut questions: Vec<Question>) -> Vec<Question> {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        questions.shuffle(&mut *rng);
        questions
    }
}
