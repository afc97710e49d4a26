use crate::store::LinkStore;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Characters a short code may contain: lowercase, uppercase, digits.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default number of characters in a generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Paths owned by other routes; a code equal to one of these could never be
/// reached through `GET /:code`.
const RESERVED: &[&str] = &["shorten"];

/// Random short-code generator.
///
/// Holds a single PRNG seeded once when the generator is built. The lock
/// around it is only held while drawing characters and never across an
/// `.await`.
#[derive(Debug)]
pub struct CodeGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Generator seeded from OS entropy.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Generator with a fixed seed; two generators with the same seed and
    /// length produce the same sequence of candidates.
    #[cfg(test)]
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draw one candidate code. Does not consult the store.
    pub fn sample(&self) -> String {
        // Poisoning carries no broken invariant here; keep sampling.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Sample until a code not present in `store` turns up.
    ///
    /// Unbounded: with 62^6 possible codes the expected number of draws stays
    /// close to one until the store is very full. The returned code was free
    /// when checked; callers still need [`LinkStore::insert`] to claim it.
    pub async fn generate_unique(&self, store: &LinkStore) -> String {
        loop {
            let code = self.sample();
            if !RESERVED.contains(&code.as_str()) && !store.contains(&code).await {
                return code;
            }
            tracing::debug!("Short code collision on '{}', resampling", code);
        }
    }
}
