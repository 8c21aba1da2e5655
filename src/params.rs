//! Key material: the polynomial multiplier pairs and PH noise table that
//! parameterise every hash call, plus `prepare`, which turns a raw,
//! randomly-filled buffer into one that satisfies the invariants the
//! hashing paths assume.

use thiserror::Error;

use crate::field::{self, MODULUS};
use crate::ph::PARAM_COUNT;

/// Offset, in noise words, between the two PH noise-table slices used by
/// the fingerprint's two halves (and by `hash`'s `which` selector).
pub const TOEPLITZ_SHIFT: usize = 4;

/// Total noise-table length: one PH block plus the Toeplitz overlap.
pub const NOISE_LEN: usize = PARAM_COUNT + TOEPLITZ_SHIFT;

/// Prepared (or not-yet-prepared) key material for `hash`/`fingerprint`.
///
/// Each of the two polynomial pairs is stored as `[pre_squared, base]`: the
/// base multiplier is a 61-bit field element, and `pre_squared` is its
/// square reduced mod `2**61 - 1`, precomputed once by `prepare` so the
/// hot path never has to do that squaring itself.
///
/// `Params` is a plain value: it can be freely cloned and shared by
/// read-only reference across any number of threads once prepared.
#[derive(Clone, Debug)]
pub struct Params {
    pub(crate) poly: [[u64; 2]; 2],
    pub(crate) ph: [u64; NOISE_LEN],
}

/// Why `prepare` could not turn a raw buffer into valid key material.
///
/// Both variants mean the same thing operationally (the embedded
/// rejection-sampling pool ran dry): they are split so a caller can tell,
/// if they care, whether it was a bad multiplier or a noise collision that
/// exhausted it, for diagnostics.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// A polynomial base multiplier was zero (or out of range) and no
    /// spare entropy remained to draw a replacement.
    #[error("polynomial multiplier pool exhausted while sanitising base multiplier {index}")]
    MultiplierPoolExhausted { index: usize },
    /// A PH noise-table entry duplicated an earlier one and no spare
    /// entropy remained to draw a replacement.
    #[error("noise table pool exhausted while de-duplicating entry {index}")]
    NoiseTablePoolExhausted { index: usize },
}

/// Small rejection-sampling entropy pool drawn from the two redundant
/// pre-squared slots of a raw (not-yet-prepared) buffer.
struct Pool {
    buf: [u64; 2],
    idx: usize,
}

impl Pool {
    fn next(&mut self) -> Option<u64> {
        let v = *self.buf.get(self.idx)?;
        self.idx += 1;
        Some(v)
    }
}

impl Params {
    /// Construct key material directly from a raw, externally-randomised
    /// buffer (two polynomial pairs, then the noise table), without
    /// checking any invariant. Callers must run `prepare` on the result
    /// before using it with `hash`/`fingerprint`.
    pub fn from_raw(poly: [[u64; 2]; 2], ph: [u64; NOISE_LEN]) -> Params {
        Params { poly, ph }
    }

    /// Sanitise `self` in place so it satisfies the invariants `hash` and
    /// `fingerprint` assume:
    ///
    /// - each base multiplier is in `(0, 2**61 - 1)`;
    /// - each pre-squared multiplier equals `base^2 mod (2**61 - 1)`;
    /// - every noise-table entry is pairwise distinct.
    ///
    /// Mutates `self` even on failure (the reference implementation this
    /// is ported from does the same) — on `Err`, discard `self` or
    /// re-randomise and retry; do not pass it to `hash`/`fingerprint`.
    pub fn prepare(&mut self) -> Result<(), PrepareError> {
        let mut pool = Pool { buf: [self.poly[0][0], self.poly[1][0]], idx: 0 };

        for i in 0..self.poly.len() {
            let mut f = self.poly[i][1];
            loop {
                f &= MODULUS;
                if f != 0 && f < MODULUS {
                    break;
                }
                f = pool.next().ok_or(PrepareError::MultiplierPoolExhausted { index: i })?;
            }

            self.poly[i][0] = field::reduce(field::mul_mod_fast(f, f));
            self.poly[i][1] = f;
        }

        for i in 0..self.ph.len() {
            while self.ph[..i].contains(&self.ph[i]) {
                self.ph[i] = pool.next().ok_or(PrepareError::NoiseTablePoolExhausted { index: i })?;
            }
        }

        Ok(())
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand_support {
    use super::*;
    use rand::RngCore;

    impl Params {
        /// Fill a raw buffer from `rng` and prepare it, retrying with fresh
        /// randomness if the pool happens to be exhausted (astronomically
        /// unlikely with a real RNG, but the loop keeps this helper total).
        ///
        /// Gated behind `cfg(test)` or the `rand` feature: production
        /// callers are expected to supply their own randomised buffer and
        /// call `prepare` directly (see SPEC_FULL.md S4.9).
        pub fn random_from(rng: &mut impl RngCore) -> Params {
            loop {
                let mut poly = [[0u64; 2]; 2];
                let mut ph = [0u64; NOISE_LEN];
                for pair in poly.iter_mut() {
                    pair[0] = rng.next_u64();
                    pair[1] = rng.next_u64();
                }
                for word in ph.iter_mut() {
                    *word = rng.next_u64();
                }

                let mut params = Params::from_raw(poly, ph);
                if params.prepare().is_ok() {
                    return params;
                }
            }
        }
    }
}
