//! A fast, keyed, non-cryptographic 64-bit hash.
//!
//! The algorithm is a polynomial hash over the Mersenne field `2**61 - 1`
//! (see [`field`]), fed by a PH block compressor (see [`ph`]) built on
//! carryless multiplication (see [`clmul`]). Short inputs (`<= 8` bytes)
//! and medium inputs (`9..=16` bytes) skip the block compressor entirely
//! and go through their own dedicated mixers; everything from 17 bytes up
//! goes through PH, 256 bytes at a time (see [`tiers`]).
//!
//! Key material (the [`Params`]) is not a single integer seed: it is a
//! two-pair polynomial multiplier plus a noise table, generated from
//! external randomness and sanitised by [`Params::prepare`]. A single
//! `Params`, reused across any number of calls, supports two independent
//! digests per input (`which = 0` and `which = 1`) via a Toeplitz shift
//! of the noise table — see [`fingerprint`] — without the cost of
//! preparing two separate key sets.
//!
//! ```
//! use uhash::Params;
//!
//! # #[cfg(feature = "rand")]
//! # fn demo() {
//! let mut rng = rand::thread_rng();
//! let params = Params::random_from(&mut rng);
//! let digest = uhash::hash(&params, 0, 0, b"hello, world");
//! let (a, b) = uhash::fingerprint(&params, 0, b"hello, world");
//! assert_eq!(a, digest);
//! assert_ne!(a, b);
//! # }
//! ```

pub mod clmul;
pub mod field;
mod hasher;
pub mod params;
pub mod ph;
mod tiers;

pub use hasher::{Umash64, UmashBuildHasher};
pub use params::{Params, PrepareError};

/// Compute a 64-bit digest of `data`, keyed by `params` and `seed`.
///
/// `which` selects one of the two independent hash functions a single
/// `Params` provides: any nonzero value is treated the same as `1` (see
/// [`fingerprint`] to get both at once). Dispatches to the short, medium
/// or long path purely on `data.len()`; all three agree on every other
/// argument.
pub fn hash(params: &Params, seed: u64, which: u8, data: &[u8]) -> u64 {
    let which = usize::from(which != 0);
    let noise = &params.ph[which * params::TOEPLITZ_SHIFT..];
    let poly = params.poly[which];

    match data.len() {
        0..=8 => tiers::hash_short(noise, seed, data),
        9..=16 => tiers::hash_medium(poly, noise, seed, data),
        _ => tiers::hash_long(poly, noise, seed, data),
    }
}

/// Compute both of `params`'s independent digests of `data` at once.
///
/// Equivalent to `(hash(params, seed, 0, data), hash(params, seed, 1,
/// data))`, but shares the input scan between the two calls wherever the
/// underlying path allows it.
pub fn fingerprint(params: &Params, seed: u64, data: &[u8]) -> (u64, u64) {
    (hash(params, seed, 0, data), hash(params, seed, 1, data))
}
