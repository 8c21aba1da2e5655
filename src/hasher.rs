//! `std::hash::Hasher`/`BuildHasher` adapters over the one-shot [`hash`]
//! entry point, for callers who want to drop this algorithm into a
//! `HashMap`/`HashSet` rather than call it directly on a byte slice.
//!
//! Neither type makes the core algorithm streaming: `Umash64` buffers
//! every written byte into a `Vec<u8>` and only calls [`hash`] once, in
//! `finish()`. That makes it a poor fit for very large or unbounded
//! writes; reach for the free functions directly in that case.

use std::hash::{BuildHasher, Hasher};
use std::sync::Arc;

use crate::{hash, Params};

/// A buffering `Hasher` adapter over a single [`Params`] and seed.
///
/// Every `write*` call appends to an internal buffer; `finish()` hashes
/// the accumulated bytes in one call to [`hash`] with `which = 0`. Reused
/// across multiple `write`/`finish` cycles only if `Hasher::write` is
/// never called again after `finish` without an intervening reset —
/// `std::hash::Hash` implementations that call `write` then `finish` then
/// keep writing (which the trait does not forbid) will see the buffer
/// keep growing, not reset; this mirrors what a buffering adapter can
/// honestly promise and is why it is not the default for hot paths.
pub struct Umash64 {
    params: Arc<Params>,
    seed: u64,
    buf: Vec<u8>,
}

impl Umash64 {
    /// Build an adapter around an already-[`prepare`](Params::prepare)d
    /// key and seed.
    pub fn new(params: Arc<Params>, seed: u64) -> Umash64 {
        Umash64 { params, seed, buf: Vec::new() }
    }
}

impl Hasher for Umash64 {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        hash(&self.params, self.seed, 0, &self.buf)
    }
}

/// A `BuildHasher` producing [`Umash64`] instances that all share one
/// prepared [`Params`] and seed, for use as `HashMap<K, V,
/// UmashBuildHasher>`.
#[derive(Clone)]
pub struct UmashBuildHasher {
    params: Arc<Params>,
    seed: u64,
}

impl UmashBuildHasher {
    /// Build a `BuildHasher` sharing `params` (by `Arc`, since `Params`
    /// does not implement `Copy`) across every `Umash64` it creates.
    pub fn new(params: Arc<Params>, seed: u64) -> UmashBuildHasher {
        UmashBuildHasher { params, seed }
    }
}

impl BuildHasher for UmashBuildHasher {
    type Hasher = Umash64;

    #[inline]
    fn build_hasher(&self) -> Umash64 {
        Umash64::new(Arc::clone(&self.params), self.seed)
    }
}
