//! 64x64 -> 128-bit carryless multiplication (GF(2) polynomial product).
//!
//! The contract is bit-exact agreement with the GF(2) polynomial product,
//! not a particular timing profile: on x86_64 with `pclmulqdq` available we
//! use the hardware instruction, otherwise a portable shift-and-xor
//! fallback that is always compiled in (and used directly on every other
//! target, plus cross-checked against the hardware path in tests).

#[cfg(target_arch = "x86_64")]
use std::sync::OnceLock;

/// Carryless-multiply `a` and `b`, returning `(low, high)` halves of the
/// 128-bit GF(2) product.
#[inline]
pub fn clmul64(a: u64, b: u64) -> (u64, u64) {
    #[cfg(target_arch = "x86_64")]
    {
        if has_pclmulqdq() {
            // Safety: gated on the runtime feature check above.
            return unsafe { clmul64_hw(a, b) };
        }
    }
    clmul64_portable(a, b)
}

#[cfg(target_arch = "x86_64")]
fn has_pclmulqdq() -> bool {
    static DETECTED: OnceLock<bool> = OnceLock::new();
    *DETECTED.get_or_init(|| std::is_x86_feature_detected!("pclmulqdq"))
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "pclmulqdq", enable = "sse2")]
unsafe fn clmul64_hw(a: u64, b: u64) -> (u64, u64) {
    use std::arch::x86_64::*;

    let a = _mm_set_epi64x(0, a as i64);
    let b = _mm_set_epi64x(0, b as i64);
    let product = _mm_clmulepi64_si128::<0x00>(a, b);
    let lo = _mm_cvtsi128_si64(product) as u64;
    let hi = _mm_cvtsi128_si64(_mm_srli_si128::<8>(product)) as u64;
    (lo, hi)
}

/// Portable shift-and-xor carryless multiply: for every set bit of `b`,
/// xor a shifted copy of `a` into the running 128-bit product.
#[inline]
fn clmul64_portable(a: u64, b: u64) -> (u64, u64) {
    let mut lo = 0u64;
    let mut hi = 0u64;

    if (b & 1) != 0 {
        lo ^= a;
    }
    let mut i = 1;
    while i < 64 {
        if (b >> i) & 1 != 0 {
            lo ^= a << i;
            hi ^= a >> (64 - i);
        }
        i += 1;
    }

    (lo, hi)
}
