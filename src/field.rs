//! Modular arithmetic used by the polynomial accumulator.
//!
//! Everything here works in a *lazy* representation of the field
//! `2**61 - 1`: values are 64-bit integers congruent mod `2**64 - 8`, not
//! necessarily reduced to the canonical representative. Since
//! `2**64 - 8 == 8 * (2**61 - 1)`, any value reduced mod `2**64 - 8` is
//! automatically congruent mod `2**61 - 1`, and the final reduction to the
//! canonical representative (`% MODULUS`) only has to happen where the
//! caller actually needs a canonical field element (`Params::prepare`).

/// The Mersenne prime the polynomial hash works over.
pub const MODULUS: u64 = (1u64 << 61) - 1;

/// `2**64 - 8`, the lazy-reduction target. `add_mod_fast`/`mul_mod_fast`
/// keep values congruent to this modulus without fully reducing.
const LAZY_MODULUS_NEG: u64 = 8;

/// Add two values, returning a sum congruent mod `2**64 - 8`.
///
/// The result may exceed the canonical representative by up to the lazy
/// offset of 8; it is not guaranteed to be `< 2**64 - 8`.
#[inline]
pub fn add_mod_fast(x: u64, y: u64) -> u64 {
    match x.overflowing_add(y) {
        (sum, false) => sum,
        (sum, true) => sum.wrapping_add(LAZY_MODULUS_NEG),
    }
}

#[cold]
fn add_mod_slow_slow_path(sum: u64, fixup: u64) -> u64 {
    let sum = if sum >= u64::MAX - 7 { sum.wrapping_add(LAZY_MODULUS_NEG) } else { sum };
    let sum = sum.wrapping_add(fixup);
    if sum >= u64::MAX - 7 { sum.wrapping_add(LAZY_MODULUS_NEG) } else { sum }
}

/// Add two values, returning a sum congruent mod `2**64 - 8` that is also
/// guaranteed to be strictly less than `2**64 - 8`.
///
/// Unlike `add_mod_fast`, this is safe to feed back into `mul_mod_fast` as
/// the accumulator without drifting out of the range `mul_mod_fast` relies
/// on.
#[inline]
pub fn add_mod_slow(x: u64, y: u64) -> u64 {
    let (sum, fixup) = match x.overflowing_add(y) {
        (sum, false) => (sum, 0),
        (sum, true) => (sum, LAZY_MODULUS_NEG),
    };

    // Overflow happens roughly half the time on pseudorandom inputs, but
    // `sum < 2**64 - 16` is almost always true; keep that branch cheap and
    // predictable and push the rare case into a cold slow path.
    if sum < u64::MAX - 15 {
        sum + fixup
    } else {
        add_mod_slow_slow_path(sum, fixup)
    }
}

/// Multiply two values, returning a product congruent mod `2**64 - 8`.
#[inline]
pub fn mul_mod_fast(m: u64, x: u64) -> u64 {
    let product = (m as u128) * (x as u128);
    let lo = product as u64;
    let hi = (product >> 64) as u64;
    add_mod_fast(lo, LAZY_MODULUS_NEG * hi)
}

/// One step of Horner's method, absorbing two field elements `x` and `y`
/// per step via the precomputed multiplier pair `(m0, m1)` (`m0` is the
/// base multiplier squared, `m1` is the base multiplier itself).
///
/// The outermost `add_mod_slow` is load-bearing: it guarantees `acc`
/// re-enters the next call strictly below `2**64 - 8`, which is exactly
/// what `add_mod_fast`/`mul_mod_fast` assume of their inputs.
#[inline]
pub fn horner_double_update(acc: u64, m0: u64, m1: u64, x: u64, y: u64) -> u64 {
    let acc = add_mod_fast(acc, x);
    add_mod_slow(mul_mod_fast(m0, acc), mul_mod_fast(m1, y))
}

/// Reduce a lazily-represented value to the canonical field element,
/// `0 <= result < 2**61 - 1`.
#[inline]
pub fn reduce(x: u64) -> u64 {
    let x = if x >= u64::MAX - 7 { x.wrapping_add(LAZY_MODULUS_NEG) } else { x };
    x % MODULUS
}
