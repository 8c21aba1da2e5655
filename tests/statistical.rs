//! Chi-squared smoke test: digests of many distinct inputs under a random
//! key should land roughly uniformly across a fixed number of buckets.
//!
//! The chi-squared statistic and its normalisation are taken from the
//! `examples/chi2.rs` harness this crate's teacher ships for comparing its
//! own hash functions, adapted from one hash function run on many inputs
//! to this crate's two fingerprint halves. This is a smoke test, not a
//! strict statistical proof: a single unlucky run can fail it, which is
//! why the threshold is generous.

use uhash::params::NOISE_LEN;
use uhash::{fingerprint, Params};

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn deterministic_params(seed: u64) -> Params {
    let mut state = seed;
    loop {
        let poly = [[0u64, splitmix64(&mut state)], [0u64, splitmix64(&mut state)]];
        let mut ph = [0u64; NOISE_LEN];
        for w in ph.iter_mut() {
            *w = splitmix64(&mut state);
        }
        let mut params = Params::from_raw(poly, ph);
        if params.prepare().is_ok() {
            return params;
        }
    }
}

/// `(chi2 - n_buckets) / sqrt(n_buckets)`: the same normalisation
/// `examples/chi2.rs` uses, so a value close to zero indicates a
/// close-to-uniform bucket distribution.
fn chi2(buckets: &[usize]) -> f64 {
    let n_buckets = buckets.len() as f64;
    let total: usize = buckets.iter().sum();
    let expected = total as f64 / n_buckets;

    let chi2: f64 = buckets
        .iter()
        .map(|&c| c as f64 - expected)
        .map(|r| (r * r) / expected)
        .sum();
    (chi2 - n_buckets) / n_buckets.sqrt()
}

#[test]
fn digest_low_bits_are_roughly_uniform() {
    let params = deterministic_params(0xA5A5_5A5A_1234_5678);
    let mask_bits = 7u32;
    let n_buckets = 1usize << mask_bits;
    let mask = (n_buckets - 1) as u64;

    let mut buckets = vec![0usize; n_buckets];
    let samples = 20_000;
    let mut state = 1u64;
    for i in 0..samples {
        let len = 1 + (splitmix64(&mut state) % 64) as usize;
        let data: Vec<u8> = (0..len).map(|_| splitmix64(&mut state) as u8).collect();
        let h = uhash::hash(&params, i as u64, 0, &data);
        buckets[(h & mask) as usize] += 1;
    }

    let score = chi2(&buckets).abs();
    assert!(score < 6.0, "chi-squared smoke score too high: {score}");
}

#[test]
fn fingerprint_halves_are_roughly_independent() {
    let params = deterministic_params(0x1357_9BDF_2468_ACE0);
    let mask_bits = 6u32;
    let n_buckets = 1usize << mask_bits;
    let mask = (n_buckets - 1) as u64;

    // Bucket pairs (low bits of each half) and count how often they match;
    // under independence this should be close to 1/n_buckets of samples.
    let mut matches = 0usize;
    let samples = 5_000;
    let mut state = 2u64;
    for _ in 0..samples {
        let len = 17 + (splitmix64(&mut state) % 500) as usize;
        let data: Vec<u8> = (0..len).map(|_| splitmix64(&mut state) as u8).collect();
        let (a, b) = fingerprint(&params, 0, &data);
        if (a & mask) == (b & mask) {
            matches += 1;
        }
    }

    let expected = samples as f64 / n_buckets as f64;
    let ratio = matches as f64 / expected;
    assert!(ratio < 3.0, "fingerprint halves collide on low bits far more than chance: ratio {ratio}");
}
