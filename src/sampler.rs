//! Degree and index sampling for the encoder. Generic over `rand::Rng` so
//! callers can supply a seeded RNG for deterministic tests, or
//! `rand::thread_rng()` in production.

use rand::Rng;

use crate::rsd::RobustSoliton;

/// Draws one degree in `1..=k` from the RSD's PMF via inverse-CDF sampling:
/// draw `r` uniform in `[0, 1)`, return the smallest `d` with
/// `cdf(d) >= r`.
pub fn sample_degree<R: Rng + ?Sized>(rng: &mut R, rsd: &RobustSoliton) -> usize {
    let k = rsd.k();
    if k == 1 {
        return 1;
    }

    let r: f64 = rng.gen_range(0.0..1.0);
    let mut acc = 0.0;
    for (i, p) in rsd.pmf().iter().enumerate() {
        acc += p;
        if acc >= r {
            return i + 1;
        }
    }
    // Floating-point rounding can leave the accumulator a hair under 1.0;
    // fall back to the last degree rather than panic.
    k
}

/// Selects `degree` distinct indices from `0..k` uniformly at random,
/// without replacement, via partial Fisher-Yates. `degree` is clamped to
/// `k` (a degree sampled as `> k` cannot occur, but callers constructing a
/// degree by hand should not be able to trigger an out-of-bounds draw).
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, k: usize, degree: usize) -> Vec<usize> {
    let degree = degree.min(k);
    let mut pool: Vec<usize> = (0..k).collect();
    for i in 0..degree {
        let j = rng.gen_range(i..k);
        pool.swap(i, j);
    }
    pool.truncate(degree);
    pool.sort_unstable();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sample_degree_stays_in_range() {
        let rsd = RobustSoliton::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let d = sample_degree(&mut rng, &rsd);
            assert!((1..=100).contains(&d));
        }
    }

    #[test]
    fn sample_indices_are_distinct_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let indices = sample_indices(&mut rng, 50, 12);
            assert_eq!(indices.len(), 12);
            let mut sorted = indices.clone();
            sorted.dedup();
            assert_eq!(sorted.len(), indices.len(), "indices must be distinct");
            assert!(indices.iter().all(|&i| i < 50));
        }
    }

    #[test]
    fn sample_indices_degree_equal_to_k_returns_all() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let indices = sample_indices(&mut rng, 5, 5);
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let rsd = RobustSoliton::new(40);
        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        let seq1: Vec<usize> = (0..20).map(|_| sample_degree(&mut rng1, &rsd)).collect();
        let seq2: Vec<usize> = (0..20).map(|_| sample_degree(&mut rng2, &rsd)).collect();
        assert_eq!(seq1, seq2);
    }
}
