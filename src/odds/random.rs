use rand::{Rng, RngCore};

/// Anything that can hand out uniform samples in `[0, 1)`.
///
/// Every `rand` generator implements this, so a seeded `ChaCha8Rng` gives
/// reproducible rounds while the live game can pass `thread_rng()`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_samples_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let mut a = ChaCha8Rng::seed_from_u64(2024);
        let mut b = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..100 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }
}
