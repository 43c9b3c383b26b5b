use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement, reproducible when built from a seed.
#[derive(Clone, Debug)]
pub struct RandomSpawner {
    seed: u64,
    rng: SmallRng,
}

impl RandomSpawner {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fresh, non-reproducible seed taken from the thread RNG.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::debug!("Random spawner seeded with {}", seed);
        Self::from_seed(seed)
    }

    /// Seed this spawner was created with, enough to replay the same layout.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineSpawner for RandomSpawner {
    fn next_position(&mut self, (size_x, size_y): Coord2) -> Coord2 {
        (
            self.rng.random_range(0..size_x),
            self.rng.random_range(0..size_y),
        )
    }

    fn next_variant(&mut self) -> MineVariant {
        MineVariant::new(self.rng.random_range(1..=MineVariant::COUNT)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomSpawner::from_seed(42);
        let mut b = RandomSpawner::from_seed(42);

        for _ in 0..32 {
            assert_eq!(a.next_position((9, 7)), b.next_position((9, 7)));
            assert_eq!(a.next_variant(), b.next_variant());
        }
    }

    #[test]
    fn positions_stay_in_bounds() {
        let mut spawner = RandomSpawner::from_seed(7);

        for _ in 0..256 {
            let pos = spawner.next_position((5, 2));
            assert!(in_bounds(pos, (5, 2)), "{pos:?} out of bounds");
        }
    }

    #[test]
    fn variants_cover_valid_range() {
        let mut spawner = RandomSpawner::from_seed(3);

        for _ in 0..64 {
            let variant = spawner.next_variant().get();
            assert!((1..=MineVariant::COUNT).contains(&variant));
        }
    }
}
