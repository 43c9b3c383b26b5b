use alloc::collections::VecDeque;

use super::*;

/// Replays a fixed sequence of positions, for deterministic layouts.
///
/// Running out of positions before the grid has all its mines is a bug in the caller and
/// panics. Variants default to the first one unless scripted with [`Self::with_variants`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedSpawner {
    positions: VecDeque<Coord2>,
    variants: VecDeque<MineVariant>,
}

impl ScriptedSpawner {
    pub fn new(positions: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            variants: VecDeque::new(),
        }
    }

    pub fn with_variants(mut self, variants: impl IntoIterator<Item = MineVariant>) -> Self {
        self.variants = variants.into_iter().collect();
        self
    }

    /// Positions not consumed yet.
    pub fn remaining(&self) -> usize {
        self.positions.len()
    }
}

impl MineSpawner for ScriptedSpawner {
    fn next_position(&mut self, _size: Coord2) -> Coord2 {
        match self.positions.pop_front() {
            Some(pos) => pos,
            None => panic!("scripted spawner ran out of positions"),
        }
    }

    fn next_variant(&mut self) -> MineVariant {
        self.variants.pop_front().unwrap_or_default()
    }
}
