use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of candidate mine positions used while building a [`Grid`].
///
/// The grid rejects positions that already hold a mine and asks again, so an implementation
/// only has to produce in-bounds coordinates; it does not need to avoid repeats.
pub trait MineSpawner {
    /// Next candidate position, must lie within `size`.
    fn next_position(&mut self, size: Coord2) -> Coord2;

    /// Variant for a mine that was just accepted.
    fn next_variant(&mut self) -> MineVariant;
}

impl<S: MineSpawner + ?Sized> MineSpawner for &mut S {
    fn next_position(&mut self, size: Coord2) -> Coord2 {
        (**self).next_position(size)
    }

    fn next_variant(&mut self) -> MineVariant {
        (**self).next_variant()
    }
}
