use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a cell, given the state of the game.
///
/// Mines stay hidden until the game is lost; after that every mine shows up, correct flags
/// keep their mine and wrong flags get a cross.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    /// Unopened tile.
    Button,
    Flag,
    /// Revealed safe tile with its adjacent mine count, 0 for a blank tile.
    Number(u8),
    /// Unflagged mine shown after a loss.
    Mine(MineVariant),
    /// Flagged mine shown after a loss.
    FlaggedMine(MineVariant),
    /// Flag on a safe tile, shown after a loss.
    WrongFlag,
    /// The mine that was revealed and lost the game.
    Detonated(MineVariant),
}

impl TileView {
    /// Single-character rendering, used for text output.
    pub const fn glyph(self) -> char {
        use TileView::*;
        match self {
            Button => '#',
            Flag => 'F',
            Number(0) => '.',
            Number(n @ 1..=8) => (b'0' + n) as char,
            Number(_) => '?',
            Mine(_) => '*',
            FlaggedMine(_) => 'M',
            WrongFlag => 'X',
            Detonated(_) => '!',
        }
    }
}

impl Cell {
    pub fn view(&self, status: GameStatus) -> TileView {
        use RevealState::*;
        use TileView::*;

        let lost = status == GameStatus::Lost;
        match (self.state(), self.mine_variant()) {
            (Hidden, Some(variant)) if lost => Mine(variant),
            (Hidden, _) => Button,
            (Flagged, Some(variant)) if lost => FlaggedMine(variant),
            (Flagged, None) if lost => WrongFlag,
            (Flagged, _) => Flag,
            (Revealed, Some(variant)) => Detonated(variant),
            (Revealed, None) => Number(self.neighbor_count()),
        }
    }
}

impl Grid {
    pub fn tile_view(&self, coords: Coord2) -> Option<TileView> {
        self.cell(coords).map(|cell| cell.view(self.status()))
    }

    /// Views of all cells in row-major order.
    pub fn tile_views(&self) -> impl Iterator<Item = (Coord2, TileView)> {
        let status = self.status();
        self.cells()
            .map(move |(coords, cell)| (coords, cell.view(status)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::from(self.width());
        for (i, (_, view)) in self.tile_views().enumerate() {
            if i > 0 && i % width == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", view.glyph())?;
        }
        Ok(())
    }
}
