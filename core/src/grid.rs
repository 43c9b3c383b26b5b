use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// The board: every cell, where the mines are, and whether the game is still going.
///
/// Mines and neighbor counts are fixed at construction. After that the grid only changes
/// through [`Grid::reveal_at`], [`Grid::toggle_flag_at`] and [`Grid::chord_reveal_at`], and
/// stops changing once the game is won or lost.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    config: GameConfig,
    geometry: FieldGeometry,
    cells: Array2<Cell>,
    status: GameStatus,
    revealed_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
    #[serde(skip)]
    pending_detonation: Option<Coord2>,
}

impl Grid {
    /// New grid with mines placed from a fresh random seed.
    #[cfg(feature = "std")]
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_spawner(config, RandomSpawner::from_entropy())
    }

    /// New grid with mines placed by `spawner`, rejecting positions that already hold a mine.
    pub fn with_spawner(config: GameConfig, mut spawner: impl MineSpawner) -> Result<Self> {
        config.validate()?;

        let mut cells: Array2<Cell> = Array2::default(config.size.to_nd_index());

        let mut placed: CellCount = 0;
        let mut rejected: u32 = 0;
        while placed < config.mines {
            let coords = spawner.next_position(config.size);
            assert!(
                in_bounds(coords, config.size),
                "spawner produced {:?} outside of {:?}",
                coords,
                config.size
            );

            let cell = &mut cells[coords.to_nd_index()];
            if cell.has_mine() {
                rejected += 1;
                continue;
            }
            cell.spawn_mine(spawner.next_variant());
            placed += 1;
        }

        let (x_end, y_end) = config.size;
        for y in 0..y_end {
            for x in 0..x_end {
                let count = NeighborIter::new((x, y), config.size)
                    .filter(|&pos| cells[pos.to_nd_index()].has_mine())
                    .count();
                // at most 8 neighbors
                cells[(x, y).to_nd_index()].set_neighbor_count(count as u8);
            }
        }

        log::debug!(
            "Created {}x{} grid with {} mines ({} rejected draws)",
            x_end,
            y_end,
            placed,
            rejected
        );

        Ok(Self {
            config,
            geometry: FieldGeometry::default(),
            cells,
            status: GameStatus::InProgress,
            revealed_count: 0,
            flagged_count: 0,
            triggered_mine: None,
            pending_detonation: None,
        })
    }

    /// Grid with mines at exactly `mine_coords`; repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut unique = BTreeSet::new();
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            if !unique.insert(coords) {
                log::warn!("Duplicate mine at {:?} ignored", coords);
            }
        }

        let mines = CellCount::try_from(unique.len()).map_err(|_| GameError::TooManyMines)?;
        let config = GameConfig::new(size, mines)?;
        Self::with_spawner(config, ScriptedSpawner::new(unique))
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    /// Mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// One-shot detonation signal: the triggered mine the first time it's called after a
    /// loss, `None` otherwise.
    pub fn take_detonation(&mut self) -> Option<Coord2> {
        self.pending_detonation.take()
    }

    pub fn geometry(&self) -> FieldGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: FieldGeometry) {
        self.geometry = geometry;
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        // dimensions come from `Coord` values so the casts are lossless
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Whether every mine is flagged and every other cell is revealed.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(Cell::is_cleared)
    }

    pub fn screen_to_grid(&self, pos: ScreenPos) -> Option<Coord2> {
        self.geometry.screen_to_grid(pos, self.size())
    }

    /// Reveals the cell under a screen position, see [`Self::reveal_at`].
    pub fn reveal_at_screen(&mut self, pos: ScreenPos) -> Result<RevealOutcome> {
        let coords = self.screen_to_grid(pos).ok_or(GameError::InvalidCoords)?;
        self.reveal_at(coords)
    }

    /// Toggles the flag under a screen position, see [`Self::toggle_flag_at`].
    pub fn toggle_flag_at_screen(&mut self, pos: ScreenPos) -> Result<FlagOutcome> {
        let coords = self.screen_to_grid(pos).ok_or(GameError::InvalidCoords)?;
        self.toggle_flag_at(coords)
    }

    /// Reveals a cell, flooding outwards from it when it has no adjacent mines.
    ///
    /// Flagged and already revealed cells are left alone, as is everything once the game
    /// has finished.
    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game is over", coords);
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.flood_reveal(coords);
        Ok(self.settle(outcome))
    }

    /// Flips a hidden cell to flagged or back. Revealed cells can't be flagged.
    pub fn toggle_flag_at(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_finished() {
            log::trace!("Ignoring flag at {:?}, game is over", coords);
            return Ok(FlagOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(FlagOutcome::NoChange);
        }

        cell.toggle_flag();
        if cell.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("Toggled flag at {:?}, {} flags placed", coords, self.flagged_count);

        Ok(match self.refresh_status() {
            GameStatus::Won => FlagOutcome::Won,
            _ => FlagOutcome::Changed,
        })
    }

    /// Reveals a hidden cell like [`Self::reveal_at`]; on a revealed number whose flagged
    /// neighbor count matches it, reveals all its other neighbors instead.
    pub fn chord_reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_revealed() {
            return self.reveal_at(coords);
        }

        let satisfied = cell.neighbor_count() == self.count_flagged_neighbors(coords);
        if !cell.has_neighbor_mines() || !satisfied {
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for neighbor in self.neighbors(coords) {
            outcome = outcome | self.flood_reveal(neighbor);
            if outcome == RevealOutcome::Detonated {
                break;
            }
        }
        Ok(self.settle(outcome))
    }

    /// Reveals `start` and, through an explicit worklist, every cell reachable from it
    /// across cells without adjacent mines.
    ///
    /// A cell is only revealed while hidden, so each cell is processed at most once.
    fn flood_reveal(&mut self, start: Coord2) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut worklist = Vec::from([start]);

        while let Some(coords) = worklist.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_hidden() {
                continue;
            }

            cell.reveal();
            let has_mine = cell.has_mine();
            let spreads = !cell.has_neighbor_mines();

            if has_mine {
                self.detonate(coords);
                outcome = RevealOutcome::Detonated;
                continue;
            }

            self.revealed_count += 1;
            outcome = outcome | RevealOutcome::Revealed;

            if spreads {
                let size = self.size();
                worklist.extend(
                    NeighborIter::new(coords, size)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        if outcome == RevealOutcome::Revealed {
            log::trace!(
                "Reveal at {:?} done, {} cells revealed in total",
                start,
                self.revealed_count
            );
        }
        outcome
    }

    fn detonate(&mut self, coords: Coord2) {
        if self.status.is_finished() {
            return;
        }
        log::debug!("Mine detonated at {:?}", coords);
        self.status = GameStatus::Lost;
        self.triggered_mine = Some(coords);
        self.pending_detonation = Some(coords);
    }

    /// Upgrades the outcome of a reveal once the status has been recomputed.
    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        match (outcome, self.refresh_status()) {
            (RevealOutcome::Revealed, GameStatus::Won) => RevealOutcome::Won,
            (outcome, _) => outcome,
        }
    }

    fn refresh_status(&mut self) -> GameStatus {
        if self.status == GameStatus::InProgress && self.is_cleared() {
            log::debug!("Grid cleared");
            self.status = GameStatus::Won;
        }
        self.status
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count() as u8
    }
}
