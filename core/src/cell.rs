use serde::{Deserialize, Serialize};

use crate::GameError;

/// Player-visible state of a single cell.
///
/// Transitions are `Hidden <-> Flagged` and `Hidden -> Revealed`; `Revealed` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Cosmetic mine sub-type, only used to pick a sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MineVariant(u8);

impl MineVariant {
    /// Number of distinct variants, numbered `1..=COUNT`.
    pub const COUNT: u8 = 3;

    pub const fn new(variant: u8) -> Option<Self> {
        if variant >= 1 && variant <= Self::COUNT {
            Some(Self(variant))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for MineVariant {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for MineVariant {
    type Error = GameError;

    fn try_from(variant: u8) -> Result<Self, Self::Error> {
        Self::new(variant).ok_or(GameError::InvalidMineVariant)
    }
}

impl From<MineVariant> for u8 {
    fn from(variant: MineVariant) -> Self {
        variant.0
    }
}

/// One grid position: reveal state, optional mine, and the adjacent mine count.
///
/// Mutators are only reachable through [`Grid`](crate::Grid), which is responsible for
/// checking the state before calling them. Calling one out of order is a bug and panics.
/// Cells serialize as part of a grid snapshot but can't be deserialized, since that would
/// skip the mutators' checks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    state: RevealState,
    mine: Option<MineVariant>,
    neighbor_mines: Option<u8>,
}

impl Cell {
    pub(crate) fn spawn_mine(&mut self, variant: MineVariant) {
        assert!(self.mine.is_none(), "cell already holds a mine");
        self.mine = Some(variant);
    }

    pub(crate) fn set_neighbor_count(&mut self, count: u8) {
        assert!(self.neighbor_mines.is_none(), "neighbor count already set");
        assert!(count <= 8, "a cell has at most 8 neighbors, got {count}");
        self.neighbor_mines = Some(count);
    }

    pub(crate) fn reveal(&mut self) {
        assert!(!self.is_revealed(), "cell already revealed");
        self.state = RevealState::Revealed;
    }

    pub(crate) fn toggle_flag(&mut self) {
        use RevealState::*;

        self.state = match self.state {
            Hidden => Flagged,
            Flagged => Hidden,
            Revealed => panic!("cannot flag a revealed cell"),
        };
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state == RevealState::Hidden
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.state == RevealState::Flagged
    }

    pub fn has_mine(&self) -> bool {
        self.mine.is_some()
    }

    /// `None` unless the cell holds a mine.
    pub fn mine_variant(&self) -> Option<MineVariant> {
        self.mine
    }

    pub fn has_neighbor_mines(&self) -> bool {
        self.neighbor_count() > 0
    }

    /// Number of mines among the adjacent cells, 0 until the grid has computed it.
    pub fn neighbor_count(&self) -> u8 {
        self.neighbor_mines.unwrap_or(0)
    }

    /// Whether this cell satisfies the win rule: mines flagged, everything else revealed.
    pub fn is_cleared(&self) -> bool {
        if self.has_mine() {
            self.is_flagged()
        } else {
            self.is_revealed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_hidden_and_empty() {
        let cell = Cell::default();

        assert!(cell.is_hidden());
        assert!(!cell.has_mine());
        assert_eq!(cell.mine_variant(), None);
        assert_eq!(cell.neighbor_count(), 0);
        assert!(!cell.has_neighbor_mines());
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut cell = Cell::default();

        cell.toggle_flag();
        assert!(cell.is_flagged());
        cell.toggle_flag();
        assert!(cell.is_hidden());
    }

    #[test]
    fn mine_keeps_its_variant() {
        let mut cell = Cell::default();
        cell.spawn_mine(MineVariant::new(3).unwrap());

        assert!(cell.has_mine());
        assert_eq!(cell.mine_variant().map(MineVariant::get), Some(3));
    }

    #[test]
    fn cleared_requires_flag_on_mine_and_reveal_elsewhere() {
        let mut mine = Cell::default();
        mine.spawn_mine(MineVariant::default());
        assert!(!mine.is_cleared());
        mine.toggle_flag();
        assert!(mine.is_cleared());

        let mut safe = Cell::default();
        safe.toggle_flag();
        assert!(!safe.is_cleared());
        safe.toggle_flag();
        safe.reveal();
        assert!(safe.is_cleared());
    }

    #[test]
    fn variant_range_is_enforced() {
        assert_eq!(MineVariant::new(0), None);
        assert_eq!(MineVariant::new(4), None);
        assert!(MineVariant::new(MineVariant::COUNT).is_some());
    }

    #[test]
    #[should_panic(expected = "already holds a mine")]
    fn double_mine_panics() {
        let mut cell = Cell::default();
        cell.spawn_mine(MineVariant::default());
        cell.spawn_mine(MineVariant::default());
    }

    #[test]
    #[should_panic(expected = "neighbor count already set")]
    fn neighbor_count_is_set_once() {
        let mut cell = Cell::default();
        cell.set_neighbor_count(2);
        cell.set_neighbor_count(2);
    }

    #[test]
    #[should_panic(expected = "already revealed")]
    fn double_reveal_panics() {
        let mut cell = Cell::default();
        cell.reveal();
        cell.reveal();
    }

    #[test]
    #[should_panic(expected = "cannot flag")]
    fn flagging_revealed_cell_panics() {
        let mut cell = Cell::default();
        cell.reveal();
        cell.toggle_flag();
    }

    #[test]
    fn mine_variant_rejects_out_of_range_values() {
        assert_eq!(MineVariant::try_from(0), Err(GameError::InvalidMineVariant));
        assert_eq!(
            MineVariant::try_from(MineVariant::COUNT + 1),
            Err(GameError::InvalidMineVariant)
        );
        assert_eq!(MineVariant::try_from(2).map(u8::from), Ok(2));

        assert!(serde_json::from_str::<MineVariant>("0").is_err());
        assert!(serde_json::from_str::<MineVariant>("4").is_err());
        assert!(serde_json::from_str::<MineVariant>("255").is_err());
        assert_eq!(serde_json::from_str::<MineVariant>("2").ok(), MineVariant::new(2));
        assert_eq!(serde_json::to_string(&MineVariant::new(3).unwrap()).unwrap(), "3");
    }
}
