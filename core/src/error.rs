use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least one cell wide and one cell tall")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Tile size must be positive")]
    InvalidTileSize,
    #[error("Field does not fit in screen coordinates")]
    FieldOutOfRange,
    #[error("Mine variant out of range")]
    InvalidMineVariant,
}

pub type Result<T> = core::result::Result<T, GameError>;
