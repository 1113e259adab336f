use thiserror::Error;

/// Errors raised while setting up positions or configuring the engine.
///
/// Rule violations during play are not errors: an illegal move is reported by
/// `apply_player_move` returning `false`, and a side without moves gets `None`
/// from the search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    #[error("square ({row}, {col}) is off the board")]
    InvalidSquare { row: i8, col: i8 },

    #[error("square ({row}, {col}) is already occupied")]
    SquareOccupied { row: i8, col: i8 },

    #[error("diagram has {rows} rows, expected 8")]
    DiagramRows { rows: usize },

    #[error("diagram row {row} has {width} squares, expected 8")]
    DiagramWidth { row: usize, width: usize },

    #[error("unknown symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("difficulty level {0} is not supported (expected 1, 2 or 3)")]
    InvalidDifficulty(u8),
}

pub type CheckersResult<T> = Result<T, CheckersError>;
