use std::fmt;

use tracing::trace;

use crate::error::{CheckersError, CheckersResult};
use crate::movegen::{Move, MoveGenerator};

pub const BOARD_SIZE: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row step a man of this colour takes toward its promotion rank.
    pub fn forward(&self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    pub fn promotion_row(&self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => BOARD_SIZE - 1,
        }
    }

    fn index(&self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Light => write!(f, "light"),
            Color::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Self { color, rank: Rank::Man }
    }

    pub const fn king(color: Color) -> Self {
        Self { color, rank: Rank::King }
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    fn symbol(&self) -> char {
        match (self.color, self.rank) {
            (Color::Dark, Rank::Man) => 'd',
            (Color::Dark, Rank::King) => 'D',
            (Color::Light, Rank::Man) => 'l',
            (Color::Light, Rank::King) => 'L',
        }
    }

    /// `Some(None)` for an empty square, `None` for an unknown symbol.
    fn from_symbol(symbol: char) -> Option<Option<Piece>> {
        match symbol {
            '.' => Some(None),
            'd' => Some(Some(Piece::man(Color::Dark))),
            'D' => Some(Some(Piece::king(Color::Dark))),
            'l' => Some(Some(Piece::man(Color::Light))),
            'L' => Some(Some(Piece::king(Color::Light))),
            _ => None,
        }
    }
}

/// Zero-based `(row, col)` coordinate. Row 0 is the Dark home rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Playable squares; every piece in a real game stays on these.
    pub fn is_dark(&self) -> bool {
        (self.row + self.col).rem_euclid(2) == 1
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let target = Square::new(self.row + dr, self.col + dc);
        if target.is_valid() {
            Some(target)
        } else {
            None
        }
    }
}

impl From<(i8, i8)> for Square {
    fn from((row, col): (i8, i8)) -> Self {
        Square::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Winner(Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    piece_counts: [u8; 2], // Light, Dark
    current_player: Color,
}

impl Board {
    /// Standard opening position with Dark to move.
    pub fn new() -> Self {
        let mut board = Self::empty(Color::Dark);
        board.initialize();
        board
    }

    /// A board with no pieces, used to set up analysis positions.
    pub fn empty(to_move: Color) -> Self {
        Self {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            piece_counts: [0, 0],
            current_player: to_move,
        }
    }

    pub fn initialize(&mut self) {
        self.cells = [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Square::new(row, col);
                if !square.is_dark() {
                    continue;
                }
                self.cells[row as usize][col as usize] = match row {
                    0..=2 => Some(Piece::man(Color::Dark)),
                    5..=7 => Some(Piece::man(Color::Light)),
                    _ => None,
                };
            }
        }
        self.current_player = Color::Dark;
        self.recount();
    }

    /// Parses an 8-row diagram: `.` empty, `d`/`D` dark man/king, `l`/`L` light
    /// man/king. Whitespace inside a row and blank lines are ignored.
    pub fn from_diagram(diagram: &str, to_move: Color) -> CheckersResult<Self> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(CheckersError::DiagramRows { rows: rows.len() });
        }

        let mut board = Self::empty(to_move);
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != BOARD_SIZE as usize {
                return Err(CheckersError::DiagramWidth {
                    row,
                    width: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell = Piece::from_symbol(symbol)
                    .ok_or(CheckersError::UnknownSymbol { symbol, row, col })?;
                board.cells[row][col] = cell;
            }
        }
        board.recount();
        Ok(board)
    }

    /// Puts `piece` on an empty in-bounds square and counts it.
    pub fn place(&mut self, square: Square, piece: Piece) -> CheckersResult<()> {
        if !square.is_valid() {
            return Err(CheckersError::InvalidSquare {
                row: square.row,
                col: square.col,
            });
        }
        if !self.is_empty(square) {
            return Err(CheckersError::SquareOccupied {
                row: square.row,
                col: square.col,
            });
        }
        self.cells[square.row as usize][square.col as usize] = Some(piece);
        self.piece_counts[piece.color.index()] += 1;
        Ok(())
    }

    fn recount(&mut self) {
        let mut counts = [0u8; 2];
        for (_, piece) in self.pieces() {
            counts[piece.color.index()] += 1;
        }
        self.piece_counts = counts;
    }

    pub fn is_valid_square(&self, square: Square) -> bool {
        square.is_valid()
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    /// False for off-board squares, so a scan can never land outside the grid.
    pub fn is_empty(&self, square: Square) -> bool {
        square.is_valid() && self.get(square).is_none()
    }

    pub fn is_owned_by(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color == color)
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn piece_count(&self, color: Color) -> u8 {
        self.piece_counts[color.index()]
    }

    pub fn king_count(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color == color && piece.is_king())
            .count()
    }

    /// Occupied squares in board-scan order (row-major).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::new(row as i8, col as i8), piece))
            })
        })
    }

    /// Moves the piece, removes a jumped piece and promotes on the back rank.
    /// The side to move is left unchanged; see `apply_player_move` for turn
    /// advancement.
    pub fn apply_move(&mut self, mv: &Move) {
        let Some(mut piece) = self.cells[mv.from.row as usize][mv.from.col as usize].take() else {
            debug_assert!(false, "no piece on {}", mv.from);
            return;
        };

        if let Some(captured) = mv.captured {
            if let Some(victim) = self.cells[captured.row as usize][captured.col as usize].take() {
                self.piece_counts[victim.color.index()] -= 1;
            }
        }

        if piece.rank == Rank::Man && mv.to.row == piece.color.promotion_row() {
            piece.rank = Rank::King;
        }
        self.cells[mv.to.row as usize][mv.to.col as usize] = Some(piece);
    }

    /// Applies `mv` and hands the turn over, unless `mv` was a capture and the
    /// same piece can capture again from its landing square.
    pub fn play(&mut self, mv: &Move) {
        let Some(mover) = self.get(mv.from).map(|piece| piece.color) else {
            return;
        };
        self.apply_move(mv);

        let continues = mv.is_capture()
            && !MoveGenerator::new().capture_moves(self, mv.to).is_empty();
        if continues {
            trace!(square = %mv.to, "capture continues");
            self.current_player = mover;
        } else {
            self.current_player = mover.opposite();
        }
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    pub fn winner(&self) -> GameResult {
        if self.piece_count(Color::Light) == 0 {
            return GameResult::Winner(Color::Dark);
        }
        if self.piece_count(Color::Dark) == 0 {
            return GameResult::Winner(Color::Light);
        }

        let generator = MoveGenerator::new();
        if generator.legal_moves(self, self.current_player).is_empty() {
            return GameResult::Winner(self.current_player.opposite());
        }

        GameResult::InProgress
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: Vec<String> = (0..BOARD_SIZE)
                .map(|col| {
                    self.get(Square::new(row, col))
                        .map_or('.', |piece| piece.symbol())
                        .to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
