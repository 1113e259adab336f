use std::fmt;

use crate::board::{Board, Color, Piece, Rank, Square};

/// Diagonal directions in generation order.
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A single step or a single jump. Multi-jumps are chains of jumps applied one
/// after another while the same side keeps the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Square>,
}

impl Move {
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    pub fn jump(from: Square, to: Square, captured: Square) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(f, "{} x{} -> {}", self.from, captured, self.to),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Directions a piece may move or capture in: men only forward, kings all four.
    fn directions(piece: Piece) -> impl Iterator<Item = (i8, i8)> {
        DIAGONALS.into_iter().filter(move |&(dr, _)| match piece.rank {
            Rank::King => true,
            Rank::Man => dr == piece.color.forward(),
        })
    }

    pub fn simple_moves(&self, board: &Board, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        let Some(piece) = board.get(square) else {
            return moves;
        };

        for (dr, dc) in Self::directions(piece) {
            match piece.rank {
                Rank::Man => {
                    if let Some(target) = square.offset(dr, dc) {
                        if board.is_empty(target) {
                            moves.push(Move::step(square, target));
                        }
                    }
                }
                Rank::King => {
                    let mut cursor = square;
                    while let Some(target) = cursor.offset(dr, dc) {
                        if !board.is_empty(target) {
                            break;
                        }
                        moves.push(Move::step(square, target));
                        cursor = target;
                    }
                }
            }
        }

        moves
    }

    pub fn capture_moves(&self, board: &Board, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        let Some(piece) = board.get(square) else {
            return moves;
        };
        let enemy = piece.color.opposite();

        for (dr, dc) in Self::directions(piece) {
            let Some(over) = square.offset(dr, dc) else {
                continue;
            };
            if !board.is_owned_by(over, enemy) {
                continue;
            }
            if let Some(landing) = over.offset(dr, dc) {
                if board.is_empty(landing) {
                    moves.push(Move::jump(square, landing, over));
                }
            }
        }

        moves
    }

    /// All legal moves for `color` in board-scan order. Capturing is mandatory:
    /// when any capture exists only captures are returned.
    pub fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        let own: Vec<Square> = board
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(square, _)| square)
            .collect();

        let captures: Vec<Move> = own
            .iter()
            .flat_map(|&square| self.capture_moves(board, square))
            .collect();
        if !captures.is_empty() {
            return captures;
        }

        own.iter()
            .flat_map(|&square| self.simple_moves(board, square))
            .collect()
    }

    pub fn has_capture(&self, board: &Board, color: Color) -> bool {
        board.pieces().any(|(square, piece)| {
            piece.color == color && !self.capture_moves(board, square).is_empty()
        })
    }

    /// Number of `color` pieces that currently have at least one capture.
    pub fn pieces_with_capture(&self, board: &Board, color: Color) -> usize {
        board
            .pieces()
            .filter(|&(square, piece)| {
                piece.color == color && !self.capture_moves(board, square).is_empty()
            })
            .count()
    }

    /// Looks up the side to move's legal move from `from` to `to`.
    pub fn find_move(&self, board: &Board, from: Square, to: Square) -> Option<Move> {
        self.legal_moves(board, board.current_player())
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to)
    }

    pub fn is_move_legal(&self, board: &Board, mv: &Move) -> bool {
        self.legal_moves(board, board.current_player()).contains(mv)
    }
}
