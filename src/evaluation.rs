use crate::board::{Board, Color, GameResult, Piece, Rank, Square};
use crate::movegen::MoveGenerator;

/// Centre of the board in (row, col) space.
const CENTER: f64 = 3.5;

pub struct Evaluator {
    // Terminal scores
    pub win_score: f64,

    // Material
    pub piece_value: f64,
    pub king_value: f64,

    // Per-square bonuses
    pub king_square_bonus: f64,
    pub center_reach: f64,
    pub center_weight: f64,

    // Tactics
    pub capture_threat_bonus: f64,

    move_generator: MoveGenerator,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            win_score: 1000.0,

            piece_value: 10.0,
            king_value: 20.0,

            king_square_bonus: 15.0,
            center_reach: 4.0,
            center_weight: 0.5,

            capture_threat_bonus: 5.0,

            move_generator: MoveGenerator::new(),
        }
    }

    /// Scores `board` from `perspective`'s point of view; higher is better.
    pub fn score(&self, board: &Board, perspective: Color) -> f64 {
        match board.winner() {
            GameResult::Winner(color) if color == perspective => return self.win_score,
            GameResult::Winner(_) => return -self.win_score,
            GameResult::InProgress => {}
        }

        let mut score = 0.0;
        score += self.evaluate_material(board, perspective);
        score += self.evaluate_squares(board, perspective);
        score += self.evaluate_capture_threats(board, perspective);
        score
    }

    fn evaluate_material(&self, board: &Board, perspective: Color) -> f64 {
        let opponent = perspective.opposite();
        let pieces =
            f64::from(board.piece_count(perspective)) - f64::from(board.piece_count(opponent));
        let kings = board.king_count(perspective) as f64 - board.king_count(opponent) as f64;
        pieces * self.piece_value + kings * self.king_value
    }

    fn evaluate_squares(&self, board: &Board, perspective: Color) -> f64 {
        board
            .pieces()
            .map(|(square, piece)| {
                let value = self.square_value(square, piece);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    fn square_value(&self, square: Square, piece: Piece) -> f64 {
        let row = f64::from(square.row);
        let col = f64::from(square.col);

        let rank_value = match piece.rank {
            Rank::King => self.king_square_bonus,
            // distance already covered toward the promotion rank
            Rank::Man => match piece.color {
                Color::Light => 7.0 - row,
                Color::Dark => row,
            },
        };

        let center_distance = (CENTER - row).abs() + (CENTER - col).abs();
        rank_value + (self.center_reach - center_distance) * self.center_weight
    }

    fn evaluate_capture_threats(&self, board: &Board, perspective: Color) -> f64 {
        let own = self.move_generator.pieces_with_capture(board, perspective) as f64;
        let theirs = self
            .move_generator
            .pieces_with_capture(board, perspective.opposite()) as f64;
        (own - theirs) * self.capture_threat_bonus
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
