use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::board::{Board, Color, GameResult};
use crate::error::CheckersError;
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};

/// Score of a position whose side to move has no legal move. Finite so that
/// alpha-beta comparisons stay exact.
pub const SCORE_MAX: f64 = 1_000_000.0;
pub const SCORE_MIN: f64 = -SCORE_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// Plays a random legal move.
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Search depth in plies.
    pub fn depth(&self) -> u32 {
        u32::from(self.level()) * 2
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = CheckersError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(CheckersError::InvalidDifficulty(other)),
        }
    }
}

pub struct Search {
    evaluator: Evaluator,
    move_generator: MoveGenerator,
    difficulty: Difficulty,
    rng: StdRng,
    nodes_searched: u64,
}

impl Search {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            evaluator: Evaluator::new(),
            move_generator: MoveGenerator::new(),
            difficulty,
            rng: StdRng::from_entropy(),
            nodes_searched: 0,
        }
    }

    /// Fixes the random source used by Easy play and the fallback pick.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Picks `ai_color`'s move on `board`, or `None` when it has no legal move
    /// (which loses the game).
    pub fn find_best_move(&mut self, board: &Board, ai_color: Color) -> Option<Move> {
        self.nodes_searched = 0;

        let moves = self.move_generator.legal_moves(board, ai_color);
        if moves.is_empty() {
            debug!(color = %ai_color, "no legal move available");
            return None;
        }

        if self.difficulty == Difficulty::Easy {
            return self.choose_random_move(&moves);
        }

        let depth = self.difficulty.depth();
        let mut best_move = None;
        let mut best_score = SCORE_MIN;
        let mut alpha = SCORE_MIN;
        let beta = SCORE_MAX;

        for mv in &moves {
            let mut child = board.clone();
            child.play(mv);

            let maximizing = child.current_player() == ai_color;
            let score = self.minimax(&child, depth - 1, maximizing, alpha, beta, ai_color);
            debug!(%mv, score, "root move scored");

            // strict comparison keeps the first of equally scored moves
            if score > best_score {
                best_score = score;
                best_move = Some(*mv);
            }

            alpha = alpha.max(best_score);
        }

        match best_move {
            Some(mv) => {
                debug!(%mv, score = best_score, nodes = self.nodes_searched, depth, "best move");
                Some(mv)
            }
            None => {
                debug!("every move scored at the loss bound, picking at random");
                self.choose_random_move(&moves)
            }
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
        ai_color: Color,
    ) -> f64 {
        self.nodes_searched += 1;

        if depth == 0 || board.winner() != GameResult::InProgress {
            return self.evaluator.score(board, ai_color);
        }

        let moves = self.move_generator.legal_moves(board, board.current_player());
        if moves.is_empty() {
            return if maximizing { SCORE_MIN } else { SCORE_MAX };
        }

        if maximizing {
            let mut best_score = SCORE_MIN;
            for mv in &moves {
                let mut child = board.clone();
                child.play(mv);

                let next_maximizing = child.current_player() == ai_color;
                let score = self.minimax(&child, depth - 1, next_maximizing, alpha, beta, ai_color);
                best_score = best_score.max(score);
                alpha = alpha.max(score);

                if beta <= alpha {
                    break;
                }
            }
            best_score
        } else {
            let mut best_score = SCORE_MAX;
            for mv in &moves {
                let mut child = board.clone();
                child.play(mv);

                let next_maximizing = child.current_player() == ai_color;
                let score = self.minimax(&child, depth - 1, next_maximizing, alpha, beta, ai_color);
                best_score = best_score.min(score);
                beta = beta.min(score);

                if beta <= alpha {
                    break;
                }
            }
            best_score
        }
    }

    fn choose_random_move(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}
