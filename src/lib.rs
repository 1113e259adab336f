pub mod board;
pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod search;

pub use board::{Board, Color, GameResult, Piece, Rank, Square};
pub use error::{CheckersError, CheckersResult};
pub use evaluation::Evaluator;
pub use movegen::{Move, MoveGenerator};
pub use search::{Difficulty, Search};

use tracing::debug;

/// A board in the standard opening position, Dark to move.
pub fn new_game() -> Board {
    Board::new()
}

pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    MoveGenerator::new().legal_moves(board, color)
}

/// Plays the side to move's `from -> to` if it is legal. The turn passes
/// unless a capture can be continued from `to`. Returns `false` without
/// touching the board when the move is not legal.
pub fn apply_player_move(board: &mut Board, from: Square, to: Square) -> bool {
    match MoveGenerator::new().find_move(board, from, to) {
        Some(mv) => {
            board.play(&mv);
            true
        }
        None => {
            debug!(%from, %to, color = %board.current_player(), "rejected illegal move");
            false
        }
    }
}

pub fn winner(board: &Board) -> GameResult {
    board.winner()
}

pub fn get_best_move(board: &Board, ai_color: Color, difficulty: Difficulty) -> Option<Move> {
    Search::new(difficulty).find_best_move(board, ai_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col)
    }

    #[test]
    fn test_new_game() {
        let board = new_game();
        assert_eq!(board.current_player(), Color::Dark);
        assert_eq!(winner(&board), GameResult::InProgress);

        let moves = legal_moves(&board, Color::Dark);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|mv| mv.captured.is_none()));
    }

    #[test]
    fn test_apply_player_move_switches_turn() {
        let mut board = new_game();
        assert!(apply_player_move(&mut board, sq(2, 1), sq(3, 2)));
        assert_eq!(board.get(sq(3, 2)), Some(Piece::man(Color::Dark)));
        assert_eq!(board.current_player(), Color::Light);

        assert!(apply_player_move(&mut board, sq(5, 4), sq(4, 3)));
        assert_eq!(board.current_player(), Color::Dark);
    }

    #[test]
    fn test_illegal_move_leaves_board_untouched() {
        let mut board = new_game();
        let snapshot = board.clone();

        // wrong side
        assert!(!apply_player_move(&mut board, sq(5, 0), sq(4, 1)));
        // not a diagonal step
        assert!(!apply_player_move(&mut board, sq(2, 1), sq(3, 1)));
        // empty source
        assert!(!apply_player_move(&mut board, sq(3, 0), sq(4, 1)));
        // off the board
        assert!(!apply_player_move(&mut board, sq(2, 7), sq(3, 8)));

        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_simple_move_rejected_when_capture_exists() {
        let mut board = Board::from_diagram(
            "
            ........
            ........
            ..d.....
            ...l....
            ........
            ........
            .l......
            ........
            ",
            Color::Light,
        )
        .unwrap();
        let snapshot = board.clone();

        assert!(!apply_player_move(&mut board, sq(6, 1), sq(5, 0)));
        assert_eq!(board, snapshot);

        assert!(apply_player_move(&mut board, sq(3, 3), sq(1, 1)));
        assert_eq!(board.get(sq(2, 2)), None);
        assert_eq!(board.piece_count(Color::Dark), 0);
        assert_eq!(winner(&board), GameResult::Winner(Color::Light));
    }

    #[test]
    fn test_multi_jump_keeps_turn() {
        let mut board = Board::from_diagram(
            "
            .......d
            ........
            ........
            ....d...
            ........
            ..d.....
            .l......
            ........
            ",
            Color::Light,
        )
        .unwrap();

        assert!(apply_player_move(&mut board, sq(6, 1), sq(4, 3)));
        assert_eq!(board.current_player(), Color::Light);
        assert_eq!(board.piece_count(Color::Dark), 2);
        assert_eq!(
            legal_moves(&board, Color::Light),
            vec![Move::jump(sq(4, 3), sq(2, 5), sq(3, 4))]
        );

        assert!(apply_player_move(&mut board, sq(4, 3), sq(2, 5)));
        assert_eq!(board.current_player(), Color::Dark);
        assert_eq!(board.piece_count(Color::Dark), 1);
        assert_eq!(winner(&board), GameResult::InProgress);
    }

    #[test]
    fn test_capture_promotes_and_continues_as_king() {
        // Crowned on (0, 3), the new king may jump backward at once.
        let mut board = Board::from_diagram(
            "
            ........
            ..d.d...
            .l......
            ........
            ........
            ........
            ........
            ........
            ",
            Color::Light,
        )
        .unwrap();

        assert!(apply_player_move(&mut board, sq(2, 1), sq(0, 3)));
        assert_eq!(board.get(sq(0, 3)), Some(Piece::king(Color::Light)));
        assert_eq!(board.current_player(), Color::Light);
        assert_eq!(
            legal_moves(&board, Color::Light),
            vec![Move::jump(sq(0, 3), sq(2, 5), sq(1, 4))]
        );

        assert!(apply_player_move(&mut board, sq(0, 3), sq(2, 5)));
        assert_eq!(board.piece_count(Color::Dark), 0);
        assert_eq!(winner(&board), GameResult::Winner(Color::Light));
    }

    #[test]
    fn test_get_best_move() {
        let board = new_game();
        let legal = legal_moves(&board, Color::Dark);

        let easy = get_best_move(&board, Color::Dark, Difficulty::Easy).unwrap();
        assert!(legal.contains(&easy));

        let medium = get_best_move(&board, Color::Dark, Difficulty::Medium);
        assert_eq!(medium, get_best_move(&board, Color::Dark, Difficulty::Medium));
        assert!(medium.map_or(false, |mv| legal.contains(&mv)));
    }

    #[test]
    fn test_self_play_keeps_piece_counts() {
        let mut board = new_game();
        let mut dark = Search::new(Difficulty::Medium);
        let mut light = Search::new(Difficulty::Easy).with_seed(7);

        for _ in 0..300 {
            if winner(&board) != GameResult::InProgress {
                break;
            }
            let to_move = board.current_player();
            let search = match to_move {
                Color::Dark => &mut dark,
                Color::Light => &mut light,
            };
            let mv = search
                .find_best_move(&board, to_move)
                .expect("side to move has a legal move while the game is in progress");
            assert!(apply_player_move(&mut board, mv.from, mv.to));

            let light_pieces = board.pieces().filter(|(_, p)| p.color == Color::Light).count();
            let dark_pieces = board.pieces().filter(|(_, p)| p.color == Color::Dark).count();
            assert_eq!(usize::from(board.piece_count(Color::Light)), light_pieces);
            assert_eq!(usize::from(board.piece_count(Color::Dark)), dark_pieces);
        }
    }
}
