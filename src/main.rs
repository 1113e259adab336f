use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use checkers_engine::{
    apply_player_move, new_game, winner, Color, Difficulty, GameResult, Search,
};

/// Plays the engine against itself and prints the final position.
#[derive(Parser, Debug)]
#[command(name = "checkers-engine", version)]
struct Args {
    /// Difficulty level (1-3) for Dark, who moves first
    #[arg(long, default_value_t = 2)]
    dark: u8,

    /// Difficulty level (1-3) for Light
    #[arg(long, default_value_t = 2)]
    light: u8,

    /// Seed for the random choices of both engines
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies without a result
    #[arg(long, default_value_t = 200)]
    max_plies: u32,
}

fn engine(level: u8, seed: Option<u64>) -> Result<Search> {
    let difficulty =
        Difficulty::try_from(level).with_context(|| format!("bad difficulty level {level}"))?;
    let search = Search::new(difficulty);
    Ok(match seed {
        Some(seed) => search.with_seed(seed),
        None => search,
    })
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut dark = engine(args.dark, args.seed)?;
    let mut light = engine(args.light, args.seed.map(|seed| seed.wrapping_add(1)))?;

    let mut board = new_game();
    for ply in 0..args.max_plies {
        if winner(&board) != GameResult::InProgress {
            break;
        }

        let to_move = board.current_player();
        let search = match to_move {
            Color::Dark => &mut dark,
            Color::Light => &mut light,
        };
        let Some(mv) = search.find_best_move(&board, to_move) else {
            break;
        };
        if !apply_player_move(&mut board, mv.from, mv.to) {
            bail!("engine chose an illegal move {mv}");
        }
        info!(ply, color = %to_move, %mv, nodes = search.get_nodes_searched(), "move played");
    }

    println!("{board}");
    match winner(&board) {
        GameResult::Winner(color) => println!("{color} wins"),
        GameResult::InProgress => println!("no result after {} plies", args.max_plies),
    }

    Ok(())
}
