use std::path::PathBuf;
use std::process;

use clap::Parser;
use polaris::config;
use polaris::constants::DEFAULT_PROFILES_DIR;
use polaris::{Engine, GameState, SearchAlgorithm, SearchConfig};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to search, in FEN. Defaults to the standard starting position.
    #[arg(long)]
    fen: Option<String>,

    /// Search depth in plies. Overrides the profile.
    #[arg(long)]
    depth: Option<u8>,

    /// Principal search strategy. Overrides the profile.
    #[arg(long, value_enum)]
    algorithm: Option<SearchAlgorithm>,

    /// Name of a saved search profile to start from
    #[arg(long)]
    profile: Option<String>,

    /// Directory holding the search profiles
    #[arg(long, default_value = DEFAULT_PROFILES_DIR)]
    profiles_dir: PathBuf,

    /// Save the effective configuration under this profile name
    #[arg(long)]
    save_profile: Option<String>,

    /// Let the engine play this many plies against itself
    #[arg(long)]
    self_play: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let args = Args::parse();

    let mut search_config = match &args.profile {
        Some(name) => config::load_profile(&args.profiles_dir, name)?,
        None => SearchConfig::default(),
    };
    if let Some(depth) = args.depth {
        search_config.search_depth = depth;
    }
    if let Some(algorithm) = args.algorithm {
        search_config.search_algorithm = algorithm;
    }
    if let Some(name) = &args.save_profile {
        config::save_profile(&args.profiles_dir, name, &search_config)?;
        info!(profile = %name, "saved search profile");
    }

    let pos: Chess = match &args.fen {
        Some(fen) => fen.parse::<Fen>()?.into_position(CastlingMode::Standard)?,
        None => Chess::default(),
    };

    let depth = search_config.search_depth;
    let engine = Engine::new(search_config);

    match args.self_play {
        Some(plies) => {
            let mut game = GameState::from_position(pos);
            for _ in 0..plies {
                if game.is_game_over() {
                    break;
                }
                let mode = game.position().castles().mode();
                let outcome = engine.play_best_move(&mut game, depth)?;
                match outcome.best_move {
                    Some(m) => println!("{} {}", m.to_uci(mode), outcome.score),
                    None => break,
                }
            }
            match game.outcome() {
                Some(outcome) => println!("outcome: {outcome:?}"),
                None => println!("outcome: ongoing after {} plies", game.moves().len()),
            }
        }
        None => {
            let outcome = engine.find_best_move(&pos, depth)?;
            match outcome.best_move {
                Some(m) => println!("bestmove {} score {} nodes {}", m.to_uci(pos.castles().mode()), outcome.score, outcome.nodes),
                None => {
                    error!(score = outcome.score, "no move available in this position");
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}
