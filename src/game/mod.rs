// game/mod.rs

pub mod evaluation;
pub mod search;

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, Color, EnPassantMode, Move, MoveList, Position};
use thiserror::Error;

use crate::constants::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};

/// Terminal classification of a single position, as seen by the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Checkmate,
    Stalemate,
    /// Insufficient material or the fifty-move rule.
    Draw,
}

pub fn status(pos: &Chess) -> Status {
    classify(pos, &pos.legal_moves())
}

/// Same as [`status`], for callers that already hold the legal moves of `pos`.
pub fn classify(pos: &Chess, legal_moves: &MoveList) -> Status {
    if legal_moves.is_empty() {
        if pos.is_check() {
            Status::Checkmate
        } else {
            Status::Stalemate
        }
    } else if pos.is_insufficient_material() || pos.halfmoves() >= FIFTY_MOVE_HALFMOVES {
        Status::Draw
    } else {
        Status::Ongoing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move {uci} in position {fen}")]
    IllegalMove { uci: String, fen: String },
}

fn position_key(pos: &Chess) -> u64 {
    let Zobrist64(hash) = pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
    hash
}

/// A game in progress: the current position plus everything needed to
/// decide draws by repetition.
#[derive(Clone, Debug)]
pub struct GameState {
    chess: Chess,
    moves: Vec<Move>,
    history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(chess: Chess) -> Self {
        let history = vec![position_key(&chess)];
        Self { chess, moves: Vec::new(), history }
    }

    pub fn position(&self) -> &Chess {
        &self.chess
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Plays `m` after checking it against the legal moves of the current position.
    pub fn make_move(&mut self, m: Move) -> Result<(), GameError> {
        if !self.chess.legal_moves().contains(&m) {
            return Err(GameError::IllegalMove {
                uci: m.to_uci(self.chess.castles().mode()).to_string(),
                fen: Fen::from_position(&self.chess, EnPassantMode::Legal).to_string(),
            });
        }
        self.chess.play_unchecked(m);
        self.moves.push(m);
        self.history.push(position_key(&self.chess));
        Ok(())
    }

    /// How many times `pos` has occurred in this game so far.
    pub fn repetitions(&self, pos: &Chess) -> usize {
        let key = position_key(pos);
        self.history.iter().filter(|&&seen| seen == key).count()
    }

    /// Whether reaching `pos` next would let the mover claim a draw. A mated
    /// position ends the game before any claim can be made.
    pub fn would_claim_draw(&self, pos: &Chess) -> bool {
        if pos.is_checkmate() {
            return false;
        }
        self.repetitions(pos) + 1 >= REPETITION_LIMIT || pos.halfmoves() >= FIFTY_MOVE_HALFMOVES
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match status(&self.chess) {
            Status::Checkmate => Some(GameOutcome::Checkmate { winner: !self.chess.turn() }),
            Status::Stalemate => Some(GameOutcome::Stalemate),
            Status::Draw if self.chess.is_insufficient_material() => Some(GameOutcome::InsufficientMaterial),
            Status::Draw => Some(GameOutcome::FiftyMoveRule),
            Status::Ongoing if self.repetitions(&self.chess) >= REPETITION_LIMIT => {
                Some(GameOutcome::ThreefoldRepetition)
            }
            Status::Ongoing => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}
