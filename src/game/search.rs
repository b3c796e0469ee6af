// src/game/search.rs

pub mod negamax;
pub mod ordering;
pub mod pvs;
pub mod quiescence;

use serde::{Deserialize, Serialize};
use shakmaty::{Chess, Move, MoveList, Position};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_MAX_QUIESCENCE_DEPTH, DEFAULT_SEARCH_DEPTH, FIFTY_MOVE_HALFMOVES, INFINITY, MAX_SEARCH_DEPTH};
use crate::game::evaluation::Score;
use crate::game::{classify, status, GameError, GameState, Status};
pub use negamax::Negamax;
pub use pvs::Negascout;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    Negamax,
    Negascout,
}

/// Which root move wins when several share the best score.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the earliest move in search order.
    FirstFound,
    /// Let every later move with an equal score replace the current best.
    LastFound,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub search_depth: u8,
    pub search_algorithm: SearchAlgorithm,
    pub max_quiescence_depth: u8,
    pub max_nodes: Option<u64>,
    pub root_tie_break: TieBreak,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            search_algorithm: SearchAlgorithm::Negascout,
            max_quiescence_depth: DEFAULT_MAX_QUIESCENCE_DEPTH,
            max_nodes: None,
            root_tie_break: TieBreak::FirstFound,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search depth must be between 1 and {max}, got {depth}")]
    InvalidDepth { depth: u8, max: u8 },
    #[error("search aborted after exceeding the node limit of {limit}")]
    NodeLimitExceeded { limit: u64 },
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub score: Score,
    pub nodes: u64,
}

/// Bookkeeping for one search. Nothing here outlives a driver call.
#[derive(Debug)]
pub struct SearchContext {
    nodes: u64,
    max_nodes: Option<u64>,
    max_quiescence_depth: u8,
    aborted: bool,
    quiescence_cap_hit: bool,
}

impl SearchContext {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            nodes: 0,
            max_nodes: config.max_nodes,
            max_quiescence_depth: config.max_quiescence_depth,
            aborted: false,
            quiescence_cap_hit: false,
        }
    }

    /// Counts a node. Returns `false` once the node budget is spent; the
    /// caller must then unwind without trusting any score.
    pub fn visit(&mut self) -> bool {
        self.nodes += 1;
        if self.max_nodes.is_some_and(|limit| self.nodes > limit) {
            self.aborted = true;
        }
        !self.aborted
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn quiescence_cap_hit(&self) -> bool {
        self.quiescence_cap_hit
    }
}

/// A fixed-depth principal search. Implementations share the evaluator, the
/// move orderer and quiescence, and differ only in how siblings are searched.
pub trait SearchStrategy {
    fn search(&self, ctx: &mut SearchContext, pos: &Chess, depth: u8, alpha: Score, beta: Score) -> Score;

    /// Searches `child` with the window seen from the opponent's side and
    /// returns the score from ours.
    fn search_child(&self, ctx: &mut SearchContext, child: &Chess, depth: u8, alpha: Score, beta: Score) -> Score {
        -self.search(ctx, child, depth, -beta, -alpha)
    }
}

pub(crate) enum Node {
    /// The node is scored without expanding it.
    Leaf(Score),
    /// The node must be expanded over these legal moves.
    Interior(MoveList),
}

/// Handles everything a node decides before looking at its children:
/// game-ending positions, budget exhaustion and the horizon. Legal moves are
/// generated once here and handed on to whoever expands the node.
pub(crate) fn resolve_node(ctx: &mut SearchContext, pos: &Chess, depth: u8, alpha: Score, beta: Score) -> Node {
    let legal_moves = pos.legal_moves();
    let status = classify(pos, &legal_moves);
    if depth == 0 && status == Status::Ongoing {
        return Node::Leaf(quiescence::search_moves(ctx, pos, legal_moves, alpha, beta));
    }
    if !ctx.visit() {
        return Node::Leaf(0);
    }
    match status {
        Status::Checkmate => Node::Leaf(-INFINITY),
        Status::Stalemate | Status::Draw => Node::Leaf(0),
        Status::Ongoing => Node::Interior(legal_moves),
    }
}

pub fn strategy(algorithm: SearchAlgorithm) -> &'static dyn SearchStrategy {
    match algorithm {
        SearchAlgorithm::Negamax => &Negamax,
        SearchAlgorithm::Negascout => &Negascout,
    }
}

/// The top-level driver: picks a move at the root and hands each successor
/// to the configured strategy.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: SearchConfig,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn find_best_move(&self, pos: &Chess, depth: u8) -> Result<SearchOutcome, SearchError> {
        self.root_search(pos, depth, |child| child.halfmoves() >= FIFTY_MOVE_HALFMOVES)
    }

    /// Finds the best move for the game's current position and plays it.
    /// Root moves that would let the mover claim a draw score 0.
    pub fn play_best_move(&self, game: &mut GameState, depth: u8) -> Result<SearchOutcome, SearchError> {
        let outcome = self.root_search(game.position(), depth, |child| game.would_claim_draw(child))?;
        if let Some(m) = outcome.best_move {
            game.make_move(m)?;
        }
        Ok(outcome)
    }

    fn root_search(
        &self,
        pos: &Chess,
        depth: u8,
        claims_draw: impl Fn(&Chess) -> bool,
    ) -> Result<SearchOutcome, SearchError> {
        if depth == 0 || depth > MAX_SEARCH_DEPTH {
            return Err(SearchError::InvalidDepth { depth, max: MAX_SEARCH_DEPTH });
        }

        let mut ctx = SearchContext::new(&self.config);
        match status(pos) {
            Status::Checkmate => return Ok(SearchOutcome { best_move: None, score: -INFINITY, nodes: 0 }),
            Status::Stalemate => return Ok(SearchOutcome { best_move: None, score: 0, nodes: 0 }),
            Status::Draw | Status::Ongoing => {}
        }

        let strategy = strategy(self.config.search_algorithm);
        let mut legal_moves = pos.legal_moves();
        ordering::order_moves(&mut legal_moves, pos);

        let mut best_move = None;
        let mut best_score = -INFINITY;

        for m in legal_moves {
            let mut new_pos = pos.clone();
            new_pos.play_unchecked(m);

            // Mate ends the game, so it outranks any draw claim.
            let score = if !new_pos.is_checkmate() && claims_draw(&new_pos) {
                0
            } else {
                strategy.search_child(&mut ctx, &new_pos, depth - 1, -INFINITY, INFINITY)
            };

            if ctx.aborted() {
                let limit = ctx.max_nodes.unwrap_or_default();
                warn!(limit, "node budget exhausted, abandoning search");
                return Err(SearchError::NodeLimitExceeded { limit });
            }

            debug!(mv = %m.to_uci(pos.castles().mode()), score, "root move searched");

            let improves = match self.config.root_tie_break {
                TieBreak::FirstFound => best_move.is_none() || score > best_score,
                TieBreak::LastFound => score >= best_score,
            };
            if improves {
                best_score = score;
                best_move = Some(m);
            }
        }

        if ctx.quiescence_cap_hit() {
            warn!(cap = self.config.max_quiescence_depth, "quiescence depth cap reached; some leaves fell back to stand-pat");
        }
        if let Some(m) = best_move {
            info!(
                best = %m.to_uci(pos.castles().mode()),
                score = best_score,
                nodes = ctx.nodes(),
                algorithm = ?self.config.search_algorithm,
                "search finished"
            );
        }

        Ok(SearchOutcome { best_move, score: best_score, nodes: ctx.nodes() })
    }
}

#[cfg(test)]
mod tests;
