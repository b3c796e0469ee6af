// src/game/search/ordering.rs

use std::cmp::Reverse;

use shakmaty::{Chess, Move, Position};

use crate::game::evaluation::{evaluate_move, is_endgame, side_sign};

/// Sorts `moves` so the ones the mover likes best by [`evaluate_move`] come
/// first. The sort is stable, so equally scored moves keep their input order.
pub fn order_moves(moves: &mut [Move], pos: &Chess) {
    let endgame = is_endgame(pos.board());
    let sign = side_sign(pos.turn());
    moves.sort_by_cached_key(|m| Reverse(evaluate_move(m, endgame, pos) * sign));
}
