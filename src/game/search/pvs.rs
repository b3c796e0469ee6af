// src/game/search/pvs.rs

//! Negascout / Principal Variation Search (PVS)
//!
//! PVS is an optimization of the alpha-beta algorithm that improves search
//! efficiency. It operates on the assumption that the first move checked will
//! likely be the best one. This move is searched with a full alpha-beta window.
//! All subsequent moves are then searched with a narrower "zero window"
//! (where beta = alpha + 1) to quickly prove they are inferior. If a move
//! searched with a zero window is found to be better than alpha, it is then
//! re-searched with the full window to get an exact score.

use shakmaty::{Chess, Position};

use crate::game::evaluation::Score;
use super::{ordering, resolve_node, Node, SearchContext, SearchStrategy};

#[derive(Clone, Copy, Debug, Default)]
pub struct Negascout;

impl SearchStrategy for Negascout {
    fn search(&self, ctx: &mut SearchContext, pos: &Chess, depth: u8, mut alpha: Score, beta: Score) -> Score {
        let mut legal_moves = match resolve_node(ctx, pos, depth, alpha, beta) {
            Node::Leaf(score) => return score,
            Node::Interior(moves) => moves,
        };
        ordering::order_moves(&mut legal_moves, pos);

        // Upper edge of the scout window; `beta` for the first move only.
        let mut b = beta;

        for (i, m) in legal_moves.into_iter().enumerate() {
            let mut new_pos = pos.clone();
            new_pos.play_unchecked(m);

            let mut score = self.search_child(ctx, &new_pos, depth - 1, alpha, b);
            if i > 0 && score > alpha && score < beta {
                score = self.search_child(ctx, &new_pos, depth - 1, alpha, beta);
            }

            if ctx.aborted() {
                return 0;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                return beta;
            }
            b = alpha + 1;
        }

        alpha
    }
}
