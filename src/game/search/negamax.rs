// src/game/search/negamax.rs

//! Plain fail-hard alpha-beta in negamax form. Every child is searched with
//! the full window; this is the reference the other strategies must agree with.

use shakmaty::{Chess, Position};

use crate::game::evaluation::Score;
use super::{ordering, resolve_node, Node, SearchContext, SearchStrategy};

#[derive(Clone, Copy, Debug, Default)]
pub struct Negamax;

impl SearchStrategy for Negamax {
    fn search(&self, ctx: &mut SearchContext, pos: &Chess, depth: u8, mut alpha: Score, beta: Score) -> Score {
        let mut legal_moves = match resolve_node(ctx, pos, depth, alpha, beta) {
            Node::Leaf(score) => return score,
            Node::Interior(moves) => moves,
        };
        ordering::order_moves(&mut legal_moves, pos);

        for m in legal_moves {
            let mut new_pos = pos.clone();
            new_pos.play_unchecked(m);
            let score = self.search_child(ctx, &new_pos, depth - 1, alpha, beta);

            if ctx.aborted() {
                return 0;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
