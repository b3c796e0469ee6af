// src/game/search/quiescence.rs

//! Capture-only search run at the horizon, so that the static evaluation is
//! never taken in the middle of an exchange.

use shakmaty::{Chess, Move, MoveList, Position};

use crate::game::evaluation::{self, Score};
use super::{ordering, SearchContext};

pub fn search(ctx: &mut SearchContext, pos: &Chess, alpha: Score, beta: Score) -> Score {
    search_from(ctx, pos, None, alpha, beta, 0)
}

/// Like [`search`], reusing the legal moves the caller already generated for `pos`.
pub(crate) fn search_moves(ctx: &mut SearchContext, pos: &Chess, legal_moves: MoveList, alpha: Score, beta: Score) -> Score {
    search_from(ctx, pos, Some(legal_moves), alpha, beta, 0)
}

fn search_from(
    ctx: &mut SearchContext,
    pos: &Chess,
    legal_moves: Option<MoveList>,
    mut alpha: Score,
    beta: Score,
    qdepth: u8,
) -> Score {
    if !ctx.visit() {
        return 0;
    }

    // The side to move is never forced to capture, so the static score is a floor.
    let standing_pat = evaluation::evaluate(pos);
    if standing_pat >= beta {
        return beta;
    }
    if alpha < standing_pat {
        alpha = standing_pat;
    }

    if qdepth >= ctx.max_quiescence_depth {
        ctx.quiescence_cap_hit = true;
        return alpha;
    }

    let legal_moves = legal_moves.unwrap_or_else(|| pos.legal_moves());
    let mut captures: Vec<Move> = legal_moves.into_iter().filter(|m| m.is_capture()).collect();
    ordering::order_moves(&mut captures, pos);

    for m in captures {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(m);
        let score = -search_from(ctx, &new_pos, None, -beta, -alpha, qdepth + 1);

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
