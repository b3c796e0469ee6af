//! Evaluation of a chess position.
//!
//! Scores are material plus piece-square bonuses, with the king switching to
//! its endgame table once the position is classified as an endgame.

pub mod pst;

use shakmaty::{Board, Chess, Color, Move, Piece, Position, Role, Square};

use crate::constants::{BISHOP_VALUE, INFINITY, KING_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE};

/// Centipawns, always relative to the side to move at the node being scored.
pub type Score = i32;

pub fn get_piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// `+1` for White, `-1` for Black.
pub fn side_sign(color: Color) -> Score {
    color.fold_wb(1, -1)
}

/// An endgame is reached once the queens are gone, or when queens remain but
/// at most one minor piece is left on the board.
pub fn is_endgame(board: &Board) -> bool {
    let queens = board.by_role(Role::Queen).count();
    let minors = (board.by_role(Role::Bishop) | board.by_role(Role::Knight)).count();
    queens == 0 || (queens >= 2 && minors <= 1)
}

pub fn positional_value(piece: Piece, square: Square, endgame: bool) -> Score {
    pst::lookup(piece.role, piece.color, square, endgame)
}

pub fn evaluate_piece(piece: Piece, square: Square, endgame: bool) -> Score {
    positional_value(piece, square, endgame) + get_piece_value(piece.role)
}

/// Evaluates the board from the perspective of the current player.
pub fn evaluate(pos: &Chess) -> Score {
    let board = pos.board();
    let endgame = is_endgame(board);

    let white_relative: Score = Square::ALL
        .into_iter()
        .filter_map(|square| board.piece_at(square).map(|piece| (square, piece)))
        .map(|(square, piece)| side_sign(piece.color) * evaluate_piece(piece, square, endgame))
        .sum();

    side_sign(pos.turn()) * white_relative
}

/// Material swing of a capture: the victim's value minus the attacker's.
///
/// En passant always nets a pawn, because the victim does not stand on the
/// destination square.
pub fn evaluate_capture(m: &Move) -> Score {
    match *m {
        Move::EnPassant { .. } => PAWN_VALUE,
        Move::Normal { role, capture: Some(captured), .. } => {
            get_piece_value(captured) - get_piece_value(role)
        }
        _ => 0,
    }
}

/// Cheap move-ordering heuristic. Does not play the move.
///
/// The result carries the mover's sign, like a White-relative evaluation:
/// a good move for Black is negative. Promotions are worth an infinite amount
/// to whoever plays them.
pub fn evaluate_move(m: &Move, endgame: bool, pos: &Chess) -> Score {
    let turn = pos.turn();
    let sign = side_sign(turn);

    if m.is_promotion() {
        return sign * INFINITY;
    }

    let Some(from) = m.from() else {
        return 0;
    };
    // shakmaty encodes castling as the king capturing its own rook.
    let to = m.castling_side().map_or(m.to(), |side| side.king_to(turn));

    let piece = Piece { role: m.role(), color: turn };
    let positional_change = positional_value(piece, to, endgame) - positional_value(piece, from, endgame);
    let material_change = if m.is_capture() { evaluate_capture(m) } else { 0 };

    (positional_change + material_change) * sign
}
