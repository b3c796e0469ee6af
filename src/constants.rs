// --- Piece values ---
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
// Both kings are always on the board, so this cancels out of a full evaluation.
pub const KING_VALUE: i32 = 20_000;

// Search
/// Stands in for an infinite score. Safe to negate, unlike `i32::MIN`.
pub const INFINITY: i32 = 1_000_000;
pub const MAX_SEARCH_DEPTH: u8 = 64;
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
pub const DEFAULT_MAX_QUIESCENCE_DEPTH: u8 = 32;

// Draw rules
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;
pub const REPETITION_LIMIT: usize = 3;

// Profiles
pub const DEFAULT_PROFILES_DIR: &str = "profiles";
