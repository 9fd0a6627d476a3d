// Piece Values
pub const VAL_PAWN: i32 = 100;
pub const VAL_KNIGHT: i32 = 300;
pub const VAL_BISHOP: i32 = 300;
pub const VAL_ROOK: i32 = 500;
pub const VAL_QUEEN: i32 = 900;
pub const VAL_KING: i32 = 100_000;

/// Decisive-outcome bound. A root result more extreme than this means
/// "no viable move" rather than a real evaluation; VAL_KING must stay
/// strictly larger so the driver's loss assumption sits outside it.
pub const WIN_SCORE: i32 = 50_000;
