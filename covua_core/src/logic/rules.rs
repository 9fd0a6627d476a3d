use crate::logic::board::{Board, Color, PieceKind, NO_KING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    NoPieceAtSource,
    NotYourTurn,
    IllegalMove,
    SelfCheck,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GameOver => write!(f, "the game is already over"),
            Self::NoPieceAtSource => write!(f, "no piece on the source square"),
            Self::NotYourTurn => write!(f, "piece belongs to the other side"),
            Self::IllegalMove => write!(f, "move is not legal in this position"),
            Self::SelfCheck => write!(f, "move leaves the king attackable"),
        }
    }
}

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn offset(row: usize, col: usize, dr: isize, dc: isize) -> Option<usize> {
    let r = row as isize + dr;
    let c = col as isize + dc;
    if (0..8).contains(&r) && (0..8).contains(&c) {
        Some(Board::square_index(r as usize, c as usize))
    } else {
        None
    }
}

/// Whether any piece of `by` attacks `square`. This is the king-safety
/// predicate the search consults after every applied move.
pub fn is_attacked(board: &Board, square: usize, by: Color) -> bool {
    let (row, col) = Board::coords(square);

    // Pawns attack one rank ahead of themselves, so look one rank behind
    // the target from the attacker's point of view.
    let pawn_row = if by == Color::White { -1 } else { 1 };
    for dc in [-1, 1] {
        if let Some(sq) = offset(row, col, pawn_row, dc) {
            if board.grid[sq].is_some_and(|p| p.kind == PieceKind::Pawn && p.color == by) {
                return true;
            }
        }
    }

    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(sq) = offset(row, col, dr, dc) {
            if board.grid[sq].is_some_and(|p| p.kind == PieceKind::Knight && p.color == by) {
                return true;
            }
        }
    }

    for (dr, dc) in KING_OFFSETS {
        if let Some(sq) = offset(row, col, dr, dc) {
            if board.grid[sq].is_some_and(|p| p.kind == PieceKind::King && p.color == by) {
                return true;
            }
        }
    }

    for (dr, dc) in ROOK_DIRS {
        if ray_hits(board, row, col, dr, dc, by, PieceKind::Rook) {
            return true;
        }
    }
    for (dr, dc) in BISHOP_DIRS {
        if ray_hits(board, row, col, dr, dc, by, PieceKind::Bishop) {
            return true;
        }
    }

    false
}

// Walks a ray until the first occupied square; a `slider` or queen of
// `by` sitting there attacks the origin.
fn ray_hits(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    by: Color,
    slider: PieceKind,
) -> bool {
    let mut r = row;
    let mut c = col;
    while let Some(sq) = offset(r, c, dr, dc) {
        if let Some(piece) = board.grid[sq] {
            return piece.color == by && (piece.kind == slider || piece.kind == PieceKind::Queen);
        }
        let (nr, nc) = Board::coords(sq);
        r = nr;
        c = nc;
    }
    false
}

/// Whether `color`'s king is currently attackable.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = board.king_square[color.index()];
    if king == NO_KING {
        // No king on a cleared board is an invalid state; treat as check.
        return true;
    }
    is_attacked(board, king, color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_not_in_check() {
        let board = Board::new();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn test_rook_attack_blocked() {
        let mut board = Board::new();
        board.clear();
        board.add_piece(Board::square_index(0, 4), PieceKind::King, Color::White);
        board.add_piece(Board::square_index(7, 4), PieceKind::Rook, Color::Black);
        assert!(is_in_check(&board, Color::White));

        board.add_piece(Board::square_index(4, 4), PieceKind::Pawn, Color::White);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn test_knight_attack_jumps_blockers() {
        let mut board = Board::new();
        board.clear();
        board.add_piece(Board::square_index(0, 4), PieceKind::King, Color::White);
        board.add_piece(Board::square_index(2, 5), PieceKind::Knight, Color::Black);
        board.add_piece(Board::square_index(1, 4), PieceKind::Pawn, Color::White);
        board.add_piece(Board::square_index(1, 5), PieceKind::Pawn, Color::White);
        assert!(is_in_check(&board, Color::White));
    }

    #[test]
    fn test_pawn_attack_direction() {
        let mut board = Board::new();
        board.clear();
        board.add_piece(Board::square_index(4, 4), PieceKind::King, Color::White);
        // Black pawn attacks downward: from d6 it covers c5 and e5.
        board.add_piece(Board::square_index(5, 3), PieceKind::Pawn, Color::Black);
        assert!(is_in_check(&board, Color::White));

        board.set_piece(Board::square_index(5, 3), None);
        board.add_piece(Board::square_index(5, 4), PieceKind::Pawn, Color::Black);
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn test_queen_attacks_both_ways() {
        let mut board = Board::new();
        board.clear();
        board.add_piece(Board::square_index(3, 3), PieceKind::King, Color::Black);
        board.add_piece(Board::square_index(6, 6), PieceKind::Queen, Color::White);
        assert!(is_in_check(&board, Color::Black));

        board.set_piece(Board::square_index(6, 6), None);
        board.add_piece(Board::square_index(3, 7), PieceKind::Queen, Color::White);
        assert!(is_in_check(&board, Color::Black));
    }
}
