use crate::engine::move_list::MoveList;
use crate::engine::{Move, MoveKind};
use crate::logic::board::{Board, Color, Piece, PieceKind};
use crate::logic::rules::{is_attacked, is_in_check};

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

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-legal moves for `color`: (regular, maintenance). Captures and
    /// quiet moves share the regular list. The scan order is a fixed
    /// square-major sweep, so callers see a stable enumeration.
    pub fn generate(&self, board: &Board, color: Color) -> (MoveList, MoveList) {
        let mut regulars = MoveList::new();
        let mut maintenance = MoveList::new();

        for sq in 0..64 {
            let Some(piece) = board.grid[sq] else {
                continue;
            };
            if piece.color != color {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => {
                    self.gen_pawn_moves(board, sq, piece, &mut regulars);
                    if piece.passing {
                        maintenance.push(Move {
                            from: sq as u8,
                            to: sq as u8,
                            kind: MoveKind::ClearPassing,
                            capture: None,
                            first_move: false,
                            clock: board.draw_clock,
                        });
                    }
                }
                PieceKind::Knight => {
                    self.gen_offset_moves(board, sq, piece, &KNIGHT_OFFSETS, &mut regulars);
                }
                PieceKind::Bishop => {
                    self.gen_sliding_moves(board, sq, piece, &BISHOP_DIRS, &mut regulars);
                }
                PieceKind::Rook => {
                    self.gen_sliding_moves(board, sq, piece, &ROOK_DIRS, &mut regulars);
                }
                PieceKind::Queen => {
                    self.gen_sliding_moves(board, sq, piece, &ROOK_DIRS, &mut regulars);
                    self.gen_sliding_moves(board, sq, piece, &BISHOP_DIRS, &mut regulars);
                }
                PieceKind::King => {
                    self.gen_offset_moves(board, sq, piece, &KING_OFFSETS, &mut regulars);
                    self.gen_castling_moves(board, sq, piece, &mut regulars);
                }
            }
        }

        (regulars, maintenance)
    }

    /// Whether `color` has at least one move that leaves its king safe.
    pub fn has_legal_moves(&self, board: &Board, color: Color) -> bool {
        let mut probe = board.clone();
        let (regulars, _) = self.generate(&probe, color);
        for mv in &regulars {
            probe.apply_move(mv);
            let safe = !is_in_check(&probe, color);
            probe.undo_move(mv);
            if safe {
                return true;
            }
        }
        false
    }

    fn make_move(board: &Board, from: usize, to: usize, kind: MoveKind) -> Move {
        let capture = match kind {
            MoveKind::EnPassant => board.grid[(from / 8) * 8 + to % 8],
            _ => board.grid[to],
        };
        Move {
            from: from as u8,
            to: to as u8,
            kind,
            capture,
            first_move: board.grid[from].is_some_and(|p| !p.moved),
            clock: board.draw_clock,
        }
    }

    fn offset(row: usize, col: usize, dr: isize, dc: isize) -> Option<usize> {
        let r = row as isize + dr;
        let c = col as isize + dc;
        if (0..8).contains(&r) && (0..8).contains(&c) {
            Some(Board::square_index(r as usize, c as usize))
        } else {
            None
        }
    }

    fn gen_offset_moves(
        &self,
        board: &Board,
        from: usize,
        piece: Piece,
        offsets: &[(isize, isize)],
        moves: &mut MoveList,
    ) {
        let (row, col) = Board::coords(from);
        for &(dr, dc) in offsets {
            let Some(to) = Self::offset(row, col, dr, dc) else {
                continue;
            };
            if board.grid[to].is_some_and(|p| p.color == piece.color) {
                continue;
            }
            moves.push(Self::make_move(board, from, to, MoveKind::Quiet));
        }
    }

    fn gen_sliding_moves(
        &self,
        board: &Board,
        from: usize,
        piece: Piece,
        dirs: &[(isize, isize)],
        moves: &mut MoveList,
    ) {
        for &(dr, dc) in dirs {
            let (mut row, mut col) = Board::coords(from);
            while let Some(to) = Self::offset(row, col, dr, dc) {
                match board.grid[to] {
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(Self::make_move(board, from, to, MoveKind::Quiet));
                        }
                        break;
                    }
                    None => {
                        moves.push(Self::make_move(board, from, to, MoveKind::Quiet));
                        let (r, c) = Board::coords(to);
                        row = r;
                        col = c;
                    }
                }
            }
        }
    }

    fn gen_pawn_moves(&self, board: &Board, from: usize, piece: Piece, moves: &mut MoveList) {
        let (row, col) = Board::coords(from);
        let (dir, home_row, promo_row): (isize, usize, usize) = match piece.color {
            Color::White => (1, 1, 7),
            Color::Black => (-1, 6, 0),
        };

        if let Some(fwd) = Self::offset(row, col, dir, 0) {
            if board.grid[fwd].is_none() {
                Self::push_pawn_advance(board, from, fwd, promo_row, moves);
                if row == home_row {
                    if let Some(fwd2) = Self::offset(row, col, dir * 2, 0) {
                        if board.grid[fwd2].is_none() {
                            moves.push(Self::make_move(board, from, fwd2, MoveKind::DoubleStep));
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(to) = Self::offset(row, col, dir, dc) else {
                continue;
            };
            if board.grid[to].is_some_and(|p| p.color != piece.color) {
                Self::push_pawn_advance(board, from, to, promo_row, moves);
            } else if board.grid[to].is_none() {
                // En passant: an enemy pawn beside us still carries the
                // passing flag from its double step.
                if let Some(side) = Self::offset(row, col, 0, dc) {
                    let victim = board.grid[side];
                    if victim.is_some_and(|p| {
                        p.kind == PieceKind::Pawn && p.color != piece.color && p.passing
                    }) {
                        moves.push(Self::make_move(board, from, to, MoveKind::EnPassant));
                    }
                }
            }
        }
    }

    fn push_pawn_advance(
        board: &Board,
        from: usize,
        to: usize,
        promo_row: usize,
        moves: &mut MoveList,
    ) {
        if to / 8 == promo_row {
            for kind in PROMOTION_KINDS {
                moves.push(Self::make_move(board, from, to, MoveKind::Promote(kind)));
            }
        } else {
            moves.push(Self::make_move(board, from, to, MoveKind::Quiet));
        }
    }

    // Castling transit squares must be empty and safe; the landing square
    // is covered by the caller's king-safety filter after the move.
    fn gen_castling_moves(&self, board: &Board, from: usize, piece: Piece, moves: &mut MoveList) {
        if piece.moved || is_in_check(board, piece.color) {
            return;
        }
        let base = from - from % 8;
        if from != base + 4 {
            return;
        }
        let enemy = piece.color.opposite();

        let short_rook = board.grid[base + 7];
        if short_rook.is_some_and(|r| {
            r.kind == PieceKind::Rook && r.color == piece.color && !r.moved
        }) && board.grid[base + 5].is_none()
            && board.grid[base + 6].is_none()
            && !is_attacked(board, base + 5, enemy)
        {
            moves.push(Self::make_move(board, from, base + 6, MoveKind::CastleShort));
        }

        let long_rook = board.grid[base];
        if long_rook.is_some_and(|r| {
            r.kind == PieceKind::Rook && r.color == piece.color && !r.moved
        }) && board.grid[base + 1].is_none()
            && board.grid[base + 2].is_none()
            && board.grid[base + 3].is_none()
            && !is_attacked(board, base + 3, enemy)
        {
            moves.push(Self::make_move(board, from, base + 2, MoveKind::CastleLong));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_move_count() {
        let board = Board::new();
        let generator = MoveGenerator::new();
        let (regulars, maintenance) = generator.generate(&board, Color::White);
        assert_eq!(regulars.len(), 20);
        assert!(maintenance.is_empty());
    }

    #[test]
    fn test_capture_carries_victim() {
        let (board, _) =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        let generator = MoveGenerator::new();
        let (regulars, _) = generator.generate(&board, Color::White);
        let capture = regulars
            .iter()
            .find(|m| m.is_capture())
            .expect("exd5 should be generated");
        assert_eq!(Board::square_name(capture.to as usize), "d5");
        assert_eq!(capture.capture.unwrap().kind, PieceKind::Pawn);
    }

    #[test]
    fn test_en_passant_generated_and_cleared() {
        // Black just played d7d5 beside the white pawn on e5.
        let (mut board, _) =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1")
                .unwrap();
        let generator = MoveGenerator::new();
        let (regulars, _) = generator.generate(&board, Color::White);
        let ep = regulars
            .iter()
            .find(|m| m.kind == MoveKind::EnPassant)
            .copied()
            .expect("exd6 e.p. should be generated");
        assert_eq!(Board::square_name(ep.to as usize), "d6");
        assert_eq!(ep.capture.unwrap().kind, PieceKind::Pawn);

        // Once Black's maintenance move clears the flag, the capture is gone.
        let (_, black_maintenance) = generator.generate(&board, Color::Black);
        assert_eq!(black_maintenance.len(), 1);
        for mv in &black_maintenance {
            board.apply_move(mv);
        }
        let (regulars, _) = generator.generate(&board, Color::White);
        assert!(regulars.iter().all(|m| m.kind != MoveKind::EnPassant));
    }

    #[test]
    fn test_promotion_fans_out() {
        let (board, _) = Board::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let generator = MoveGenerator::new();
        let (regulars, _) = generator.generate(&board, Color::White);
        let promotions: Vec<_> = regulars
            .iter()
            .filter(|m| matches!(m.kind, MoveKind::Promote(_)))
            .collect();
        assert_eq!(promotions.len(), 4);
    }

    #[test]
    fn test_castling_both_wings() {
        let (board, _) = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let generator = MoveGenerator::new();
        let (regulars, _) = generator.generate(&board, Color::White);
        assert!(regulars.iter().any(|m| m.kind == MoveKind::CastleShort));
        assert!(regulars.iter().any(|m| m.kind == MoveKind::CastleLong));
    }

    #[test]
    fn test_castling_blocked_by_attack() {
        // Black rook on f8 covers f1, forbidding the short castle transit.
        let (board, _) = Board::from_fen("5r2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let generator = MoveGenerator::new();
        let (regulars, _) = generator.generate(&board, Color::White);
        assert!(regulars.iter().all(|m| m.kind != MoveKind::CastleShort));
        assert!(regulars.iter().any(|m| m.kind == MoveKind::CastleLong));
    }

    #[test]
    fn test_castling_needs_unmoved_rook() {
        let (board, _) = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").unwrap();
        let generator = MoveGenerator::new();
        let (regulars, _) = generator.generate(&board, Color::White);
        assert!(regulars
            .iter()
            .all(|m| !matches!(m.kind, MoveKind::CastleShort | MoveKind::CastleLong)));
    }
}
