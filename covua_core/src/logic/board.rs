use crate::engine::{Move, MoveKind};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

/// Plies remaining before the fifty-move rule forces a draw.
pub const DRAW_CLOCK_START: u8 = 100;

/// king_square value when the king is absent (cleared test boards).
pub const NO_KING: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const fn to_char(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Set once the piece has moved; gates castling.
    pub moved: bool,
    /// Pawn that just advanced two squares; cleared by a maintenance move.
    pub passing: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            moved: false,
            passing: false,
        }
    }

    pub fn to_fen_char(self) -> char {
        let ch = self.kind.to_char();
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    MissingPlacement,
    BadPiece(char),
    BadShape,
    BadTurn,
}

impl std::fmt::Display for FenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPlacement => write!(f, "missing piece placement field"),
            Self::BadPiece(ch) => write!(f, "unknown piece character '{ch}'"),
            Self::BadShape => write!(f, "placement does not describe 8x8 ranks"),
            Self::BadTurn => write!(f, "side-to-move field must be 'w' or 'b'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Mailbox, a1 = 0, h8 = 63.
    #[serde(with = "BigArray")]
    pub grid: [Option<Piece>; 64],
    /// Indexed by Color::index().
    pub king_square: [usize; 2],
    /// Counts down to 0; at the floor the position is a forced draw.
    pub draw_clock: u8,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    fn empty() -> Self {
        Self {
            grid: [None; 64],
            king_square: [NO_KING; 2],
            draw_clock: DRAW_CLOCK_START,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    fn setup_initial_position(&mut self) {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (col, &kind) in back_rank.iter().enumerate() {
            self.add_piece(Self::square_index(0, col), kind, Color::White);
            self.add_piece(Self::square_index(7, col), kind, Color::Black);
        }
        for col in 0..8 {
            self.add_piece(Self::square_index(1, col), PieceKind::Pawn, Color::White);
            self.add_piece(Self::square_index(6, col), PieceKind::Pawn, Color::Black);
        }
    }

    // Helper to place a fresh (unmoved) piece; keeps king tracking in sync.
    pub fn add_piece(&mut self, square: usize, kind: PieceKind, color: Color) {
        self.grid[square] = Some(Piece::new(kind, color));
        if kind == PieceKind::King {
            self.king_square[color.index()] = square;
        }
    }

    pub fn set_piece(&mut self, square: usize, piece: Option<Piece>) {
        if let Some(old) = self.grid[square] {
            if old.kind == PieceKind::King {
                self.king_square[old.color.index()] = NO_KING;
            }
        }
        self.grid[square] = piece;
        if let Some(p) = piece {
            if p.kind == PieceKind::King {
                self.king_square[p.color.index()] = square;
            }
        }
    }

    #[must_use]
    pub const fn square_index(row: usize, col: usize) -> usize {
        row * 8 + col
    }

    #[must_use]
    pub const fn coords(square: usize) -> (usize, usize) {
        (square / 8, square % 8)
    }

    #[must_use]
    pub fn get_piece(&self, row: usize, col: usize) -> Option<Piece> {
        self.grid[Self::square_index(row, col)]
    }

    #[must_use]
    pub fn square_name(square: usize) -> String {
        let (row, col) = Self::coords(square);
        let file = (b'a' + col as u8) as char;
        let rank = (b'1' + row as u8) as char;
        format!("{file}{rank}")
    }

    #[must_use]
    pub fn parse_square(text: &str) -> Option<usize> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as usize - 'a' as usize;
        let row = rank as usize - '1' as usize;
        Some(Self::square_index(row, col))
    }

    /// Parses `e2e4` / `e7e8q` into (from, to, promotion).
    #[must_use]
    pub fn parse_move_text(text: &str) -> Option<(usize, usize, Option<PieceKind>)> {
        let text = text.trim();
        if text.len() < 4 || text.len() > 5 {
            return None;
        }
        let from = Self::parse_square(text.get(0..2)?)?;
        let to = Self::parse_square(text.get(2..4)?)?;
        let promotion = match text.get(4..5) {
            None | Some("") => None,
            Some(ch) => {
                let kind = PieceKind::from_char(ch.chars().next()?)?;
                if matches!(kind, PieceKind::Pawn | PieceKind::King) {
                    return None;
                }
                Some(kind)
            }
        };
        Some((from, to, promotion))
    }

    /// Square of the pawn removed by an en-passant capture: same rank as
    /// the capturing pawn's origin, same file as its destination.
    const fn passed_square(from: usize, to: usize) -> usize {
        (from / 8) * 8 + to % 8
    }

    pub fn apply_move(&mut self, mv: &Move) {
        let from = mv.from as usize;
        let to = mv.to as usize;

        if mv.kind == MoveKind::ClearPassing {
            if let Some(pawn) = self.grid[from].as_mut() {
                pawn.passing = false;
            }
            return;
        }

        let mut piece = self.grid[from]
            .take()
            .expect("no piece at source in apply_move");
        let was_pawn = piece.kind == PieceKind::Pawn;
        piece.moved = true;

        match mv.kind {
            MoveKind::DoubleStep => piece.passing = true,
            MoveKind::EnPassant => self.grid[Self::passed_square(from, to)] = None,
            MoveKind::Promote(kind) => piece.kind = kind,
            MoveKind::CastleShort | MoveKind::CastleLong => {
                let (rook_from, rook_to) = Self::rook_castle_squares(from, mv.kind);
                let mut rook = self.grid[rook_from]
                    .take()
                    .expect("no rook for castling in apply_move");
                rook.moved = true;
                self.grid[rook_to] = Some(rook);
            }
            _ => {}
        }

        self.grid[to] = Some(piece);
        if piece.kind == PieceKind::King {
            self.king_square[piece.color.index()] = to;
        }

        self.draw_clock = if mv.capture.is_some() || was_pawn {
            DRAW_CLOCK_START
        } else {
            self.draw_clock.saturating_sub(1)
        };
    }

    pub fn undo_move(&mut self, mv: &Move) {
        let from = mv.from as usize;
        let to = mv.to as usize;

        if mv.kind == MoveKind::ClearPassing {
            if let Some(pawn) = self.grid[from].as_mut() {
                pawn.passing = true;
            }
            return;
        }

        let mut piece = self.grid[to]
            .take()
            .expect("no piece at destination in undo_move");
        if matches!(mv.kind, MoveKind::Promote(_)) {
            piece.kind = PieceKind::Pawn;
        }
        if mv.kind == MoveKind::DoubleStep {
            piece.passing = false;
        }
        piece.moved = !mv.first_move;

        self.grid[from] = Some(piece);
        if piece.kind == PieceKind::King {
            self.king_square[piece.color.index()] = from;
        }

        match mv.kind {
            MoveKind::EnPassant => self.grid[Self::passed_square(from, to)] = mv.capture,
            MoveKind::CastleShort | MoveKind::CastleLong => {
                let (rook_from, rook_to) = Self::rook_castle_squares(from, mv.kind);
                let mut rook = self.grid[rook_to]
                    .take()
                    .expect("no rook for castling in undo_move");
                rook.moved = false;
                self.grid[rook_from] = Some(rook);
            }
            _ => self.grid[to] = mv.capture,
        }

        self.draw_clock = mv.clock;
    }

    const fn rook_castle_squares(king_from: usize, kind: MoveKind) -> (usize, usize) {
        let base = king_from - king_from % 8;
        match kind {
            MoveKind::CastleShort => (base + 7, base + 5),
            _ => (base, base + 3),
        }
    }

    pub fn from_fen(fen: &str) -> Result<(Self, Color), FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::MissingPlacement)?;

        let mut board = Self::empty();
        let mut row = 7usize;
        let mut col = 0usize;
        for ch in placement.chars() {
            match ch {
                '/' => {
                    if col != 8 || row == 0 {
                        return Err(FenError::BadShape);
                    }
                    row -= 1;
                    col = 0;
                }
                '1'..='8' => {
                    col += ch as usize - '0' as usize;
                    if col > 8 {
                        return Err(FenError::BadShape);
                    }
                }
                _ => {
                    if col >= 8 {
                        return Err(FenError::BadShape);
                    }
                    let kind = PieceKind::from_char(ch.to_ascii_lowercase())
                        .ok_or(FenError::BadPiece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    board.add_piece(Self::square_index(row, col), kind, color);
                    col += 1;
                }
            }
        }
        if row != 0 || col != 8 {
            return Err(FenError::BadShape);
        }

        let turn = match fields.next().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::BadTurn),
        };

        let rights = fields.next().unwrap_or("-");
        for (right, corner) in [('K', 7usize), ('Q', 0), ('k', 63), ('q', 56)] {
            if !rights.contains(right) {
                if let Some(rook) = board.grid[corner].as_mut() {
                    if rook.kind == PieceKind::Rook {
                        rook.moved = true;
                    }
                }
            }
        }

        if let Some(target) = fields.next().filter(|f| *f != "-") {
            if let Some(sq) = Self::parse_square(target) {
                // Target is the square behind the pawn that double-stepped.
                let pawn_sq = if sq / 8 == 2 { sq + 8 } else { sq.wrapping_sub(8) };
                if let Some(pawn) = board.grid.get_mut(pawn_sq).and_then(|slot| slot.as_mut()) {
                    if pawn.kind == PieceKind::Pawn {
                        pawn.passing = true;
                        pawn.moved = true;
                    }
                }
            }
        }

        let halfmove: u8 = fields
            .next()
            .and_then(|f| f.parse().ok())
            .unwrap_or(0);
        board.draw_clock = DRAW_CLOCK_START.saturating_sub(halfmove);

        Ok((board, turn))
    }

    pub fn to_fen_string(&self, turn: Color) -> String {
        let mut fen = String::new();

        for row in (0..8).rev() {
            let mut empty_count = 0;
            for col in 0..8 {
                if let Some(piece) = self.get_piece(row, col) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if turn == Color::White { 'w' } else { 'b' });

        fen.push(' ');
        let mut rights = String::new();
        for (right, king_sq, corner) in [
            ('K', 4usize, 7usize),
            ('Q', 4, 0),
            ('k', 60, 63),
            ('q', 60, 56),
        ] {
            let king_ok = self.grid[king_sq]
                .is_some_and(|p| p.kind == PieceKind::King && !p.moved);
            let rook_ok = self.grid[corner]
                .is_some_and(|p| p.kind == PieceKind::Rook && !p.moved);
            if king_ok && rook_ok {
                rights.push(right);
            }
        }
        if rights.is_empty() {
            fen.push('-');
        } else {
            fen.push_str(&rights);
        }

        fen.push(' ');
        let passing = self.grid.iter().enumerate().find_map(|(sq, slot)| {
            slot.filter(|p| {
                p.kind == PieceKind::Pawn && p.passing && p.color == turn.opposite()
            })
            .map(|p| match p.color {
                Color::White => sq - 8,
                Color::Black => sq + 8,
            })
        });
        match passing {
            Some(sq) => fen.push_str(&Self::square_name(sq)),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&(DRAW_CLOCK_START - self.draw_clock).to_string());
        fen.push_str(" 1");

        fen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_setup() {
        let board = Board::new();

        let piece = board.get_piece(0, 4).unwrap();
        assert_eq!(piece.kind, PieceKind::King);
        assert_eq!(piece.color, Color::White);
        assert_eq!(board.king_square[Color::White.index()], 4);

        let piece = board.get_piece(7, 4).unwrap();
        assert_eq!(piece.kind, PieceKind::King);
        assert_eq!(piece.color, Color::Black);
        assert_eq!(board.king_square[Color::Black.index()], 60);

        assert_eq!(board.draw_clock, DRAW_CLOCK_START);
    }

    #[test]
    fn test_fen_generation() {
        let board = Board::new();
        let fen = board.to_fen_string(Color::White);
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_fen_round_trip() {
        let source = "r3k2r/pp3ppp/8/8/8/8/PP3PPP/R3K2R b KQkq - 12 1";
        let (board, turn) = Board::from_fen(source).unwrap();
        assert_eq!(turn, Color::Black);
        assert_eq!(board.draw_clock, DRAW_CLOCK_START - 12);
        assert_eq!(board.to_fen_string(turn), source);
    }

    #[test]
    fn test_fen_en_passant_target() {
        let (board, turn) =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(turn, Color::Black);
        let pawn = board.get_piece(3, 4).unwrap();
        assert!(pawn.passing);
        assert_eq!(
            board.to_fen_string(turn),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn test_fen_rejects_garbage() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8").is_err());
        assert!(Board::from_fen("xxxxxxxx/8/8/8/8/8/8/8 w").is_err());
    }

    #[test]
    fn test_apply_move_updates_clock() {
        let mut board = Board::new();
        let mv = Move {
            from: Board::square_index(0, 1) as u8,
            to: Board::square_index(2, 2) as u8,
            kind: MoveKind::Quiet,
            capture: None,
            first_move: true,
            clock: board.draw_clock,
        };
        board.apply_move(&mv);
        assert_eq!(board.draw_clock, DRAW_CLOCK_START - 1);

        let piece = board.get_piece(2, 2).unwrap();
        assert_eq!(piece.kind, PieceKind::Knight);
        assert!(piece.moved);

        board.undo_move(&mv);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_square_names() {
        assert_eq!(Board::square_name(0), "a1");
        assert_eq!(Board::square_name(63), "h8");
        assert_eq!(Board::parse_square("e2"), Some(12));
        assert_eq!(Board::parse_square("j9"), None);
        assert_eq!(
            Board::parse_move_text("e7e8q"),
            Some((52, 60, Some(PieceKind::Queen)))
        );
        assert_eq!(Board::parse_move_text("e2"), None);
    }
}
