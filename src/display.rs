use covua_core::logic::board::Board;
use std::fmt::Write as _;

#[must_use]
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in (0..8).rev() {
        let _ = write!(out, "{} ", row + 1);
        for col in 0..8 {
            match board.get_piece(row, col) {
                Some(piece) => {
                    let _ = write!(out, " {}", piece.to_fen_char());
                }
                None => out.push_str(" ."),
            }
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}

pub fn print_board(board: &Board) {
    println!("{}", render(board));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_start_position() {
        let text = render(&Board::new());
        let first_line = text.lines().next().unwrap_or("");
        assert_eq!(first_line, "8  r n b q k b n r");
        assert!(text.ends_with("   a b c d e f g h\n"));
    }
}
