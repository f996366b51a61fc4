use std::fmt::Debug;

use pretty_assertions::assert_eq;

use crate::board::{BoardRepr, Piece, Square};

pub fn assert_in_any_order<T: Eq + Ord + Debug>(
    values: impl IntoIterator<Item = T>,
    expected: impl IntoIterator<Item = T>,
) {
    let mut values = values.into_iter().collect::<Vec<_>>();
    values.sort();

    let mut expected = expected.into_iter().collect::<Vec<_>>();
    expected.sort();

    assert_eq!(values, expected);
}

/// Reads an 8x8 diagram with rank 8 first, `.` for empty squares and FEN
/// letters for pieces. Whitespace is ignored.
pub fn board_from_diagram(diagram: &str) -> BoardRepr {
    let mut board = [None; 64];

    let mut squares = (0..8)
        .rev()
        .flat_map(|rank| (0..8).map(move |file| Square::new_unchecked(rank, file)));

    for c in diagram.chars().filter(|c| !c.is_whitespace()) {
        let square = squares.next().expect("diagram has more than 64 squares");
        if c != '.' {
            let piece = Piece::try_from_fen_char(c).expect("unknown piece in diagram");
            board[square.index()] = Some(piece);
        }
    }

    assert!(squares.next().is_none(), "diagram has fewer than 64 squares");

    BoardRepr::new(&board)
}
