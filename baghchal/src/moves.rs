use serde::{Deserialize, Serialize};

use crate::{Board, Cell, Position, Side};

/// The eight neighbouring directions as `(d_row, d_col)`.
///
/// Moves are always generated in this order.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Relocation of a single piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// The goat that is jumped over, if this is a capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub captured: Option<Position>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Moves the piece and removes the captured goat, if any.
    ///
    /// Does not check legality; the move is expected to come from
    /// [`generate_moves()`] for this very board.
    pub fn apply(&self, board: &mut Board) {
        let piece = board.get(self.from);
        board.set(self.from, Cell::Empty);
        board.set(self.to, piece);
        if let Some(captured) = self.captured {
            board.set(captured, Cell::Empty);
        }
    }
}

/// All legal moves for a piece of kind `piece` standing at `from`.
///
/// A piece may step onto any empty neighbouring cell. Tigers may also jump
/// over a neighbouring goat onto the empty cell directly behind it,
/// capturing the goat.
///
/// Returns nothing for positions off the board, so untrusted coordinates are
/// fine here.
pub fn generate_moves(board: &Board, from: Position, piece: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    if !from.is_on_board() {
        return moves;
    }
    for dir in DIRECTIONS {
        let adjacent = from.step(dir, 1);
        if !adjacent.is_on_board() {
            continue;
        }
        let adjacent_cell = board.get(adjacent);
        if adjacent_cell.is_empty() {
            moves.push(Move {
                from,
                to: adjacent,
                captured: None,
            });
        }
        if piece == Side::Tiger && adjacent_cell == Cell::Goat {
            let landing = from.step(dir, 2);
            if landing.is_on_board() && board.get(landing).is_empty() {
                moves.push(Move {
                    from,
                    to: landing,
                    captured: Some(adjacent),
                });
            }
        }
    }
    moves
}

/// All legal moves of all pieces of `side`, piece by piece in row-major order.
pub fn all_moves(board: &Board, side: Side) -> Vec<Move> {
    board
        .positions_of(side.piece())
        .flat_map(|pos| generate_moves(board, pos, side))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ArbitraryBoard;

    fn destinations(moves: &[Move]) -> BTreeSet<Position> {
        moves.iter().map(|m| m.to).collect()
    }

    quickcheck! {
        fn destinations_are_empty(input: ArbitraryBoard) -> bool {
            let board = input.0;
            [Side::Goat, Side::Tiger].into_iter().all(|side| {
                all_moves(&board, side)
                    .iter()
                    .all(|m| m.to.is_on_board() && board.get(m.to) == Cell::Empty)
            })
        }

        fn captures_jump_over_a_goat(input: ArbitraryBoard) -> bool {
            let board = input.0;
            all_moves(&board, Side::Tiger).iter().all(|m| match m.captured {
                None => (m.to.row - m.from.row).abs() <= 1 && (m.to.col - m.from.col).abs() <= 1,
                Some(captured) => {
                    captured.is_on_board()
                        && board.get(captured) == Cell::Goat
                        && captured.row * 2 == m.from.row + m.to.row
                        && captured.col * 2 == m.from.col + m.to.col
                }
            })
        }

        fn goats_never_capture(input: ArbitraryBoard) -> bool {
            !all_moves(&input.0, Side::Goat).iter().any(Move::is_capture)
        }

        fn off_board_origin_has_no_moves(row: i8, col: i8) -> bool {
            let pos = Position::new(row, col);
            pos.is_on_board() || generate_moves(&Board::new(), pos, Side::Tiger).is_empty()
        }
    }

    #[test]
    fn corner_tiger_after_central_goat() {
        let mut board = Board::new();
        board.set(Position::new(2, 2), Cell::Goat);
        let moves = generate_moves(&board, Position::new(0, 0), Side::Tiger);
        assert!(!moves.iter().any(Move::is_capture));
        assert_eq!(
            destinations(&moves),
            BTreeSet::from([
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ])
        );
    }

    #[test]
    fn tiger_jumps_over_goat() {
        let board: Board = "
            . . . . .
            . . . . .
            T G . . .
            . . . . .
            . . . . .
        "
        .parse()
        .unwrap();
        let moves = generate_moves(&board, Position::new(2, 0), Side::Tiger);
        assert!(moves.contains(&Move {
            from: Position::new(2, 0),
            to: Position::new(2, 2),
            captured: Some(Position::new(2, 1)),
        }));
        // The goat itself can only step
        let goat_moves = generate_moves(&board, Position::new(2, 1), Side::Goat);
        assert_eq!(goat_moves.len(), 7);
        assert!(!goat_moves.iter().any(Move::is_capture));
    }

    #[test]
    fn no_jump_onto_occupied_or_off_board_cells() {
        let board: Board = "
            T G T . .
            G G . . .
            . . . . .
            . . . . .
            . . . . .
        "
        .parse()
        .unwrap();
        // The jump to the east is blocked by the tiger on (0, 2)
        let moves = generate_moves(&board, Position::new(0, 0), Side::Tiger);
        assert_eq!(
            moves,
            vec![
                Move {
                    from: Position::new(0, 0),
                    to: Position::new(2, 0),
                    captured: Some(Position::new(1, 0)),
                },
                Move {
                    from: Position::new(0, 0),
                    to: Position::new(2, 2),
                    captured: Some(Position::new(1, 1)),
                },
            ]
        );
    }

    #[test]
    fn apply_capture() {
        let mut board: Board = "
            . . . . .
            . . . . .
            T G . . .
            . . . . .
            . . . . .
        "
        .parse()
        .unwrap();
        let capture = Move {
            from: Position::new(2, 0),
            to: Position::new(2, 2),
            captured: Some(Position::new(2, 1)),
        };
        capture.apply(&mut board);
        assert_eq!(board.get(Position::new(2, 0)), Cell::Empty);
        assert_eq!(board.get(Position::new(2, 1)), Cell::Empty);
        assert_eq!(board.get(Position::new(2, 2)), Cell::Tiger);
    }

    #[test]
    fn all_moves_from_start() {
        // Every corner tiger has three neighbours
        let moves = all_moves(&Board::new(), Side::Tiger);
        assert_eq!(moves.len(), 12);
        assert_eq!(moves[0].from, Position::new(0, 0));
        assert!(all_moves(&Board::new(), Side::Goat).is_empty());
    }
}
