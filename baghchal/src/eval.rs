use crate::{generate_moves, Board, Cell, Side};

/// Total number of legal tiger moves on this board.
///
/// This is the score the goat AI minimizes.
pub fn evaluate_mobility(board: &Board) -> usize {
    board
        .positions_of(Cell::Tiger)
        .map(|pos| generate_moves(board, pos, Side::Tiger).len())
        .sum()
}

/// Whether no tiger can move. Stops at the first mobile tiger.
pub fn tigers_trapped(board: &Board) -> bool {
    board
        .positions_of(Cell::Tiger)
        .all(|pos| generate_moves(board, pos, Side::Tiger).is_empty())
}
