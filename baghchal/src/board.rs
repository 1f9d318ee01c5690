use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of rows and columns of the board.
pub const GRID_SIZE: i8 = 5;
/// How many goats the goat side places in total.
pub const TOTAL_GOATS: u8 = 20;
/// The tigers win once they have captured this many goats.
pub const CAPTURES_TO_WIN: u8 = 5;
pub const NUM_TIGERS: usize = 4;

const NUM_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// The starting squares of the tigers.
pub const TIGER_START: [Position; NUM_TIGERS] = [
    Position::new(0, 0),
    Position::new(0, GRID_SIZE - 1),
    Position::new(GRID_SIZE - 1, 0),
    Position::new(GRID_SIZE - 1, GRID_SIZE - 1),
];

/// One of the two sides of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Goat,
    Tiger,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Goat => Side::Tiger,
            Side::Tiger => Side::Goat,
        }
    }

    /// The cell value of a piece belonging to this side.
    pub fn piece(self) -> Cell {
        match self {
            Side::Goat => Cell::Goat,
            Side::Tiger => Cell::Tiger,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Goat => write!(f, "Goat"),
            Side::Tiger => write!(f, "Tiger"),
        }
    }
}

/// The content of a single field of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Goat,
    Tiger,
}

impl Cell {
    /// The side owning the piece on this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Goat => Some(Side::Goat),
            Cell::Tiger => Some(Side::Tiger),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '·',
            Cell::Goat => 'G',
            Cell::Tiger => 'T',
        }
    }
}

/// A coordinate pair. Row 0 is the top row, column 0 the leftmost column.
///
/// Positions may lie outside the board, e.g. when stepping past an edge
/// or when they come from untrusted input. Use [`Position::is_on_board()`]
/// before handing them to [`Board::get()`] or [`Board::set()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..GRID_SIZE).contains(&self.row) && (0..GRID_SIZE).contains(&self.col)
    }

    /// The position `steps` steps away in direction `(d_row, d_col)`.
    ///
    /// Saturates instead of overflowing, which keeps the result off the board.
    pub fn step(self, (d_row, d_col): (i8, i8), steps: i8) -> Self {
        Self {
            row: self.row.saturating_add(d_row.saturating_mul(steps)),
            col: self.col.saturating_add(d_col.saturating_mul(steps)),
        }
    }

    fn index(self) -> usize {
        assert!(self.is_on_board(), "position {} is not on the board", self);
        self.row as usize * GRID_SIZE as usize + self.col as usize
    }

    fn from_index(idx: usize) -> Self {
        // The cast is fine, since idx < NUM_CELLS
        Self {
            row: (idx / GRID_SIZE as usize) as i8,
            col: (idx % GRID_SIZE as usize) as i8,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 5x5 playing grid.
///
/// Accessing a position outside of the grid panics. Everything that
/// takes coordinates from the outside checks them first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Row-major.
    cells: [Cell; NUM_CELLS],
}

impl Board {
    /// The starting position: a tiger in every corner, no goats.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for pos in TIGER_START {
            board.set(pos, Cell::Tiger);
        }
        board
    }

    /// A board without any pieces.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_CELLS],
        }
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// All positions holding `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(|(idx, _)| Position::from_index(idx))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions_of(Cell::Empty)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column indices
        write!(f, "    ")?;
        for col in 0..GRID_SIZE {
            write!(f, " {}", col)?;
        }
        // Draw the top of the box
        write!(f, "\n   ╭")?;
        for _ in 0..=GRID_SIZE {
            write!(f, "──")?;
        }
        writeln!(f, "╮")?;
        for row in 0..GRID_SIZE {
            write!(f, "{:>2} │", row)?;
            for col in 0..GRID_SIZE {
                write!(f, " {}", self.get(Position::new(row, col)).symbol())?;
            }
            writeln!(f, "  │")?;
        }
        // Draw the bottom of the box
        write!(f, "   ╰")?;
        for _ in 0..=GRID_SIZE {
            write!(f, "──")?;
        }
        write!(f, "╯")
    }
}

/// The error type for the [`FromStr`] instance of [`Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardFromStrErr {
    WrongNumberOfRows,
    WrongNumberOfColumns { row: usize },
    InvalidCell { row: usize, col: usize, ch: char },
}

impl std::error::Error for BoardFromStrErr {}

impl fmt::Display for BoardFromStrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardFromStrErr::WrongNumberOfRows => {
                write!(f, "A board needs exactly {} rows", GRID_SIZE)
            }
            BoardFromStrErr::WrongNumberOfColumns { row } => {
                write!(f, "Row {} does not have exactly {} cells", row, GRID_SIZE)
            }
            BoardFromStrErr::InvalidCell { row, col, ch } => write!(
                f,
                "Invalid character '{}' at ({}, {}), expected one of 'T', 'G' or '.'",
                ch, row, col
            ),
        }
    }
}

/// Parses one line per row, using `T` for tigers, `G` for goats and `.` for
/// empty cells. Whitespace within a line and blank lines are ignored.
impl FromStr for Board {
    type Err = BoardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != GRID_SIZE as usize {
            return Err(BoardFromStrErr::WrongNumberOfRows);
        }

        let mut board = Board::empty();
        for (row, chars) in rows.into_iter().enumerate() {
            if chars.len() != GRID_SIZE as usize {
                return Err(BoardFromStrErr::WrongNumberOfColumns { row });
            }
            for (col, ch) in chars.into_iter().enumerate() {
                let cell = match ch {
                    'T' | 't' => Cell::Tiger,
                    'G' | 'g' => Cell::Goat,
                    '.' | '·' => Cell::Empty,
                    _ => return Err(BoardFromStrErr::InvalidCell { row, col, ch }),
                };
                board.cells[row * GRID_SIZE as usize + col] = cell;
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position() {
        let board = Board::new();
        assert_eq!(board.count(Cell::Tiger), NUM_TIGERS);
        assert_eq!(board.count(Cell::Goat), 0);
        assert_eq!(board.positions_of(Cell::Tiger).collect::<Vec<_>>(), TIGER_START);
        assert_eq!(board.empty_cells().count(), 21);
    }

    #[test]
    fn clones_are_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        copy.set(Position::new(2, 2), Cell::Goat);
        assert_eq!(board.get(Position::new(2, 2)), Cell::Empty);
        assert_eq!(copy.get(Position::new(2, 2)), Cell::Goat);
    }

    #[test]
    fn bounds() {
        assert!(Position::new(0, 4).is_on_board());
        assert!(!Position::new(0, 5).is_on_board());
        assert!(!Position::new(-1, 2).is_on_board());
        assert!(!Position::new(i8::MAX, 0).step((1, 0), 2).is_on_board());
        assert_eq!(Position::new(2, 2).step((-1, 1), 2), Position::new(0, 4));
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds_panics() {
        Board::new().get(Position::new(1, 7));
    }

    #[test]
    fn parse_and_display() {
        let board: Board = "
            T . . . T
            . G . . .
            . . G . .
            . . . . .
            T . . . T
        "
        .parse()
        .unwrap();
        assert_eq!(board.count(Cell::Goat), 2);
        assert_eq!(board.get(Position::new(1, 1)), Cell::Goat);
        assert_eq!(board.positions_of(Cell::Tiger).count(), NUM_TIGERS);
        assert_eq!(
            Board::new().to_string().lines().nth(2),
            Some(" 0 │ T · · · T  │")
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "T...T".parse::<Board>(),
            Err(BoardFromStrErr::WrongNumberOfRows)
        );
        assert_eq!(
            "T...T\n.....\n....\n.....\nT...T".parse::<Board>(),
            Err(BoardFromStrErr::WrongNumberOfColumns { row: 2 })
        );
        assert_eq!(
            "T...T\n.....\n..x..\n.....\nT...T".parse::<Board>(),
            Err(BoardFromStrErr::InvalidCell {
                row: 2,
                col: 2,
                ch: 'x'
            })
        );
    }
}
