use quickcheck::{Arbitrary, Gen};

use crate::{Board, Cell, Chooser, GameState, Position, GRID_SIZE, NUM_TIGERS};

/// Any occupancy of the board with exactly four tigers.
///
/// Most of these can't come up in a real game, but the move generator
/// has to handle them all the same.
#[derive(Clone, Debug)]
pub struct ArbitraryBoard(pub Board);

impl Arbitrary for ArbitraryBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut board = Board::empty();
        let mut tigers = 0;
        while tigers < NUM_TIGERS {
            let pos = arbitrary_position(g);
            if board.get(pos) == Cell::Empty {
                board.set(pos, Cell::Tiger);
                tigers += 1;
            }
        }
        // Roughly half of the remaining cells get a goat
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = Position::new(row, col);
                if board.get(pos) == Cell::Empty && bool::arbitrary(g) {
                    board.set(pos, Cell::Goat);
                }
            }
        }
        ArbitraryBoard(board)
    }
}

fn arbitrary_position(g: &mut Gen) -> Position {
    let row = (u8::arbitrary(g) % GRID_SIZE as u8) as i8;
    let col = (u8::arbitrary(g) % GRID_SIZE as u8) as i8;
    Position::new(row, col)
}

/// A state reached by letting the AI play both sides for a while, with
/// quickcheck making all the random choices.
#[derive(Clone, Debug)]
pub struct PlayedGame {
    pub state: GameState,
    pub plies: usize,
}

impl Arbitrary for PlayedGame {
    fn arbitrary(g: &mut Gen) -> Self {
        let max_plies = usize::arbitrary(g) % 120;
        let mut state = GameState::new();
        let mut plies = 0;
        while plies < max_plies && !state.is_game_over() {
            state.play_ai_turn(&mut GenChooser(&mut *g));
            plies += 1;
        }
        PlayedGame { state, plies }
    }
}

pub struct GenChooser<'a>(pub &'a mut Gen);

impl Chooser for GenChooser<'_> {
    fn choose(&mut self, len: usize) -> usize {
        usize::arbitrary(self.0) % len
    }
}

pub struct FirstChoice;

impl Chooser for FirstChoice {
    fn choose(&mut self, _len: usize) -> usize {
        0
    }
}

pub struct LastChoice;

impl Chooser for LastChoice {
    fn choose(&mut self, len: usize) -> usize {
        len - 1
    }
}

/// Picks the first candidate and remembers how many there were.
#[derive(Default)]
pub struct RecordingChooser {
    pub lens: Vec<usize>,
}

impl Chooser for RecordingChooser {
    fn choose(&mut self, len: usize) -> usize {
        self.lens.push(len);
        0
    }
}
