use std::cmp::Ordering;

use rand::Rng;
use tracing::debug;

use crate::{all_moves, evaluate_mobility, Board, Cell, GameState, Move, Phase, Position, Side};

/// Source of the random choices made by the AI.
///
/// Separated out so that tests can make the AI deterministic.
pub trait Chooser {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn choose(&mut self, len: usize) -> usize;
}

/// Chooses uniformly at random.
#[derive(Clone, Debug)]
pub struct RandomChooser<R>(pub R);

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// One action of the AI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Place(Position),
    Move(Move),
}

/// Decides what the side to move should do, or `None` if it can't do anything.
pub fn decide<C: Chooser + ?Sized>(state: &GameState, chooser: &mut C) -> Option<Decision> {
    if state.is_game_over() {
        return None;
    }
    let board = state.board();
    let decision = match (state.turn(), state.phase(state.turn())) {
        (Side::Tiger, _) => tiger_move(board, chooser).map(Decision::Move),
        (Side::Goat, Phase::Placement) => goat_placement(board, chooser).map(Decision::Place),
        (Side::Goat, Phase::Movement) => goat_move(board, chooser).map(Decision::Move),
    };
    debug!(side = %state.turn(), ?decision, "AI decision");
    decision
}

/// A random tiger move. Captures are always preferred.
pub fn tiger_move<C: Chooser + ?Sized>(board: &Board, chooser: &mut C) -> Option<Move> {
    let moves = all_moves(board, Side::Tiger);
    let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
    let candidates = if captures.is_empty() { moves } else { captures };
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[chooser.choose(candidates.len())])
}

/// The empty cell where a new goat leaves the tigers the fewest moves.
pub fn goat_placement<C: Chooser + ?Sized>(board: &Board, chooser: &mut C) -> Option<Position> {
    let candidates: Vec<Position> = board.empty_cells().collect();
    least_tiger_mobility(candidates, chooser, |&pos| {
        let mut simulated = board.clone();
        simulated.set(pos, Cell::Goat);
        evaluate_mobility(&simulated)
    })
}

/// The goat move that leaves the tigers the fewest moves.
pub fn goat_move<C: Chooser + ?Sized>(board: &Board, chooser: &mut C) -> Option<Move> {
    least_tiger_mobility(all_moves(board, Side::Goat), chooser, |mv| {
        let mut simulated = board.clone();
        mv.apply(&mut simulated);
        evaluate_mobility(&simulated)
    })
}

// Breaks ties between equally good candidates with the chooser.
fn least_tiger_mobility<T: Copy, C: Chooser + ?Sized>(
    candidates: Vec<T>,
    chooser: &mut C,
    score: impl Fn(&T) -> usize,
) -> Option<T> {
    let mut top_choices: Vec<T> = Vec::new();
    let mut top_score = usize::MAX;
    for candidate in candidates {
        let candidate_score = score(&candidate);
        match candidate_score.cmp(&top_score) {
            Ordering::Less => {
                top_choices = vec![candidate];
                top_score = candidate_score;
            }
            Ordering::Equal => top_choices.push(candidate),
            Ordering::Greater => {}
        }
    }
    if top_choices.is_empty() {
        return None;
    }
    Some(top_choices[chooser.choose(top_choices.len())])
}
