use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    decide, generate_moves, tigers_trapped, Board, Cell, Chooser, Decision, Move, Position, Side,
    CAPTURES_TO_WIN, TOTAL_GOATS,
};

/// Whether a side is still bringing pieces onto the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Placement,
    Movement,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// The tigers captured enough goats.
    GoatsCaptured,
    /// No tiger has a legal move left.
    TigersTrapped,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub reason: WinReason,
}

/// What the side to move is expected to do next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    AwaitingPlacement,
    AwaitingSelection,
    AwaitingDestination { selected: Position },
    GameOver(Outcome),
}

/// Summarizes the effect of a single action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was not legal. Nothing changed.
    Ignored,
    /// A piece was (re-)selected, the same side is still to move.
    Selected,
    TurnPassed,
    GameEnded(Outcome),
}

/// The complete state of one game.
///
/// All actions act on behalf of the side whose turn it is, and are total:
/// anything that is not a legal action in the current situation is ignored
/// and leaves the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Side,
    goats_placed: u8,
    goats_captured: u8,
    /// Only set during the movement phase of the side to move.
    selected: Option<Position>,
    outcome: Option<Outcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game. Goats move first.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Side::Goat,
            goats_placed: 0,
            goats_captured: 0,
            selected: None,
            outcome: None,
        }
    }

    /// Sets up an arbitrary position, e.g. for tests and analysis.
    ///
    /// The caller is responsible for the counts matching the board.
    pub fn from_position(board: Board, turn: Side, goats_placed: u8, goats_captured: u8) -> Self {
        debug_assert!(goats_placed <= TOTAL_GOATS);
        debug_assert!(goats_captured <= goats_placed);
        Self {
            board,
            turn,
            goats_placed,
            goats_captured,
            selected: None,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn goats_placed(&self) -> u8 {
        self.goats_placed
    }

    pub fn goats_captured(&self) -> u8 {
        self.goats_captured
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Tigers are always in the movement phase, goats only once all of
    /// them have been placed.
    pub fn phase(&self, side: Side) -> Phase {
        match side {
            Side::Goat if self.goats_placed < TOTAL_GOATS => Phase::Placement,
            _ => Phase::Movement,
        }
    }

    pub fn stage(&self) -> Stage {
        if let Some(outcome) = self.outcome {
            return Stage::GameOver(outcome);
        }
        match (self.phase(self.turn), self.selected) {
            (Phase::Placement, _) => Stage::AwaitingPlacement,
            (Phase::Movement, None) => Stage::AwaitingSelection,
            (Phase::Movement, Some(selected)) => Stage::AwaitingDestination { selected },
        }
    }

    /// The legal moves of the selected piece, for highlighting.
    pub fn selected_moves(&self) -> Vec<Move> {
        match self.selected {
            Some(pos) => generate_moves(&self.board, pos, self.turn),
            None => Vec::new(),
        }
    }

    /// Places a new goat on an empty cell.
    pub fn place_at(&mut self, pos: Position) -> ActionOutcome {
        if self.is_game_over()
            || self.phase(self.turn) != Phase::Placement
            || !pos.is_on_board()
            || self.board.get(pos) != Cell::Empty
        {
            return ActionOutcome::Ignored;
        }
        self.board.set(pos, self.turn.piece());
        self.goats_placed += 1;
        debug!(%pos, goats_placed = self.goats_placed, "Placed goat");
        self.finish_turn()
    }

    /// Picks one of the own pieces to move. Replaces an earlier selection.
    pub fn select_piece(&mut self, pos: Position) -> ActionOutcome {
        if self.is_game_over()
            || self.phase(self.turn) != Phase::Movement
            || !pos.is_on_board()
            || self.board.get(pos).side() != Some(self.turn)
        {
            return ActionOutcome::Ignored;
        }
        self.selected = Some(pos);
        ActionOutcome::Selected
    }

    /// Moves the selected piece to `pos`, if that is one of its legal moves.
    pub fn move_to(&mut self, pos: Position) -> ActionOutcome {
        if self.is_game_over() {
            return ActionOutcome::Ignored;
        }
        let Some(from) = self.selected else {
            return ActionOutcome::Ignored;
        };
        match generate_moves(&self.board, from, self.turn)
            .into_iter()
            .find(|mv| mv.to == pos)
        {
            Some(mv) => self.apply_move(mv),
            None => ActionOutcome::Ignored,
        }
    }

    /// Lets the AI act for the side to move.
    ///
    /// If the tigers cannot move, the goats win. If the goats cannot move,
    /// the turn passes without any change.
    pub fn play_ai_turn<C: Chooser + ?Sized>(&mut self, chooser: &mut C) -> ActionOutcome {
        if self.is_game_over() {
            return ActionOutcome::Ignored;
        }
        self.selected = None;
        match decide(self, chooser) {
            Some(Decision::Place(pos)) => self.place_at(pos),
            Some(Decision::Move(mv)) => self.apply_move(mv),
            None if self.turn == Side::Tiger => self.end_game(Outcome {
                winner: Side::Goat,
                reason: WinReason::TigersTrapped,
            }),
            None => {
                debug!(side = %self.turn, "No legal move, passing");
                self.finish_turn()
            }
        }
    }

    fn apply_move(&mut self, mv: Move) -> ActionOutcome {
        mv.apply(&mut self.board);
        if mv.is_capture() {
            self.goats_captured += 1;
        }
        self.selected = None;
        debug!(side = %self.turn, from = %mv.from, to = %mv.to, capture = mv.is_capture(), "Moved");
        self.finish_turn()
    }

    /// Checks the win conditions, and passes the turn if the game goes on.
    fn finish_turn(&mut self) -> ActionOutcome {
        match self.check_win() {
            Some(outcome) => self.end_game(outcome),
            None => {
                self.turn = self.turn.opponent();
                ActionOutcome::TurnPassed
            }
        }
    }

    fn check_win(&self) -> Option<Outcome> {
        if self.goats_captured >= CAPTURES_TO_WIN {
            Some(Outcome {
                winner: Side::Tiger,
                reason: WinReason::GoatsCaptured,
            })
        } else if tigers_trapped(&self.board) {
            Some(Outcome {
                winner: Side::Goat,
                reason: WinReason::TigersTrapped,
            })
        } else {
            None
        }
    }

    fn end_game(&mut self, outcome: Outcome) -> ActionOutcome {
        info!(winner = %outcome.winner, reason = ?outcome.reason, goats_captured = self.goats_captured, "Game over");
        self.outcome = Some(outcome);
        ActionOutcome::GameEnded(outcome)
    }
}
