use tracing::debug;

use crate::{ActionOutcome, Chooser, GameState, Position, Side};

/// When the AI answers a human action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AiTrigger {
    /// Right away, before the human entry point returns.
    #[default]
    Immediate,
    /// Only when [`Game::play_ai_turn()`] is called. This allows a frontend
    /// to show the human's move for a moment before the AI replies.
    Deferred,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// The side controlled by the human. The AI plays the other one.
    pub human: Side,
    pub ai_trigger: AiTrigger,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human: Side::Goat,
            ai_trigger: AiTrigger::Immediate,
        }
    }
}

/// A game between a human and the AI.
///
/// This is the entry point for frontends. Human actions are only accepted
/// while it is the human's turn; everything else is silently ignored, like
/// illegal actions are.
///
/// Only the AI passes when its goats are boxed in. A human goat without a
/// legal move keeps the turn, and the game waits for a restart.
pub struct Game<C> {
    config: GameConfig,
    state: GameState,
    chooser: C,
}

impl<C: Chooser> Game<C> {
    /// Starts a new game. If the AI plays the goats, it may already have
    /// made its first move, depending on the [`AiTrigger`].
    pub fn new(config: GameConfig, chooser: C) -> Self {
        let mut game = Self {
            config,
            state: GameState::new(),
            chooser,
        };
        game.after_transition();
        game
    }

    /// Throws away the current game and starts a new one.
    pub fn initialize(&mut self, human: Side) -> &GameState {
        debug!(%human, "New game");
        self.config.human = human;
        self.state = GameState::new();
        self.after_transition();
        &self.state
    }

    /// Starts a new game, keeping the human's side unless another one is given.
    pub fn restart(&mut self, human: Option<Side>) -> &GameState {
        self.initialize(human.unwrap_or(self.config.human))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human(&self) -> Side {
        self.config.human
    }

    pub fn is_humans_turn(&self) -> bool {
        !self.state.is_game_over() && self.state.turn() == self.config.human
    }

    pub fn ai_to_move(&self) -> bool {
        !self.state.is_game_over() && self.state.turn() != self.config.human
    }

    pub fn submit_placement(&mut self, pos: Position) -> &GameState {
        self.submit(|state| state.place_at(pos))
    }

    pub fn submit_selection(&mut self, pos: Position) -> &GameState {
        self.submit(|state| state.select_piece(pos))
    }

    pub fn submit_destination(&mut self, pos: Position) -> &GameState {
        self.submit(|state| state.move_to(pos))
    }

    /// Lets the AI make its move, if it is its turn.
    pub fn play_ai_turn(&mut self) -> &GameState {
        if self.ai_to_move() {
            self.state.play_ai_turn(&mut self.chooser);
        }
        &self.state
    }

    fn submit(&mut self, action: impl FnOnce(&mut GameState) -> ActionOutcome) -> &GameState {
        if !self.is_humans_turn() {
            return &self.state;
        }
        if action(&mut self.state) == ActionOutcome::TurnPassed {
            self.after_transition();
        }
        &self.state
    }

    fn after_transition(&mut self) {
        if self.config.ai_trigger == AiTrigger::Immediate && self.ai_to_move() {
            self.state.play_ai_turn(&mut self.chooser);
        }
    }
}
