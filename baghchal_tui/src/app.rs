use std::time::{Duration, Instant};

use baghchal::{AiTrigger, Chooser, Game, GameConfig, Position, Side, Stage, GRID_SIZE};
use ratatui::crossterm::event::KeyCode;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    RoleSelection,
    Playing,
}

/// Everything the frontend keeps track of between frames.
pub struct App<C> {
    pub game: Game<C>,
    pub screen: Screen,
    pub cursor: Position,
    ai_delay: Duration,
    /// When the pending AI move should be played.
    ai_due: Option<Instant>,
    pub should_quit: bool,
}

impl<C: Chooser> App<C> {
    pub fn new(chooser: C, role: Option<Side>, ai_delay: Duration) -> Self {
        // The AI only ever moves through `tick()`, so that the human can see
        // the board before the AI's reply.
        let config = GameConfig {
            human: role.unwrap_or(Side::Goat),
            ai_trigger: AiTrigger::Deferred,
        };
        let mut app = Self {
            game: Game::new(config, chooser),
            screen: Screen::RoleSelection,
            cursor: Position::new(GRID_SIZE / 2, GRID_SIZE / 2),
            ai_delay,
            ai_due: None,
            should_quit: false,
        };
        if let Some(role) = role {
            app.start(role);
        }
        app
    }

    fn start(&mut self, role: Side) {
        self.game.initialize(role);
        self.screen = Screen::Playing;
        self.ai_due = None;
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match (self.screen, code) {
            (_, KeyCode::Char('q')) | (Screen::RoleSelection, KeyCode::Esc) => {
                self.should_quit = true
            }
            (Screen::RoleSelection, KeyCode::Char('g')) => self.start(Side::Goat),
            (Screen::RoleSelection, KeyCode::Char('t')) => self.start(Side::Tiger),
            (Screen::RoleSelection, _) => {}
            (Screen::Playing, KeyCode::Up | KeyCode::Char('k')) => self.move_cursor(-1, 0),
            (Screen::Playing, KeyCode::Down | KeyCode::Char('j')) => self.move_cursor(1, 0),
            (Screen::Playing, KeyCode::Left | KeyCode::Char('h')) => self.move_cursor(0, -1),
            (Screen::Playing, KeyCode::Right | KeyCode::Char('l')) => self.move_cursor(0, 1),
            (Screen::Playing, KeyCode::Enter | KeyCode::Char(' ')) => self.act(),
            (Screen::Playing, KeyCode::Char('r')) if self.game.state().is_game_over() => {
                self.game.restart(None);
                self.ai_due = None;
            }
            (Screen::Playing, KeyCode::Char('n') | KeyCode::Esc) => {
                self.screen = Screen::RoleSelection
            }
            (Screen::Playing, _) => {}
        }
    }

    fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        self.cursor = Position::new(
            (self.cursor.row + d_row).clamp(0, GRID_SIZE - 1),
            (self.cursor.col + d_col).clamp(0, GRID_SIZE - 1),
        );
    }

    /// Submits whatever action fits the cell under the cursor.
    fn act(&mut self) {
        let cursor = self.cursor;
        let state = self.game.state();
        debug!(%cursor, stage = ?state.stage(), "Human action");
        match state.stage() {
            Stage::AwaitingPlacement => {
                self.game.submit_placement(cursor);
            }
            Stage::AwaitingSelection => {
                self.game.submit_selection(cursor);
            }
            Stage::AwaitingDestination { .. }
                if state.board().get(cursor).side() == Some(state.turn()) =>
            {
                self.game.submit_selection(cursor);
            }
            Stage::AwaitingDestination { .. } => {
                self.game.submit_destination(cursor);
            }
            Stage::GameOver(_) => {}
        }
    }

    /// Plays the AI's move once it has been due for long enough.
    pub fn tick(&mut self, now: Instant) {
        if self.screen != Screen::Playing || !self.game.ai_to_move() {
            self.ai_due = None;
            return;
        }
        match self.ai_due {
            None => self.ai_due = Some(now + self.ai_delay),
            Some(due) if now >= due => {
                self.game.play_ai_turn();
                self.ai_due = None;
            }
            Some(_) => {}
        }
    }
}
