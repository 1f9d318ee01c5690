use baghchal::{GameState, RandomChooser, Side, WinReason};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{Config, MatchSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GameResult {
    Won {
        winner: Side,
        reason: WinReason,
        plies: usize,
        goats_captured: u8,
    },
    /// The game was cut off after `Config::max_plies` plies.
    Draw { plies: usize, goats_captured: u8 },
}

impl GameResult {
    pub fn plies(&self) -> usize {
        match self {
            GameResult::Won { plies, .. } | GameResult::Draw { plies, .. } => *plies,
        }
    }

    pub fn goats_captured(&self) -> u8 {
        match self {
            GameResult::Won { goats_captured, .. } | GameResult::Draw { goats_captured, .. } => {
                *goats_captured
            }
        }
    }
}

/// Plays one game from the starting position with the AI on both sides.
pub fn play_game(config: &mut Config) -> GameResult {
    let mut state = GameState::new();
    let mut chooser = RandomChooser(&mut config.rng);
    let mut plies = 0;
    while plies < config.max_plies {
        state.play_ai_turn(&mut chooser);
        plies += 1;
        trace!(plies, "Board after ply:\n{}", state.board());
        if let Some(outcome) = state.outcome() {
            return GameResult::Won {
                winner: outcome.winner,
                reason: outcome.reason,
                plies,
                goats_captured: state.goats_captured(),
            };
        }
    }
    GameResult::Draw {
        plies,
        goats_captured: state.goats_captured(),
    }
}

pub fn play_match(config: &mut Config, num_games: usize) -> MatchSummary {
    let mut summary = MatchSummary::default();
    for game_idx in 0..num_games {
        let result = play_game(config);
        debug!(game_idx, ?result);
        summary.record(&result);
    }
    summary
}
