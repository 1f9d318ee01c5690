use std::fmt;

use baghchal::{Side, WinReason};
use serde::Serialize;

use crate::GameResult;

/// Tally of a series of games.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub tiger_wins: usize,
    pub goat_wins: usize,
    pub draws: usize,
    pub total_goats_captured: usize,
    pub total_plies: usize,
}

impl MatchSummary {
    pub fn record(&mut self, result: &GameResult) {
        self.games += 1;
        self.total_plies += result.plies();
        self.total_goats_captured += usize::from(result.goats_captured());
        match result {
            GameResult::Won {
                winner: Side::Tiger,
                ..
            } => self.tiger_wins += 1,
            GameResult::Won {
                winner: Side::Goat,
                reason,
                ..
            } => {
                debug_assert_eq!(*reason, WinReason::TigersTrapped);
                self.goat_wins += 1
            }
            GameResult::Draw { .. } => self.draws += 1,
        }
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "End result after {} games:", self.games)?;
        writeln!(
            f,
            "- {} tiger wins ({:5.1}%)",
            self.tiger_wins,
            percentage(self.tiger_wins, self.games)
        )?;
        writeln!(
            f,
            "- {} goat wins ({:5.1}%)",
            self.goat_wins,
            percentage(self.goat_wins, self.games)
        )?;
        writeln!(
            f,
            "- {} draws ({:5.1}%)",
            self.draws,
            percentage(self.draws, self.games)
        )?;
        write!(
            f,
            "- {:.1} plies and {} captured goats per game on average",
            self.average_plies(),
            self.total_goats_captured as f64 / self.games.max(1) as f64
        )
    }
}
