use std::fmt;
use std::sync::Arc;

use log::{error, warn};
use storage::LeaderboardRepository;
use trivia_core::model::{Leaderboard, LeaderboardStats, UserScores};

/// Durable, cross-session leaderboard.
///
/// Loads the board once at construction and writes the whole board back
/// after every update. Storage failures never reach the caller: a board that
/// cannot be read starts empty, and a failed write is logged and dropped.
pub struct LeaderboardStore {
    board: Leaderboard,
    repo: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardStore {
    #[must_use]
    pub fn open(repo: Arc<dyn LeaderboardRepository>) -> Self {
        let board = match repo.load() {
            Ok(board) => board,
            Err(err) => {
                warn!("could not read leaderboard, starting empty: {err}");
                Leaderboard::new()
            }
        };
        Self { board, repo }
    }

    /// Fold a finished round into `username`'s totals and persist the board.
    ///
    /// A blank username is recorded as `"Anonymous"`.
    pub fn update_score(&mut self, username: &str, score: u32) {
        self.board.record(username, score);
        if let Err(err) = self.repo.save(&self.board) {
            error!("failed to save leaderboard: {err}");
        }
    }

    /// Users by descending high score; ties keep first-seen order.
    #[must_use]
    pub fn sorted_scores(&self) -> Vec<(&str, UserScores)> {
        self.board.sorted()
    }

    #[must_use]
    pub fn user_stats(&self, username: &str) -> Option<UserScores> {
        self.board.user_stats(username)
    }

    // NOTE: `total_games` equals `total_points`; rounds are not counted anywhere.
    #[must_use]
    pub fn leaderboard_stats(&self) -> LeaderboardStats {
        self.board.stats()
    }

    /// 1-based rank; users not on the board rank one past the last entry.
    #[must_use]
    pub fn user_rank(&self, username: &str) -> usize {
        self.board.rank(username)
    }

    #[must_use]
    pub fn board(&self) -> &Leaderboard {
        &self.board
    }
}

impl fmt::Debug for LeaderboardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaderboardStore")
            .field("players", &self.board.len())
            .finish_non_exhaustive()
    }
}
