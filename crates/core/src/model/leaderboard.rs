use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key used for rounds played without a username.
pub const ANONYMOUS: &str = "Anonymous";

/// Map a blank username to [`ANONYMOUS`]; other names pass through untouched.
#[must_use]
pub fn normalize_username(raw: &str) -> &str {
    if raw.trim().is_empty() { ANONYMOUS } else { raw }
}

//
// ─── SCORES ────────────────────────────────────────────────────────────────────
//

/// Per-user aggregate across every round the user has played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScores {
    pub high_score: u32,
    pub cumulative_score: u64,
}

impl UserScores {
    #[must_use]
    pub fn first_round(score: u32) -> Self {
        Self {
            high_score: score,
            cumulative_score: u64::from(score),
        }
    }

    fn record(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
        self.cumulative_score = self.cumulative_score.saturating_add(u64::from(score));
    }
}

/// Whole-board summary numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeaderboardStats {
    pub total_players: usize,
    /// Mirrors `total_points`; the board does not count rounds.
    pub total_games: u64,
    pub avg_high_score: f64,
    pub max_high_score: u32,
    pub total_points: u64,
}

//
// ─── LEADERBOARD ───────────────────────────────────────────────────────────────
//

/// Insertion-ordered mapping from username to [`UserScores`].
///
/// Insertion order is the tie-break for ranking. It serializes as a plain map
/// in insertion order, and document order becomes insertion order on load.
/// Persisted keys are kept exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    scores: IndexMap<String, UserScores>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Fold one round's score into the user's aggregate, creating the user if needed.
    pub fn record(&mut self, username: &str, score: u32) {
        let key = normalize_username(username);
        match self.scores.get_mut(key) {
            Some(scores) => scores.record(score),
            None => {
                self.scores
                    .insert(key.to_string(), UserScores::first_round(score));
            }
        }
    }

    #[must_use]
    pub fn user_stats(&self, username: &str) -> Option<UserScores> {
        self.scores.get(normalize_username(username)).copied()
    }

    /// Users ordered by descending high score; equal scores keep insertion order.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, UserScores)> {
        let mut sorted: Vec<(&str, UserScores)> = self
            .scores
            .iter()
            .map(|(name, scores)| (name.as_str(), *scores))
            .collect();
        // `sort_by` is stable, which the tie-break relies on.
        sorted.sort_by(|a, b| b.1.high_score.cmp(&a.1.high_score));
        sorted
    }

    /// 1-based rank; unknown users rank one past the last entry.
    #[must_use]
    pub fn rank(&self, username: &str) -> usize {
        let key = normalize_username(username);
        self.sorted()
            .iter()
            .position(|(name, _)| *name == key)
            .map_or(self.scores.len() + 1, |idx| idx + 1)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> LeaderboardStats {
        if self.scores.is_empty() {
            return LeaderboardStats::default();
        }

        let total_players = self.scores.len();
        let total_points: u64 = self.scores.values().map(|s| s.cumulative_score).sum();
        let high_sum: u64 = self.scores.values().map(|s| u64::from(s.high_score)).sum();
        let max_high_score = self
            .scores
            .values()
            .map(|s| s.high_score)
            .max()
            .unwrap_or(0);

        LeaderboardStats {
            total_players,
            total_games: total_points,
            avg_high_score: high_sum as f64 / total_players as f64,
            max_high_score,
            total_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(board: &Leaderboard) -> Vec<&str> {
        board.sorted().into_iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn first_round_initializes_both_fields() {
        let mut board = Leaderboard::new();
        board.record("alice", 7);
        assert_eq!(
            board.user_stats("alice"),
            Some(UserScores {
                high_score: 7,
                cumulative_score: 7
            })
        );
        assert_eq!(board.rank("alice"), 1);
    }

    #[test]
    fn later_rounds_keep_max_and_add_sum() {
        let mut board = Leaderboard::new();
        board.record("alice", 7);
        board.record("alice", 3);
        board.record("alice", 9);
        let stats = board.user_stats("alice").unwrap();
        assert_eq!(stats.high_score, 9);
        assert_eq!(stats.cumulative_score, 19);
    }

    #[test]
    fn blank_names_collapse_to_anonymous() {
        let mut board = Leaderboard::new();
        board.record("", 5);
        board.record("   ", 2);
        assert_eq!(board.len(), 1);
        assert_eq!(board.user_stats(ANONYMOUS).unwrap().cumulative_score, 7);
        assert_eq!(board.user_stats("").unwrap().high_score, 5);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut board = Leaderboard::new();
        board.record("carol", 4);
        board.record("alice", 8);
        board.record("bob", 4);
        board.record("dave", 8);

        assert_eq!(names(&board), vec!["alice", "dave", "carol", "bob"]);
        assert_eq!(names(&board), names(&board));
    }

    #[test]
    fn rank_counts_strictly_greater_scores_plus_tie_order() {
        let mut board = Leaderboard::new();
        board.record("a", 3);
        board.record("b", 9);
        board.record("c", 3);

        assert_eq!(board.rank("b"), 1);
        assert_eq!(board.rank("a"), 2);
        assert_eq!(board.rank("c"), 3);
        assert_eq!(board.rank("missing"), 4);
    }

    #[test]
    fn stats_on_empty_board_are_zero() {
        let stats = Leaderboard::new().stats();
        assert_eq!(stats, LeaderboardStats::default());
        assert_eq!(stats.avg_high_score, 0.0);
    }

    #[test]
    fn stats_aggregate_all_users() {
        let mut board = Leaderboard::new();
        board.record("alice", 7);
        board.record("alice", 3);
        board.record("bob", 4);

        let stats = board.stats();
        assert_eq!(stats.total_players, 2);
        assert_eq!(stats.total_points, 14);
        assert_eq!(stats.total_games, stats.total_points);
        assert_eq!(stats.max_high_score, 7);
        assert!((stats.avg_high_score - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn serde_preserves_document_order() {
        let json = r#"{
            "zed": {"high_score": 5, "cumulative_score": 5},
            "amy": {"high_score": 5, "cumulative_score": 12}
        }"#;
        let board: Leaderboard = serde_json::from_str(json).unwrap();
        assert_eq!(names(&board), vec!["zed", "amy"]);

        let out = serde_json::to_string(&board).unwrap();
        assert_eq!(
            out,
            r#"{"zed":{"high_score":5,"cumulative_score":5},"amy":{"high_score":5,"cumulative_score":12}}"#
        );
    }

    #[test]
    fn loading_keeps_blank_and_anonymous_keys_apart() {
        let json = r#"{
            "Anonymous": {"high_score": 5, "cumulative_score": 20},
            "  ": {"high_score": 3, "cumulative_score": 3}
        }"#;
        let board: Leaderboard = serde_json::from_str(json).unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!(
            board.user_stats(ANONYMOUS),
            Some(UserScores {
                high_score: 5,
                cumulative_score: 20
            })
        );
        assert_eq!(board.stats().total_points, 23);

        let out: serde_json::Value = serde_json::to_value(&board).unwrap();
        assert_eq!(out["  "]["cumulative_score"], 3);
        assert_eq!(out["Anonymous"]["cumulative_score"], 20);
    }

    #[test]
    fn deserializing_non_map_fails() {
        assert!(serde_json::from_str::<Leaderboard>("[1, 2, 3]").is_err());
    }
}
