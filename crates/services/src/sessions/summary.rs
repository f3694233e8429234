use trivia_core::QuizBrain;
use trivia_core::model::{UserScores, normalize_username};

use crate::leaderboard_service::LeaderboardStore;

/// How well a round went, by share of correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Perfect,
    Excellent,
    Good,
    KeepLearning,
}

impl PerformanceTier {
    /// `None` for a round with no questions.
    #[must_use]
    pub fn for_score(score: u32, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let score = u64::from(score);
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        let tier = if score >= total {
            Self::Perfect
        } else if score * 10 >= total * 8 {
            Self::Excellent
        } else if score * 10 >= total * 6 {
            Self::Good
        } else {
            Self::KeepLearning
        };
        Some(tier)
    }
}

/// End-of-round results, read back from the leaderboard after recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub username: String,
    pub score: u32,
    pub total_questions: usize,
    pub accuracy_percent: f64,
    pub rank: usize,
    pub tier: Option<PerformanceTier>,
    pub user_stats: Option<UserScores>,
}

impl RoundSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(username: &str, quiz: &QuizBrain, store: &LeaderboardStore) -> Self {
        let score = quiz.score();
        let total_questions = quiz.question_number();
        let accuracy_percent = if total_questions > 0 {
            f64::from(score) / total_questions as f64 * 100.0
        } else {
            0.0
        };
        let username = normalize_username(username);

        Self {
            username: username.to_string(),
            score,
            total_questions,
            accuracy_percent,
            rank: store.user_rank(username),
            tier: PerformanceTier::for_score(score, total_questions),
            user_stats: store.user_stats(username),
        }
    }
}
