#![forbid(unsafe_code)]

pub mod error;
pub mod leaderboard_service;
pub mod sessions;

pub use error::{RoundError, SessionError};
pub use leaderboard_service::LeaderboardStore;

pub use sessions::{
    AnswerFeedback, DEFAULT_ROUND_SIZE, PerformanceTier, QuizSession, RoundBuilder,
    RoundProgress, RoundSummary, Stage,
};
