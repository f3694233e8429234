mod leaderboard;
mod question;
mod username;

pub use leaderboard::{
    ANONYMOUS, Leaderboard, LeaderboardStats, UserScores, normalize_username,
};
pub use question::{Answer, DEFAULT_EXPLANATION, Question, QuestionRecord};
pub use username::{Username, UsernameError, UsernameHolder};
