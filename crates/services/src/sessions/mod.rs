mod plan;
mod progress;
mod service;
mod summary;

// Public API of the session subsystem.
pub use crate::error::{RoundError, SessionError};
pub use plan::{DEFAULT_ROUND_SIZE, RoundBuilder};
pub use progress::RoundProgress;
pub use service::{AnswerFeedback, QuizSession, Stage};
pub use summary::{PerformanceTier, RoundSummary};
