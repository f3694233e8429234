use trivia_core::QuizBrain;

/// Aggregated view of round progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundProgress {
    pub presented: usize,
    pub total: usize,
    pub remaining: usize,
    pub score: u32,
}

impl RoundProgress {
    #[must_use]
    pub fn from_quiz(quiz: &QuizBrain) -> Self {
        Self {
            presented: quiz.question_number(),
            total: quiz.total_questions(),
            remaining: quiz.total_questions().saturating_sub(quiz.question_number()),
            score: quiz.score(),
        }
    }
}
