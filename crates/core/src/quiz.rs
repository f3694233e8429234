use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no question is awaiting an answer")]
    NoPendingQuestion,

    #[error("round already finished")]
    Finished,
}

/// Where a round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingQuestion,
    AwaitingAnswer,
    Finished,
}

/// Progression engine for one round of true/false questions.
///
/// Play order is the order of `questions`. `score <= question_number <= len`
/// holds at every step and each question can be answered at most once.
#[derive(Debug, Clone)]
pub struct QuizBrain {
    questions: Vec<Question>,
    question_number: usize,
    score: u32,
    current: Option<usize>,
}

impl QuizBrain {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            question_number: 0,
            score: 0,
            current: None,
        }
    }

    /// True until the cursor reaches the end of the question list.
    #[must_use]
    pub fn still_has_questions(&self) -> bool {
        self.question_number < self.questions.len()
    }

    /// Present the next question and advance the cursor.
    ///
    /// Returns `None` once every question has been presented. An unanswered
    /// pending question is dropped, not re-offered.
    pub fn next_question(&mut self) -> Option<&Question> {
        if !self.still_has_questions() {
            self.current = None;
            return None;
        }
        let idx = self.question_number;
        self.current = Some(idx);
        self.question_number += 1;
        self.questions.get(idx)
    }

    /// Compare `user_answer` with the pending question's answer, exactly and
    /// case-sensitively, and score it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoPendingQuestion` when no question is awaiting an
    /// answer, or `QuizError::Finished` once the round is over. The score is
    /// left untouched in both cases.
    pub fn check_answer(&mut self, user_answer: &str) -> Result<bool, QuizError> {
        let Some(idx) = self.current.take() else {
            return Err(match self.state() {
                QuizState::Finished => QuizError::Finished,
                _ => QuizError::NoPendingQuestion,
            });
        };
        let correct = self
            .questions
            .get(idx)
            .is_some_and(|q| q.correct_answer() == user_answer);
        if correct {
            self.score += 1;
        }
        Ok(correct)
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        if self.current.is_some() {
            QuizState::AwaitingAnswer
        } else if self.still_has_questions() {
            QuizState::AwaitingQuestion
        } else {
            QuizState::Finished
        }
    }

    /// The question awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|idx| self.questions.get(idx))
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of questions presented so far.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.question_number
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}
