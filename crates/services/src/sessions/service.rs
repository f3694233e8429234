use rand::Rng;
use std::fmt;

use trivia_core::model::{Answer, Question, QuestionRecord, UsernameHolder};
use trivia_core::{QuizBrain, QuizState};

use super::plan::RoundBuilder;
use super::progress::RoundProgress;
use super::summary::RoundSummary;
use crate::error::SessionError;
use crate::leaderboard_service::LeaderboardStore;

/// Screen the player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Username,
    Quiz,
    End,
}

/// What the player sees after answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub explanation: String,
}

/// One player's journey from username entry through any number of rounds.
///
/// Owns the round's `QuizBrain` exclusively. The leaderboard is passed in
/// when a round is finished so several sessions can share one store.
pub struct QuizSession {
    username: UsernameHolder,
    builder: RoundBuilder,
    quiz: Option<QuizBrain>,
    stage: Stage,
    recorded: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(builder: RoundBuilder) -> Self {
        Self {
            username: UsernameHolder::new(),
            builder,
            quiz: None,
            stage: Stage::Username,
            recorded: false,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns `false` when `raw` is blank; the previous name, if any, is kept.
    pub fn set_username(&mut self, raw: &str) -> bool {
        self.username.set_username(raw)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.username.username()
    }

    #[must_use]
    pub fn progress(&self) -> Option<RoundProgress> {
        self.quiz.as_ref().map(RoundProgress::from_quiz)
    }

    /// Start a fresh round. Also used for "play again".
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoUsername` before a username is set, or
    /// `SessionError::Round` if no round can be built from `records`.
    pub fn start_round(&mut self, records: &[QuestionRecord]) -> Result<(), SessionError> {
        self.start_round_with_rng(records, &mut rand::rng())
    }

    /// Same as [`Self::start_round`] with caller-controlled randomness.
    ///
    /// # Errors
    ///
    /// See [`Self::start_round`].
    pub fn start_round_with_rng<R: Rng + ?Sized>(
        &mut self,
        records: &[QuestionRecord],
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if !self.username.is_set() {
            return Err(SessionError::NoUsername);
        }
        let quiz = self.builder.build_with_rng(records, rng)?;
        self.quiz = Some(quiz);
        self.stage = Stage::Quiz;
        self.recorded = false;
        Ok(())
    }

    /// Present the next question, or move to the end stage when none remain.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoRound` if no round has been started.
    pub fn next_question(&mut self) -> Result<Option<&Question>, SessionError> {
        let quiz = self.quiz.as_mut().ok_or(SessionError::NoRound)?;
        if !quiz.still_has_questions() {
            self.stage = Stage::End;
            return Ok(None);
        }
        Ok(quiz.next_question())
    }

    /// Score `answer` against the pending question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoRound` without a round, or
    /// `SessionError::Quiz` if no question is awaiting an answer.
    pub fn answer(&mut self, answer: Answer) -> Result<AnswerFeedback, SessionError> {
        let quiz = self.quiz.as_mut().ok_or(SessionError::NoRound)?;
        let explanation = quiz
            .current_question()
            .map(|q| q.explanation().to_string())
            .unwrap_or_default();
        let correct = quiz.check_answer(answer.as_str())?;
        Ok(AnswerFeedback {
            correct,
            explanation,
        })
    }

    /// Record the finished round on the leaderboard and summarize it.
    ///
    /// The score is recorded once per round; calling again only re-reads the
    /// leaderboard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoRound` without a round, or
    /// `SessionError::RoundInProgress` while questions remain.
    pub fn finish(&mut self, store: &mut LeaderboardStore) -> Result<RoundSummary, SessionError> {
        let quiz = self.quiz.as_ref().ok_or(SessionError::NoRound)?;
        if quiz.state() != QuizState::Finished {
            return Err(SessionError::RoundInProgress);
        }
        if !self.recorded {
            store.update_score(self.username.username(), quiz.score());
            self.recorded = true;
        }
        self.stage = Stage::End;
        Ok(RoundSummary::new(self.username.username(), quiz, store))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("username", &self.username.username())
            .field("stage", &self.stage)
            .field("score", &self.quiz.as_ref().map(QuizBrain::score))
            .field("recorded", &self.recorded)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoundError;
    use std::sync::Arc;
    use storage::InMemoryRepository;
    use trivia_core::QuizError;

    fn records() -> Vec<QuestionRecord> {
        vec![
            QuestionRecord::new("One", "True").with_explanation("first"),
            QuestionRecord::new("Two", "False"),
            QuestionRecord::new("Three", "True"),
        ]
    }

    fn session() -> QuizSession {
        QuizSession::new(RoundBuilder::new().with_shuffle(false))
    }

    fn store() -> LeaderboardStore {
        LeaderboardStore::open(Arc::new(InMemoryRepository::new()))
    }

    #[test]
    fn starting_without_username_is_rejected() {
        let mut session = session();
        let err = session.start_round(&records()).unwrap_err();
        assert!(matches!(err, SessionError::NoUsername));
        assert_eq!(session.stage(), Stage::Username);
    }

    #[test]
    fn blank_username_is_rejected() {
        let mut session = session();
        assert!(!session.set_username("   "));
        assert!(session.set_username("  alice "));
        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn full_round_records_score_once() {
        let mut session = session();
        let mut store = store();
        session.set_username("alice");
        session.start_round(&records()).unwrap();
        assert_eq!(session.stage(), Stage::Quiz);

        let mut feedback = Vec::new();
        for answer in [Answer::True, Answer::True, Answer::True] {
            assert!(session.next_question().unwrap().is_some());
            feedback.push(session.answer(answer).unwrap());
        }
        assert!(session.next_question().unwrap().is_none());
        assert_eq!(session.stage(), Stage::End);

        assert!(feedback[0].correct);
        assert_eq!(feedback[0].explanation, "first");
        assert!(!feedback[1].correct);
        assert!(feedback[2].correct);

        let summary = session.finish(&mut store).unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.rank, 1);

        session.finish(&mut store).unwrap();
        assert_eq!(store.user_stats("alice").unwrap().cumulative_score, 2);
    }

    #[test]
    fn play_again_records_a_second_round() {
        let mut session = session();
        let mut store = store();
        session.set_username("bob");

        for _ in 0..2 {
            session.start_round(&records()).unwrap();
            while session.next_question().unwrap().is_some() {
                session.answer(Answer::True).unwrap();
            }
            session.finish(&mut store).unwrap();
        }

        let stats = store.user_stats("bob").unwrap();
        assert_eq!(stats.high_score, 2);
        assert_eq!(stats.cumulative_score, 4);
    }

    #[test]
    fn finishing_mid_round_is_rejected() {
        let mut session = session();
        let mut store = store();
        session.set_username("carol");
        session.start_round(&records()).unwrap();
        session.next_question().unwrap();

        let err = session.finish(&mut store).unwrap_err();
        assert!(matches!(err, SessionError::RoundInProgress));
        assert!(store.sorted_scores().is_empty());
    }

    #[test]
    fn answering_before_a_question_fails() {
        let mut session = session();
        session.set_username("dan");
        session.start_round(&records()).unwrap();

        let err = session.answer(Answer::False).unwrap_err();
        assert!(matches!(err, SessionError::Quiz(QuizError::NoPendingQuestion)));
        assert_eq!(session.progress().unwrap().score, 0);
    }

    #[test]
    fn calls_without_a_round_fail() {
        let mut session = session();
        assert!(matches!(session.next_question(), Err(SessionError::NoRound)));
        assert!(matches!(
            session.answer(Answer::True),
            Err(SessionError::NoRound)
        ));
    }

    #[test]
    fn empty_bank_surfaces_round_error() {
        let mut session = session();
        session.set_username("erin");
        let err = session.start_round(&[]).unwrap_err();
        assert!(matches!(err, SessionError::Round(RoundError::EmptyBank)));
    }

    #[test]
    fn progress_tracks_presented_questions() {
        let mut session = session();
        session.set_username("finn");
        session.start_round(&records()).unwrap();
        session.next_question().unwrap();
        session.answer(Answer::True).unwrap();

        let progress = session.progress().unwrap();
        assert_eq!(progress.presented, 1);
        assert_eq!(progress.remaining, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.score, 1);
    }
}
