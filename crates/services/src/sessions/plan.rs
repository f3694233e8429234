use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use trivia_core::QuizBrain;
use trivia_core::model::{Question, QuestionRecord};

use crate::error::RoundError;

/// Questions per round unless configured otherwise.
pub const DEFAULT_ROUND_SIZE: usize = 10;

/// Builds a round by sampling question records without replacement.
#[derive(Debug, Clone, Copy)]
pub struct RoundBuilder {
    round_size: usize,
    shuffle: bool,
}

impl Default for RoundBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            round_size: DEFAULT_ROUND_SIZE,
            shuffle: true,
        }
    }

    /// Cap the number of questions per round. Values below one are raised to one.
    #[must_use]
    pub fn with_round_size(mut self, round_size: usize) -> Self {
        self.round_size = round_size.max(1);
        self
    }

    /// Disable to take the first records in source order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn round_size(&self) -> usize {
        self.round_size
    }

    /// Build a round using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptyBank` if `records` is empty.
    pub fn build(self, records: &[QuestionRecord]) -> Result<QuizBrain, RoundError> {
        self.build_with_rng(records, &mut rand::rng())
    }

    /// Build a round, drawing randomness from `rng`.
    ///
    /// Picks up to `round_size` records without replacement, then shuffles
    /// the play order.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptyBank` if `records` is empty.
    pub fn build_with_rng<R: Rng + ?Sized>(
        self,
        records: &[QuestionRecord],
        rng: &mut R,
    ) -> Result<QuizBrain, RoundError> {
        if records.is_empty() {
            return Err(RoundError::EmptyBank);
        }
        let take = self.round_size.min(records.len());

        let questions: Vec<Question> = if self.shuffle {
            let mut picked: Vec<Question> = records
                .choose_multiple(rng, take)
                .cloned()
                .map(Question::from)
                .collect();
            picked.shuffle(rng);
            picked
        } else {
            records
                .iter()
                .take(take)
                .cloned()
                .map(Question::from)
                .collect()
        };

        debug!(
            "built round with {} of {} questions",
            questions.len(),
            records.len()
        );
        Ok(QuizBrain::new(questions))
    }
}
