use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::{Leaderboard, QuestionRecord};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// Whole-board persistence for the leaderboard.
///
/// Adapters load and save the full map at once; there is no partial update.
pub trait LeaderboardRepository: Send + Sync {
    /// Load the persisted board. A store that has never been written loads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data cannot be read or decoded.
    fn load(&self) -> Result<Leaderboard, StorageError>;

    /// Overwrite the persisted board with `board`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the board cannot be written.
    fn save(&self, board: &Leaderboard) -> Result<(), StorageError>;
}

/// Supplier of raw question records for building rounds.
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be read or decoded.
    fn records(&self) -> Result<Vec<QuestionRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    board: Arc<Mutex<Leaderboard>>,
    fail_writes: bool,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing board.
    #[must_use]
    pub fn with_board(board: Leaderboard) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            fail_writes: false,
        }
    }

    /// A repository whose `save` always fails, for exercising error paths.
    #[must_use]
    pub fn failing_writes() -> Self {
        Self {
            board: Arc::default(),
            fail_writes: true,
        }
    }

    /// Snapshot of what has been saved so far.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Leaderboard, StorageError> {
        self.load()
    }
}

impl LeaderboardRepository for InMemoryRepository {
    fn load(&self) -> Result<Leaderboard, StorageError> {
        let guard = self
            .board
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, board: &Leaderboard) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io("writes disabled".into()));
        }
        let mut guard = self
            .board
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = board.clone();
        Ok(())
    }
}

/// Fixed list of question records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionBank {
    records: Vec<QuestionRecord>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }
}

impl QuestionSource for InMemoryQuestionBank {
    fn records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        Ok(self.records.clone())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub leaderboard: Arc<dyn LeaderboardRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let leaderboard: Arc<dyn LeaderboardRepository> = Arc::new(InMemoryRepository::new());
        Self { leaderboard }
    }
}
