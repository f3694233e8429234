use std::fs;
use std::io::ErrorKind;

use log::debug;
use trivia_core::model::Leaderboard;

use crate::repository::{LeaderboardRepository, StorageError};

use super::{JsonFileRepository, to_pretty_json};

impl LeaderboardRepository for JsonFileRepository {
    fn load(&self) -> Result<Leaderboard, StorageError> {
        let contents = match fs::read_to_string(self.path()) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no leaderboard at {}, starting empty", self.path().display());
                return Ok(Leaderboard::new());
            }
            Err(err) => return Err(err.into()),
        };

        let board: Leaderboard = serde_json::from_str(&contents)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        debug!(
            "loaded {} leaderboard entries from {}",
            board.len(),
            self.path().display()
        );
        Ok(board)
    }

    fn save(&self, board: &Leaderboard) -> Result<(), StorageError> {
        if let Some(parent) = self.path().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = to_pretty_json(board)?;
        fs::write(self.path(), bytes)?;
        debug!(
            "saved {} leaderboard entries to {}",
            board.len(),
            self.path().display()
        );
        Ok(())
    }
}
