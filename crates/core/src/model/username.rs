use thiserror::Error;

/// Validated player name (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a validated username.
    ///
    /// # Errors
    ///
    /// Returns `UsernameError::Empty` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, UsernameError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsernameError {
    #[error("username cannot be empty")]
    Empty,
}

/// Holds the current player's name between rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameHolder {
    current: Option<Username>,
}

impl UsernameHolder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` as the current username.
    ///
    /// Returns `false` and keeps the previous value when `raw` is blank.
    pub fn set_username(&mut self, raw: &str) -> bool {
        match Username::new(raw) {
            Ok(name) => {
                self.current = Some(name);
                true
            }
            Err(_) => false,
        }
    }

    /// The current username, or an empty string when none has been set.
    #[must_use]
    pub fn username(&self) -> &str {
        self.current.as_ref().map_or("", Username::as_str)
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }
}
