// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A platform username identifying whose profile is shown and edited.
///
/// Usernames appear in URLs and service paths, so this only enforces that the
/// value is a non-empty token without whitespace or `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.contains('/') || value.contains(char::is_whitespace) {
            return Err(IdError::InvalidChar);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.into_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    InvalidChar,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("user id must not be empty"),
            Self::InvalidChar => f.write_str("user id must not contain '/' or whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

#[cfg(test)]
mod tests {
    use super::{IdError, UserId};

    #[test]
    fn user_id_rejects_empty() {
        assert_eq!(UserId::new(""), Err(IdError::Empty));
    }

    #[test]
    fn user_id_rejects_slash_and_whitespace() {
        assert_eq!(UserId::new("a/b"), Err(IdError::InvalidChar));
        assert_eq!(UserId::new("a b"), Err(IdError::InvalidChar));
    }

    #[test]
    fn user_id_round_trips() {
        let id = UserId::new("olena.k").expect("user id");
        assert_eq!(id.as_str(), "olena.k");
        assert_eq!(id.to_string(), "olena.k");
    }
}
