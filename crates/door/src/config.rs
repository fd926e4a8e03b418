//! Search configuration and environment overrides.

use std::env::{self, VarError};
use std::str::FromStr;

use md5_digest::HEX_LEN;

use crate::SearchError;

/// Door ID searched when nothing else is configured.
pub const DEFAULT_DOOR_ID: &str = "wtnhxymk";

/// Zero nibbles a digest must start with to count as a hit.
pub const DEFAULT_LEADING_ZEROS: usize = 5;

/// Characters in each password.
pub const DEFAULT_PASSWORD_LEN: usize = 8;

/// Indices hashed per scanning round.
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;

/// Largest zero run that still leaves a slot nibble and a payload nibble.
pub const MAX_LEADING_ZEROS: usize = HEX_LEN - 2;

/// Largest password the positional search can address with one hex slot.
pub const MAX_PASSWORD_LEN: usize = 16;

/// Overrides [`SearchConfig::door_id`].
pub const DOOR_ID_ENV: &str = "DOOR_ID";
/// Overrides [`SearchConfig::leading_zeros`].
pub const LEADING_ZEROS_ENV: &str = "DOOR_LEADING_ZEROS";
/// Overrides [`SearchConfig::password_len`].
pub const PASSWORD_LEN_ENV: &str = "DOOR_PASSWORD_LEN";
/// Overrides [`SearchConfig::chunk_size`].
pub const CHUNK_SIZE_ENV: &str = "DOOR_CHUNK_SIZE";

/// Parameters of a door password search.
///
/// Candidates are the ASCII door ID followed by the decimal index, starting
/// at [`start_index`](Self::start_index).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// Prefix hashed in front of every index.
    pub door_id: String,
    /// Zero nibbles that mark a hit.
    pub leading_zeros: usize,
    /// Characters in the password.
    pub password_len: usize,
    /// First index scanned.
    pub start_index: u64,
    /// Indices hashed per round; each round is split across the rayon pool.
    pub chunk_size: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            door_id: DEFAULT_DOOR_ID.to_owned(),
            leading_zeros: DEFAULT_LEADING_ZEROS,
            password_len: DEFAULT_PASSWORD_LEN,
            start_index: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SearchConfig {
    /// Default configuration for `door_id`.
    #[must_use]
    pub fn new(door_id: impl Into<String>) -> Self {
        Self {
            door_id: door_id.into(),
            ..Self::default()
        }
    }

    /// Sets the number of zero nibbles that mark a hit.
    #[must_use]
    pub const fn with_leading_zeros(mut self, leading_zeros: usize) -> Self {
        self.leading_zeros = leading_zeros;
        self
    }

    /// Sets the password length.
    #[must_use]
    pub const fn with_password_len(mut self, password_len: usize) -> Self {
        self.password_len = password_len;
        self
    }

    /// Sets the first index scanned.
    #[must_use]
    pub const fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = start_index;
        self
    }

    /// Sets the number of indices hashed per round.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Checks every field against its supported range.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.door_id.is_empty() {
            return Err(SearchError::EmptyDoorId);
        }
        if !(1..=MAX_LEADING_ZEROS).contains(&self.leading_zeros) {
            return Err(SearchError::LeadingZeros {
                value: self.leading_zeros,
            });
        }
        if !(1..=MAX_PASSWORD_LEN).contains(&self.password_len) {
            return Err(SearchError::PasswordLength {
                value: self.password_len,
            });
        }
        if self.chunk_size == 0 {
            return Err(SearchError::ChunkSize);
        }
        Ok(())
    }

    /// Loads the defaults overlaid with the `DOOR_*` environment variables.
    pub fn from_env() -> Result<Self, SearchError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Same as [`from_env`](Self::from_env) with an injected variable lookup.
    ///
    /// Unset and blank variables keep the default value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut config = Self::default();

        if let Some(door_id) = read_var(&lookup, DOOR_ID_ENV)? {
            config.door_id = door_id;
        }
        if let Some(value) = parse_var(&lookup, LEADING_ZEROS_ENV)? {
            config.leading_zeros = value;
        }
        if let Some(value) = parse_var(&lookup, PASSWORD_LEN_ENV)? {
            config.password_len = value;
        }
        if let Some(value) = parse_var(&lookup, CHUNK_SIZE_ENV)? {
            config.chunk_size = value;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_var<F>(lookup: &F, variable: &'static str) -> Result<Option<String>, SearchError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(variable) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_owned()))
            }
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(SearchError::Environment {
            variable,
            reason: "value must be valid UTF-8".to_owned(),
        }),
    }
}

fn parse_var<F, T>(lookup: &F, variable: &'static str) -> Result<Option<T>, SearchError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    read_var(lookup, variable)?
        .map(|value| {
            value.parse().map_err(|err: T::Err| SearchError::Environment {
                variable,
                reason: format!("{value:?}: {err}"),
            })
        })
        .transpose()
}
