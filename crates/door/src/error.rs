//! Error type shared by configuration loading and the password search.

use thiserror::Error;

use crate::config::{MAX_LEADING_ZEROS, MAX_PASSWORD_LEN};

/// Errors produced while configuring or running a door password search.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SearchError {
    /// The door ID is empty.
    #[error("door id must not be empty")]
    EmptyDoorId,
    /// The required run of zero nibbles is outside the supported range.
    #[error(
        "leading zero count {value} is outside the supported range 1-{max}",
        max = MAX_LEADING_ZEROS
    )]
    LeadingZeros {
        /// Rejected value.
        value: usize,
    },
    /// The password length is outside the supported range.
    #[error(
        "password length {value} is outside the supported range 1-{max}",
        max = MAX_PASSWORD_LEN
    )]
    PasswordLength {
        /// Rejected value.
        value: usize,
    },
    /// Scanning chunks must contain at least one index.
    #[error("chunk size must be greater than zero")]
    ChunkSize,
    /// The counter reached `u64::MAX` before the password was complete.
    #[error("index space exhausted after finding {found} of {wanted} password characters")]
    IndexExhausted {
        /// Characters filled when the search gave up.
        found: usize,
        /// Characters required.
        wanted: usize,
    },
    /// An environment variable was present but unusable.
    #[error("environment variable {variable} is invalid: {reason}")]
    Environment {
        /// Variable name.
        variable: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
