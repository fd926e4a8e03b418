#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `door` recovers door passwords from MD5 digests. Each candidate is the
//! door ID followed by a decimal index; an index is a *hit* when the hex
//! rendering of its digest starts with a run of `'0'` characters (five by
//! default). Hits feed one of two assembly rules:
//!
//! - **sequential**: the character after the zero run is appended, hit by
//!   hit, until the password is full;
//! - **positional**: the character after the zero run names a slot, the next
//!   character fills it; out-of-range and already filled slots are skipped.
//!
//! # Design
//!
//! [`HitScanner`] hashes indices in chunks on the rayon pool and yields hits
//! in index order, so results never depend on thread scheduling. Assembly is
//! behind the [`Assembler`] trait; [`solve`] drives both rules from a single
//! scan.
//!
//! # Errors
//!
//! Configuration problems and exhaustion of the `u64` index space surface as
//! [`SearchError`].
//!
//! # Examples
//!
//! ```
//! use door::{SearchConfig, sequential_password};
//!
//! // Two leading zeros keep the example fast.
//! let config = SearchConfig::new("abc").with_leading_zeros(2).with_password_len(4);
//! let password = sequential_password(&config).unwrap();
//! assert_eq!(password.len(), 4);
//! ```

mod config;
mod error;
mod password;
mod search;

pub use config::{
    CHUNK_SIZE_ENV, DEFAULT_CHUNK_SIZE, DEFAULT_DOOR_ID, DEFAULT_LEADING_ZEROS,
    DEFAULT_PASSWORD_LEN, DOOR_ID_ENV, LEADING_ZEROS_ENV, MAX_LEADING_ZEROS, MAX_PASSWORD_LEN,
    PASSWORD_LEN_ENV, SearchConfig,
};
pub use error::SearchError;
pub use password::{
    Assembler, Passwords, PositionalAssembler, SequentialAssembler, fill, positional_password,
    sequential_password, solve,
};
pub use search::{Hit, HitScanner};
