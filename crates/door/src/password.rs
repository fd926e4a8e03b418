//! Password assembly from scanner hits.
//!
//! Two rules exist. The sequential rule appends the first payload character
//! of each hit. The positional rule reads the first payload nibble as a slot
//! index and the second as the character, keeping only the first hit per
//! slot. [`solve`] feeds one scan to both rules.

use md5_digest::hex_char;
use tracing::{debug, info, instrument};

use crate::search::{Hit, HitScanner};
use crate::{SearchConfig, SearchError};

/// Incrementally builds a password from hits.
pub trait Assembler {
    /// Offers a hit; returns `true` when it contributed a character.
    fn offer(&mut self, hit: &Hit) -> bool;

    /// Number of characters filled so far.
    fn filled(&self) -> usize;

    /// Number of characters required.
    fn wanted(&self) -> usize;

    /// Reports whether every character is filled.
    fn is_complete(&self) -> bool {
        self.filled() == self.wanted()
    }

    /// The assembled password, if complete.
    fn password(&self) -> Option<String>;
}

/// Appends the first payload character of each hit.
#[derive(Clone, Debug, Default)]
pub struct SequentialAssembler {
    password: String,
    len: usize,
}

impl SequentialAssembler {
    /// Assembler for a password of `len` characters.
    pub fn new(len: usize) -> Self {
        Self {
            password: String::with_capacity(len),
            len,
        }
    }
}

impl Assembler for SequentialAssembler {
    fn offer(&mut self, hit: &Hit) -> bool {
        if self.is_complete() {
            return false;
        }
        let character = hex_char(hit.payload(0));
        self.password.push(character);
        debug!(index = hit.index, %character, "sequential character found");
        true
    }

    fn filled(&self) -> usize {
        self.password.len()
    }

    fn wanted(&self) -> usize {
        self.len
    }

    fn password(&self) -> Option<String> {
        self.is_complete().then(|| self.password.clone())
    }
}

/// Places the second payload character at the slot named by the first.
#[derive(Clone, Debug, Default)]
pub struct PositionalAssembler {
    slots: Vec<Option<char>>,
    filled: usize,
}

impl PositionalAssembler {
    /// Assembler for a password of `len` characters.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            filled: 0,
        }
    }
}

impl Assembler for PositionalAssembler {
    fn offer(&mut self, hit: &Hit) -> bool {
        let slot = usize::from(hit.payload(0));
        let Some(entry) = self.slots.get_mut(slot) else {
            debug!(index = hit.index, slot, "slot out of range");
            return false;
        };
        if entry.is_some() {
            debug!(index = hit.index, slot, "slot already filled");
            return false;
        }

        let character = hex_char(hit.payload(1));
        *entry = Some(character);
        self.filled += 1;
        debug!(index = hit.index, slot, %character, "positional character found");
        true
    }

    fn filled(&self) -> usize {
        self.filled
    }

    fn wanted(&self) -> usize {
        self.slots.len()
    }

    fn password(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }
}

/// Passwords produced by both rules.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Passwords {
    /// First-payload characters of the first hits, in order.
    pub sequential: String,
    /// Characters placed by slot.
    pub positional: String,
}

/// Runs the sequential rule.
#[instrument(skip(config), fields(door_id = %config.door_id))]
pub fn sequential_password(config: &SearchConfig) -> Result<String, SearchError> {
    let mut scanner = HitScanner::new(config)?;
    let mut assembler = SequentialAssembler::new(config.password_len);
    fill(&mut scanner, &mut assembler)
}

/// Runs the positional rule.
#[instrument(skip(config), fields(door_id = %config.door_id))]
pub fn positional_password(config: &SearchConfig) -> Result<String, SearchError> {
    let mut scanner = HitScanner::new(config)?;
    let mut assembler = PositionalAssembler::new(config.password_len);
    fill(&mut scanner, &mut assembler)
}

/// Runs both rules over a single scan.
#[instrument(skip(config), fields(door_id = %config.door_id))]
pub fn solve(config: &SearchConfig) -> Result<Passwords, SearchError> {
    let mut scanner = HitScanner::new(config)?;
    let mut sequential = SequentialAssembler::new(config.password_len);
    let mut positional = PositionalAssembler::new(config.password_len);

    while !(sequential.is_complete() && positional.is_complete()) {
        let Some(hit) = scanner.next() else {
            let incomplete: &dyn Assembler = if sequential.is_complete() {
                &positional
            } else {
                &sequential
            };
            return Err(exhausted(incomplete));
        };
        sequential.offer(&hit);
        positional.offer(&hit);
    }

    info!(scanned = scanner.scanned(), "both passwords complete");
    Ok(Passwords {
        sequential: complete(&sequential)?,
        positional: complete(&positional)?,
    })
}

/// Feeds hits into `assembler` until it completes or the scanner runs dry.
pub fn fill<A: Assembler>(
    scanner: &mut HitScanner,
    assembler: &mut A,
) -> Result<String, SearchError> {
    while !assembler.is_complete() {
        let hit = scanner.next().ok_or_else(|| exhausted(assembler))?;
        assembler.offer(&hit);
    }
    info!(scanned = scanner.scanned(), "password complete");
    complete(assembler)
}

fn complete<A: Assembler + ?Sized>(assembler: &A) -> Result<String, SearchError> {
    assembler.password().ok_or_else(|| exhausted(assembler))
}

fn exhausted<A: Assembler + ?Sized>(assembler: &A) -> SearchError {
    SearchError::IndexExhausted {
        found: assembler.filled(),
        wanted: assembler.wanted(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5_digest::Digest;

    /// Builds a hit whose hex rendering begins with `zeros` zeros then `payload`.
    fn hit(index: u64, zeros: usize, payload: &str) -> Hit {
        let mut hex = "0".repeat(zeros);
        hex.push_str(payload);
        while hex.len() < 32 {
            hex.push('f');
        }
        let mut digest: Digest = [0; 16];
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap();
        }
        Hit::for_test(index, digest, zeros)
    }

    #[test]
    fn sequential_appends_first_payload() {
        let mut assembler = SequentialAssembler::new(3);
        assert!(assembler.offer(&hit(1, 5, "1a")));
        assert!(assembler.offer(&hit(2, 5, "f0")));
        assert_eq!(assembler.password(), None);
        assert!(assembler.offer(&hit(3, 5, "c7")));
        assert!(!assembler.offer(&hit(4, 5, "d7")));
        assert_eq!(assembler.password().as_deref(), Some("1fc"));
    }

    #[test]
    fn positional_uses_slot_then_character() {
        let mut assembler = PositionalAssembler::new(3);
        assert!(assembler.offer(&hit(1, 5, "1c")));
        assert!(!assembler.offer(&hit(2, 5, "8f")), "slot 8 is out of range");
        assert!(!assembler.offer(&hit(3, 5, "1d")), "slot 1 already filled");
        assert!(assembler.offer(&hit(4, 5, "0e")));
        assert_eq!(assembler.filled(), 2);
        assert_eq!(assembler.password(), None);
        assert!(assembler.offer(&hit(5, 5, "25")));
        assert!(assembler.is_complete());
        assert_eq!(assembler.password().as_deref(), Some("ec5"));
    }

    #[test]
    fn positional_rejects_letter_slots() {
        let mut assembler = PositionalAssembler::new(8);
        assert!(!assembler.offer(&hit(1, 5, "a1")));
        assert_eq!(assembler.filled(), 0);
    }

    #[test]
    fn exhaustion_reports_progress() {
        let config = SearchConfig::new("abc")
            .with_leading_zeros(30)
            .with_start_index(u64::MAX - 3);

        assert_eq!(
            sequential_password(&config),
            Err(SearchError::IndexExhausted {
                found: 0,
                wanted: 8
            })
        );
        assert_eq!(
            solve(&config),
            Err(SearchError::IndexExhausted {
                found: 0,
                wanted: 8
            })
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_scanning() {
        let config = SearchConfig::new("abc").with_password_len(0);
        assert_eq!(
            positional_password(&config),
            Err(SearchError::PasswordLength { value: 0 })
        );
    }
}
