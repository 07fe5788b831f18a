//! Pledge identifiers
//!
//! Pledges carry human-readable ids of the form `PLG-{year}-{sequence}`,
//! allocated sequentially within a calendar year. The counter layer that
//! persists the allocator state belongs to the storage layer; the types here
//! only format, parse, and hand out the next id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PledgeError;

/// Human-readable pledge identifier, e.g. `PLG-2026-0042`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PledgeId(String);

impl PledgeId {
    /// Build an id from its parts
    pub fn new(year: i32, sequence: u32) -> Self {
        PledgeId(format!("PLG-{}-{:04}", year, sequence))
    }

    /// The underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Issue year encoded in the id
    pub fn year(&self) -> i32 {
        // Format is validated at construction, parse cannot fail
        self.0
            .split('-')
            .nth(1)
            .and_then(|y| y.parse().ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for PledgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PledgeId {
    type Err = PledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let prefix = parts.next();
        let year = parts.next().and_then(|y| y.parse::<i32>().ok());
        let seq = parts.next().and_then(|q| q.parse::<u32>().ok());

        match (prefix, year, seq, parts.next()) {
            (Some("PLG"), Some(year), Some(seq), None) => Ok(PledgeId::new(year, seq)),
            _ => Err(PledgeError::InvalidId(s.to_string())),
        }
    }
}

/// Hands out sequential pledge ids, resetting the sequence each year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PledgeIdAllocator {
    year: i32,
    next_seq: u32,
}

impl PledgeIdAllocator {
    /// Start a fresh allocator for the given year
    pub fn new(year: i32) -> Self {
        Self { year, next_seq: 1 }
    }

    /// Resume from persisted state
    pub fn resume(year: i32, next_seq: u32) -> Self {
        Self { year, next_seq }
    }

    /// Allocate the next id for the given issue year
    ///
    /// The sequence restarts at 1 when the year rolls over.
    pub fn allocate(&mut self, year: i32) -> PledgeId {
        if year != self.year {
            self.year = year;
            self.next_seq = 1;
        }
        let id = PledgeId::new(self.year, self.next_seq);
        self.next_seq += 1;
        id
    }
}
