//! Identifier generation for slides, elements and animations.
//!
//! DESIGN
//! ======
//! Ids are plain `u64` values wrapped in [`EntityId`]. One generator is owned
//! by each open presentation; every value it issues is strictly greater than
//! the previous one, so ids double as a creation-order signal. Ids are never
//! reused after deletion.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier of a slide, element or animation within one presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(EntityId)
    }
}

/// Monotonic id source for one presentation.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Create a generator whose first id is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Create a generator whose first id is strictly greater than `max`.
    ///
    /// Used when reopening a saved document so freshly created entities
    /// never collide with persisted ones.
    #[must_use]
    pub fn starting_after(max: EntityId) -> Self {
        Self { last: max.0 }
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> EntityId {
        self.last = self.last.saturating_add(1);
        EntityId(self.last)
    }

    /// The most recently issued id, if any.
    #[must_use]
    pub fn last_issued(&self) -> Option<EntityId> {
        (self.last > 0).then_some(EntityId(self.last))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
