//! Per-session job generation counter.

use std::fmt;

/// Monotonic counter distinguishing successive solving attempts for one session.
///
/// Generation `0` is reserved for the bootstrap snapshot; jobs start at `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(u64);

impl Generation {
    /// Generation stamped on the imported, unsolved snapshot.
    pub const BOOTSTRAP: Generation = Generation(0);

    pub fn new(value: u64) -> Self {
        Generation(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The generation issued right after this one.
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_strictly_greater() {
        let g = Generation::BOOTSTRAP;
        assert!(g.next() > g);
        assert_eq!(g.next().get(), 1);
        assert_eq!(Generation::new(7).to_string(), "g7");
    }
}
