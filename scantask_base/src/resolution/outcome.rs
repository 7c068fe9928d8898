//! Non-fatal per-node outcome, consumed one level up.
//!
//! Fatal failures travel separately as `Err(ResolutionError)`.

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Node resolved
    Accepted(T),
    /// Node dropped under the ignore policy
    Skip,
    /// Abandon the current stream and try the next one
    NextAlternative,
}

impl<T> Outcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_next_alternative(&self) -> bool {
        matches!(self, Self::NextAlternative)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Accepted(value) => Outcome::Accepted(f(value)),
            Self::Skip => Outcome::Skip,
            Self::NextAlternative => Outcome::NextAlternative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_signal() {
        assert_eq!(Outcome::Accepted(2).map(|v| v * 2), Outcome::Accepted(4));
        assert_eq!(Outcome::<i32>::Skip.map(|v| v * 2), Outcome::Skip);
        assert!(Outcome::<i32>::NextAlternative
            .map(|v| v * 2)
            .is_next_alternative());
    }
}
