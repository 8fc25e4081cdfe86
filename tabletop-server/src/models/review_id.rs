//! Review identifier parsed from a path segment

use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Review primary key (`SERIAL`, so an `i32`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId(i32);

impl ReviewId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl FromStr for ReviewId {
    type Err = ValidationError;

    /// Anything that is not a base-10 integer in `i32` range is malformed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(Self)
            .map_err(|_| ValidationError::Malformed {
                field: "review_id",
                reason: "must be an integer",
            })
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers() {
        assert_eq!("2".parse::<ReviewId>().unwrap().get(), 2);
        assert_eq!("2000".parse::<ReviewId>().unwrap().get(), 2000);
    }

    #[test]
    fn rejects_text() {
        for raw in ["TestString1", "noReviewHere", "no1 Review2 Here3", "1.5", ""] {
            let err = raw.parse::<ReviewId>().unwrap_err();
            assert!(matches!(err, ValidationError::Malformed { .. }), "{raw}");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!("99999999999".parse::<ReviewId>().is_err());
    }
}
