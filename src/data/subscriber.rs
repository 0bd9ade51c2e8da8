//! Subscriber identification.

use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// A caller-supplied subscriber identifier.
///
/// The multiplexer treats identifiers as opaque tokens; it only ever
/// compares them for equality. Keeping identifiers unique per channel is the
/// caller's responsibility: registering the same identifier twice on one
/// channel stores two independent entries, and an unsubscribe removes only
/// the earliest of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id(String);

/// The error returned when parsing an empty subscriber identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("subscriber identifiers must not be empty")]
pub struct EmptyIdError;

impl Id {
    fn is_valid(s: &str) -> bool {
        !s.is_empty()
    }
}

impl TryFrom<String> for Id {
    type Error = EmptyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !Self::is_valid(&value) {
            return Err(EmptyIdError);
        }
        Ok(Self(value))
    }
}

impl FromStr for Id {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(EmptyIdError);
        }
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::Id;

    #[test]
    fn parse_empty_fails() {
        assert!("".parse::<Id>().is_err());
    }

    #[test]
    fn parse_keeps_value() {
        let id: Id = "conn-42".parse().unwrap();
        assert_eq!(id.as_ref(), "conn-42");
    }
}
