use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// A channel name.
///
/// This type represents an exact channel name, either in its logical form
/// (the way callers refer to it) or in its transport-scoped form (with the
/// process [`Prefix`] applied).
///
/// The only validity requirement is that the name is non-empty; any other
/// restrictions belong to the transport and are not enforced here.
///
/// [`Prefix`]: super::Prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

/// The error returned when parsing an empty channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel names must not be empty")]
pub struct EmptyNameError;

impl Name {
    fn is_valid(s: &str) -> bool {
        !s.is_empty()
    }

    /// Create a new [`Name`] skipping the validity check.
    #[must_use]
    pub fn from_string_unchecked(s: String) -> Self {
        Self(s)
    }
}

impl TryFrom<String> for Name {
    type Error = EmptyNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !Self::is_valid(&value) {
            return Err(EmptyNameError);
        }
        Ok(Self(value))
    }
}

impl FromStr for Name {
    type Err = EmptyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(EmptyNameError);
        }
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::Name;

    fn is_valid(s: &str) -> bool {
        Name::is_valid(s)
    }

    #[test]
    fn valid() {
        assert_eq!(is_valid("qwe"), true);
        assert_eq!(is_valid("123"), true);
        assert_eq!(is_valid("chat:lobby"), true);
        assert_eq!(is_valid("with spaces"), true);
    }

    #[test]
    fn invalid() {
        assert_eq!(is_valid(""), false);
    }

    #[test]
    fn parse_round_trip() {
        let name: Name = "chat".parse().unwrap();
        assert_eq!(String::from(name), "chat");
    }

    #[test]
    fn parse_empty_fails() {
        assert!("".parse::<Name>().is_err());
    }
}
