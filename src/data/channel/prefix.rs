use super::Name;

/// The separator between the prefix and the channel name in the
/// transport-scoped form.
pub const PREFIX_SEPARATOR: char = ':';

/// An optional namespace applied to every channel name that reaches the
/// transport.
///
/// A prefix lets several logical multiplexers share one transport without
/// their channels colliding: with the prefix `app`, the logical channel
/// `chat` becomes `app:chat` on the wire. The transformation is applied on
/// the way in and stripped on the way out, so callers only ever see logical
/// names.
///
/// The default prefix is empty and leaves channel names untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefix(Option<String>);

impl Prefix {
    /// Create a new [`Prefix`].
    ///
    /// An empty string is equivalent to no prefix at all.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            Self(None)
        } else {
            Self(Some(prefix))
        }
    }

    /// Map a logical channel name to its transport-scoped form.
    #[must_use]
    pub fn apply(&self, name: &Name) -> Name {
        match &self.0 {
            Some(prefix) => Name::from_string_unchecked(format!(
                "{}{}{}",
                prefix, PREFIX_SEPARATOR, name
            )),
            None => name.clone(),
        }
    }

    /// Map a transport-scoped channel name back to its logical form.
    ///
    /// Names that do not carry the prefix are returned unchanged.
    #[must_use]
    pub fn strip(&self, name: &Name) -> Name {
        let prefix = match &self.0 {
            Some(prefix) => prefix,
            None => return name.clone(),
        };

        let stripped = name
            .as_ref()
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_prefix(PREFIX_SEPARATOR));
        match stripped {
            // An exact prefix match with nothing after it would leave an
            // empty (invalid) name; treat it as not ours.
            Some(rest) if !rest.is_empty() => Name::from_string_unchecked(rest.to_owned()),
            _ => name.clone(),
        }
    }
}

impl From<&str> for Prefix {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}
