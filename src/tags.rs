// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

/// Tag whose first comma-separated token is the exposed schema name of a field.
pub const SERIALIZE_TAG: &str = "json";

/// Tag listing the exclusion tokens of a field.
pub const EXCLUDE_TAG: &str = "gqlexclude";

/// Declarative metadata attached to a record field.
///
/// Tags are an ordered list of `(key, value)` pairs, looked up the same way a
/// struct tag is: the first pair with a matching key wins and an absent key reads
/// as the empty string.
///
/// ```rust,ignore
/// const TAGS: Tags = Tags::new(&[("json", "name,omitempty"), ("gqlexclude", "internal")]);
/// assert_eq!(TAGS.first(SERIALIZE_TAG), "name");
/// assert!(TAGS.contains(EXCLUDE_TAG, "internal"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Tags {
    pairs: &'static [(&'static str, &'static str)],
}

impl Tags {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Tags { pairs }
    }

    pub const fn empty() -> Self {
        Tags { pairs: &[] }
    }

    /// Raw value of the tag `key`, or `""` if the tag is absent.
    pub fn get(&self, key: &str) -> &'static str {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }

    /// First comma-separated token of the tag `key`, trimmed of spaces.
    pub fn first(&self, key: &str) -> &'static str {
        let value = self.get(key);
        value.split(',').next().unwrap_or_default().trim_matches(' ')
    }

    /// Whether the tag `key` lists `token` among its comma-separated values.
    /// Tokens are trimmed of spaces and compared exactly.
    pub fn contains(&self, key: &str, token: &str) -> bool {
        let value = self.get(key);
        if value.is_empty() {
            return false;
        }
        value.split(',').any(|t| t.trim_matches(' ') == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, &'static str)> {
        self.pairs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Debug for Tags {
    // Rendered like a struct tag: json:"a" gqlexclude:"x"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in self.pairs {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{k}:{v:?}")?;
            first = false;
        }
        Ok(())
    }
}
