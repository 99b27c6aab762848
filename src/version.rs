use crate::error::{BumptagError, Result};
use std::fmt;

/// A dotted numeric version identifier (e.g. "1.2.3").
///
/// Unlike strict semver this accepts any number of components, as long as
/// there is at least one and every component is a non-negative integer.
/// Only the final component is eligible for automatic increment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionToken {
    components: Vec<u64>,
}

impl VersionToken {
    /// Parse a version token from a dotted string.
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(VersionToken::parse("1.2.3").unwrap().to_string(), "1.2.3");
    /// assert!(VersionToken::parse("1..3").is_err());
    /// assert!(VersionToken::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(BumptagError::version("empty version string"));
        }

        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    BumptagError::version(format!(
                        "Invalid version component '{}' in '{}'",
                        part, s
                    ))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(VersionToken { components })
    }

    /// Increment the final component by one, leaving all others unchanged.
    ///
    /// There is deliberately no carry: bumping "1.9" yields "1.10",
    /// never "2.0".
    pub fn bump_patch(&self) -> Self {
        let mut components = self.components.clone();
        // parse() guarantees at least one component
        *components.last_mut().unwrap() += 1;
        VersionToken { components }
    }

    /// Number of dotted components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

impl std::str::FromStr for VersionToken {
    type Err = BumptagError;

    fn from_str(s: &str) -> Result<Self> {
        VersionToken::parse(s)
    }
}
