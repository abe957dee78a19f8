//! Dataset identity.
//!
//! A [`DatasetName`] is both the user-facing identity of a dataset and the
//! key used to build every remote resource path, so it is validated once on
//! construction and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Maximum length of a fully qualified dataset name.
pub const MAX_NAME_LEN: usize = 44;

/// Maximum length of a single qualifier.
pub const MAX_QUALIFIER_LEN: usize = 8;

/// A validated z/OS dataset name, e.g. `USER.TEST.DATA`.
///
/// Names are 1 to 44 characters made of dot-separated qualifiers. Each
/// qualifier is 1 to 8 characters, starts with a letter or one of the
/// national characters `#`, `@`, `$`, and continues with letters, digits,
/// national characters or `-`. Case is preserved exactly as given.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatasetName(String);

impl DatasetName {
    /// Validate and wrap a dataset name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDatasetName` if the name breaks any of the
    /// rules described on [`DatasetName`].
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name).map_err(|reason| CoreError::InvalidDatasetName {
            name: name.clone(),
            reason,
        })?;
        Ok(Self(name))
    }

    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name.len() > MAX_NAME_LEN {
        return Err("name is longer than 44 characters");
    }

    for qualifier in name.split('.') {
        let mut chars = qualifier.chars();
        let Some(first) = chars.next() else {
            return Err("qualifier is empty");
        };
        if qualifier.len() > MAX_QUALIFIER_LEN {
            return Err("qualifier is longer than 8 characters");
        }
        if !(first.is_ascii_alphabetic() || is_national(first)) {
            return Err("qualifier must start with a letter or #, @, $");
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || is_national(c) || c == '-') {
            return Err("qualifier contains an invalid character");
        }
    }

    Ok(())
}

const fn is_national(c: char) -> bool {
    matches!(c, '#' | '@' | '$')
}

impl fmt::Debug for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetName({})", self.0)
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DatasetName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for DatasetName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DatasetName> for String {
    fn from(name: DatasetName) -> Self {
        name.0
    }
}

impl AsRef<str> for DatasetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
