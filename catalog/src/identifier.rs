use std::{fmt, str::FromStr};

use crate::error::Error;

/// How a catalog entry is addressed upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// The catalog's numeric id, forwarded exactly as given.
    Number(String),
    /// A species name, always forwarded in lower case.
    Name(String),
}

impl Identifier {
    pub fn path_segment(&self) -> &str {
        match self {
            Identifier::Number(n) => n.as_str(),
            Identifier::Name(n) => n.as_str(),
        }
    }
}

/// Only letters, digits and hyphens make it through to the upstream URL.
pub(crate) fn check_segment(value: &str) -> Result<(), Error> {
    let valid = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(value.to_string()))
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_segment(s)?;

        if s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Identifier::Number(s.to_string()))
        } else {
            Ok(Identifier::Name(s.to_ascii_lowercase()))
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}
