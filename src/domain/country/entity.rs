//! Country reference data

use serde::{Deserialize, Serialize};

/// Country identifier as stored in the `countries` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(i64);

impl CountryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse a submitted form value; anything but a plain integer is rejected
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable country on the sign-up form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    id: CountryId,
    name: String,
}

impl Country {
    pub fn new(id: CountryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> CountryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
