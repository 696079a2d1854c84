use crate::error::EncodeError;
use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The integer primary key of a shortened URL.
///
/// The codec covers the whole `u64` range, but record stores key their rows
/// with a signed machine word, so only `0..=LinkId::MAX` can ever be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(u64);

impl LinkId {
    /// Largest identifier a record store accepts (`i64::MAX`).
    pub const MAX: LinkId = LinkId(i64::MAX as u64);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this identifier fits in the signed range used by record stores.
    pub const fn is_storable(self) -> bool {
        self.0 <= Self::MAX.0
    }

    /// Renders the canonical short code for this identifier.
    pub fn short_code(self) -> ShortCode {
        ShortCode::from_id(self)
    }
}

impl From<u64> for LinkId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for LinkId {
    type Error = EncodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| EncodeError::Negative(value.to_string()))
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
