use crate::base62;
use crate::error::CoreError;
use crate::link_id::LinkId;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;
use std::str::FromStr;

/// The short, user-facing token of a shortened URL.
///
/// A `ShortCode` is always the canonical base62 rendering of its [`LinkId`]:
/// it can only be built by encoding an identifier, or by parsing text that
/// is then re-encoded. Parsing `"007"` therefore yields the code `"7"`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShortCode {
    id: LinkId,
    code: SmolStr,
}

impl ShortCode {
    /// Creates the canonical short code for an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use pinhole_core::{LinkId, ShortCode};
    ///
    /// let code = ShortCode::from_id(LinkId::new(62));
    /// assert_eq!(code.as_str(), "10");
    /// ```
    pub fn from_id(id: impl Into<LinkId>) -> Self {
        let id = id.into();
        Self {
            id,
            code: SmolStr::new(base62::encode(id.get())),
        }
    }

    /// Parses a short code from user-supplied text.
    pub fn new(code: impl AsRef<str>) -> Result<Self, CoreError> {
        let code = code.as_ref();
        base62::decode(code)
            .map(Self::from_id)
            .map_err(|source| CoreError::InvalidShortCode {
                code: code.to_owned(),
                source,
            })
    }

    /// The identifier this code stands for.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl From<LinkId> for ShortCode {
    fn from(id: LinkId) -> Self {
        Self::from_id(id)
    }
}

impl FromStr for ShortCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShortCode").field(&self.code).finish()
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

impl Serialize for ShortCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.code.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShortCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
