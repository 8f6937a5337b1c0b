//! BlurHash wire codec.
//!
//! The backend stores image placeholders as a single string column in the
//! form `W:H:::HASH`, where `W` and `H` are the source image dimensions.
//! Decoding is total for syntactically valid strings; anything else fails
//! with [`Error::Decode`].

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Compact low-resolution image placeholder with its source dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurHash {
    pub hash: String,
    pub width: f64,
    pub height: f64,
}

impl BlurHash {
    /// Build from components. Dimensions must be finite and positive.
    pub fn new(hash: impl Into<String>, width: f64, height: f64) -> Result<Self, Error> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::Decode(format!(
                "blur hash dimensions must be finite and positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            hash: hash.into(),
            width,
            height,
        })
    }
}

impl FromStr for BlurHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dimensions, hash) = s
            .split_once(":::")
            .ok_or_else(|| Error::Decode(format!("malformed blur hash: {s:?}")))?;
        let (width, height) = dimensions
            .split_once(':')
            .ok_or_else(|| Error::Decode(format!("malformed blur hash dimensions: {s:?}")))?;
        let width: f64 = width
            .parse()
            .map_err(|_| Error::Decode(format!("invalid blur hash width: {s:?}")))?;
        let height: f64 = height
            .parse()
            .map_err(|_| Error::Decode(format!("invalid blur hash height: {s:?}")))?;
        Self::new(hash, width, height)
    }
}

impl fmt::Display for BlurHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:::{}", self.width, self.height, self.hash)
    }
}

impl Serialize for BlurHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlurHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
