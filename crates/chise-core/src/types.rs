//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The string is not a recognised media kind.
    #[error("unknown media kind: {value}")]
    UnknownMediaKind { value: String },

    /// The string is not an `rgb(...)`, `rgba(...)` or `transparent` colour.
    #[error("invalid colour: {value}")]
    InvalidColor { value: String },

    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be non-zero, got {cols}x{rows}")]
    EmptyGrid { cols: usize, rows: usize },

    /// The grid has more cells than can be laid out.
    #[error("grid of {cols}x{rows} exceeds {max} cells")]
    GridTooLarge { cols: usize, rows: usize, max: usize },

    /// The string does not name a menu form field.
    #[error("unknown menu field: {value}")]
    UnknownMenuField { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// Identifier of a media entry.
    ///
    /// Freshly generated ids are UUID v4 strings, so entries created within the
    /// same intake batch never collide.
    MediaId, "media ID"
);

impl MediaId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// A point in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_id_rejects_empty() {
        assert!(MediaId::new("").is_err());
        assert!(MediaId::new("clip-1").is_ok());
    }

    #[test]
    fn generated_media_ids_are_distinct() {
        let ids: std::collections::HashSet<_> = (0..64).map(|_| MediaId::generate()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn media_id_serde_roundtrip() {
        let id = MediaId::new("clip-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"clip-123\"");
        let parsed: MediaId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn media_id_serde_rejects_empty() {
        let result: Result<MediaId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for simple sums"
    )]
    fn rect_bottom_adds_height() {
        let rect = Rect::new(0.0, 40.0, 10.0, 60.0);
        assert_eq!(rect.bottom(), 100.0);
    }
}
