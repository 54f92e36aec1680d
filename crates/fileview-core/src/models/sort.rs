//! Sort field and direction for the attachment gallery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Column the gallery can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation date of the document
    #[default]
    CreatedDate,
    /// Document title
    Title,
    /// Content size in bytes
    Size,
}

impl SortField {
    pub const ALL: [Self; 3] = [Self::CreatedDate, Self::Title, Self::Size];

    /// Query column this field sorts on.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CreatedDate => "ContentDocument.CreatedDate",
            Self::Title => "ContentDocument.Title",
            Self::Size => "ContentDocument.ContentSize",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDate => "created_date",
            Self::Title => "title",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let normalized = raw.to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized || field.column().eq_ignore_ascii_case(raw))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown sort field: {raw}")))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// `ASC` / `DESC` as understood by the query service.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Arrow glyph for the sort header.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Ascending => "utility:arrowup",
            Self::Descending => "utility:arrowdown",
        }
    }
}

/// The active sort field and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Select a sort field.
    ///
    /// Re-selecting the current field flips the direction; switching fields
    /// keeps the current direction.
    pub fn select(&mut self, field: SortField) -> (SortField, SortDirection) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
        }
        (self.field, self.direction)
    }

    #[must_use]
    pub fn is_sorted_by(&self, field: SortField) -> bool {
        self.field == field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_newest_first() {
        let spec = SortSpec::default();
        assert_eq!(spec.field, SortField::CreatedDate);
        assert_eq!(spec.direction, SortDirection::Descending);
        assert_eq!(spec.direction.icon(), "utility:arrowdown");
    }

    #[test]
    fn test_same_field_flips_direction() {
        let mut spec = SortSpec::new(SortField::Title, SortDirection::Ascending);
        assert_eq!(
            spec.select(SortField::Title),
            (SortField::Title, SortDirection::Descending)
        );
        assert_eq!(
            spec.select(SortField::Title),
            (SortField::Title, SortDirection::Ascending)
        );
    }

    #[test]
    fn test_new_field_keeps_direction() {
        let mut spec = SortSpec::new(SortField::CreatedDate, SortDirection::Ascending);
        assert_eq!(
            spec.select(SortField::Size),
            (SortField::Size, SortDirection::Ascending)
        );
        assert!(spec.is_sorted_by(SortField::Size));
        assert!(!spec.is_sorted_by(SortField::CreatedDate));
    }

    #[test]
    fn test_parse_field() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!(
            "created-date".parse::<SortField>().unwrap(),
            SortField::CreatedDate
        );
        assert_eq!(
            "ContentDocument.ContentSize".parse::<SortField>().unwrap(),
            SortField::Size
        );
        assert!("owner".parse::<SortField>().is_err());
    }

    #[test]
    fn test_query_tokens() {
        assert_eq!(SortDirection::Ascending.as_query(), "ASC");
        assert_eq!(SortDirection::Descending.as_query(), "DESC");
        assert_eq!(SortField::Title.column(), "ContentDocument.Title");
    }
}
