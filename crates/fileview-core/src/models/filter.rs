//! Size-bucket filters for the attachment gallery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const KB: u64 = 1024;

/// A named size bucket the gallery can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeBucket {
    /// `>= 100 KB`
    #[serde(rename = "gt100KB")]
    Large,
    /// `< 100 KB and > 10 KB`
    #[serde(rename = "lt100KBgt10KB")]
    Medium,
    /// `<= 10 KB`
    #[serde(rename = "lt10KB")]
    Small,
}

impl SizeBucket {
    /// Every bucket in declaration order.
    pub const ALL: [Self; 3] = [Self::Large, Self::Medium, Self::Small];

    /// Wire identifier passed to the query service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Large => "gt100KB",
            Self::Medium => "lt100KBgt10KB",
            Self::Small => "lt10KB",
        }
    }

    /// Human label shown next to the checkbox.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Large => ">= 100 KB",
            Self::Medium => "< 100 KB and > 10 KB",
            Self::Small => "<= 10 KB",
        }
    }

    /// Whether a byte count falls in this bucket.
    #[must_use]
    pub const fn contains(self, size_bytes: u64) -> bool {
        match self {
            Self::Large => size_bytes >= 100 * KB,
            Self::Medium => size_bytes > 10 * KB && size_bytes < 100 * KB,
            Self::Small => size_bytes <= 10 * KB,
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeBucket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown size filter: {s}")))
    }
}

/// What to do when every filter has been switched off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFilterPolicy {
    /// Send the empty bucket list to the query service unchanged.
    #[default]
    PassThrough,
    /// Treat an empty selection as no restriction.
    ShowAll,
    /// Treat an empty selection as matching nothing; no fetch is issued.
    ShowNone,
}

/// Filter condition handed to the query service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conditions {
    /// No size restriction.
    Unrestricted,
    /// Include records in any of these buckets.
    Buckets(Vec<SizeBucket>),
}

impl Conditions {
    /// Whether a record of the given size satisfies these conditions.
    ///
    /// Records without a reported size are treated as zero bytes.
    #[must_use]
    pub fn matches(&self, size_bytes: Option<u64>) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Buckets(buckets) => {
                let size = size_bytes.unwrap_or(0);
                buckets.iter().any(|bucket| bucket.contains(size))
            }
        }
    }
}

/// One checkbox in the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub id: SizeBucket,
    pub label: &'static str,
    pub active: bool,
}

/// The declared filters and their active flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl Default for FilterSet {
    /// All three size buckets, all active.
    fn default() -> Self {
        Self::new(SizeBucket::ALL)
    }
}

impl FilterSet {
    /// Declare filters for the given buckets, all initially active.
    ///
    /// Duplicate buckets keep their first declaration only.
    pub fn new(buckets: impl IntoIterator<Item = SizeBucket>) -> Self {
        let mut filters: Vec<Filter> = Vec::new();
        for bucket in buckets {
            if filters.iter().any(|filter| filter.id == bucket) {
                continue;
            }
            filters.push(Filter {
                id: bucket,
                label: bucket.label(),
                active: true,
            });
        }
        Self { filters }
    }

    /// Flip the named filter and return the active ids in declaration order.
    pub fn toggle(&mut self, id: SizeBucket) -> Vec<SizeBucket> {
        match self.filters.iter_mut().find(|filter| filter.id == id) {
            Some(filter) => filter.active = !filter.active,
            None => tracing::warn!(filter = %id, "Ignoring toggle for undeclared filter"),
        }
        self.active_ids()
    }

    /// Active filter ids in declaration order.
    #[must_use]
    pub fn active_ids(&self) -> Vec<SizeBucket> {
        self.filters
            .iter()
            .filter(|filter| filter.active)
            .map(|filter| filter.id)
            .collect()
    }

    pub fn filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Resolve the query condition for the current selection.
    ///
    /// Returns `None` when the policy says an empty selection matches nothing.
    #[must_use]
    pub fn conditions(&self, policy: EmptyFilterPolicy) -> Option<Conditions> {
        let active = self.active_ids();
        if !active.is_empty() {
            return Some(Conditions::Buckets(active));
        }

        match policy {
            EmptyFilterPolicy::PassThrough => Some(Conditions::Buckets(Vec::new())),
            EmptyFilterPolicy::ShowAll => Some(Conditions::Unrestricted),
            EmptyFilterPolicy::ShowNone => None,
        }
    }
}
