//! Keyset pagination for newest-first listings.
//!
//! All tenant-scoped listings order by `(created_at DESC, id DESC)`, a
//! total order per organization, with the id comparison breaking
//! timestamp ties deterministically. A [`PageToken`] names a position in
//! that order; passing the token of the last row seen resumes the listing
//! exactly where it stopped, stable across repeated calls when nothing
//! was written in between.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit into `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

// ---------------------------------------------------------------------------
// PageToken
// ---------------------------------------------------------------------------

/// An opaque, restartable position in a `(created_at DESC, id DESC)`
/// ordered listing.
///
/// The wire form is `<created_at micros>.<record uuid>`; callers should
/// treat it as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToken {
    pub created_at: Timestamp,
    pub id: Uuid,
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.created_at.timestamp_micros(), self.id)
    }
}

impl FromStr for PageToken {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoreError::Validation(format!("Malformed page token: {s:?}"));

        let (micros, id) = s.split_once('.').ok_or_else(malformed)?;
        let micros: i64 = micros.parse().map_err(|_| malformed())?;
        let created_at = DateTime::from_timestamp_micros(micros).ok_or_else(malformed)?;
        let id = Uuid::parse_str(id).map_err(|_| malformed())?;

        Ok(PageToken { created_at, id })
    }
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PageToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// PageRequest / Page
// ---------------------------------------------------------------------------

/// Caller-supplied paging parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    /// Page size; clamped via [`clamp_limit`].
    pub limit: Option<i64>,
    /// Resume position from a previous page's `next` token.
    pub token: Option<PageToken>,
}

impl PageRequest {
    /// First page with the default limit.
    pub fn first() -> Self {
        PageRequest::default()
    }

    /// Page continuing after `token`.
    pub fn after(token: PageToken) -> Self {
        PageRequest {
            limit: None,
            token: Some(token),
        }
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token resuming after the last item, absent on the final page.
    pub next: Option<PageToken>,
}
