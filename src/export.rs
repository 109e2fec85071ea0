//! Export serializers for deduplicated article lists.
//!
//! These consume the canonical articles produced by
//! [`Deduplicator::deduplicate`](crate::Deduplicator::deduplicate) as-is:
//! `source_db` may be a `"; "`-joined set of source keys and authors are an
//! ordered list.

#[cfg(feature = "csv")]
pub mod csv;
#[cfg(feature = "ris")]
pub mod ris;
