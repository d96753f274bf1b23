//! Infinite-scroll cursor pagination.
//!
//! One page of a listing is a bounded, deterministically-ordered slice of a
//! collection, continued from the identifier of the last item the client saw
//! (`after_id`). Ordering is always over the pair `(sort_by value, _id)` so
//! that ties on the sort value cannot reorder between pages.
//!
//! The flow shared by every domain:
//! 1. [`ScrollQuery::validate`] bounds-checks the raw request parameters
//!    against the domain's sortable-field allow-list.
//! 2. A store backend resolves the cursor to its anchor document, builds the
//!    keyset predicate ([`keyset`]) and fetches `limit + 1` documents.
//! 3. [`Page::from_probe`] truncates the probe row and derives `has_more`
//!    and `next_cursor`.

pub mod error;
pub mod keyset;
pub mod page;
pub mod query;

pub use error::ScrollError;
pub use page::Page;
pub use query::{ScrollQuery, SortOrder, ValidatedScroll};
