use bson::{oid::ObjectId, Document};

/// One page of a scrolled listing.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<Document>,
    pub limit: i64,
    pub has_more: bool,
    pub next_cursor: Option<ObjectId>,
}

impl Page {
    /// Assemble a page from a `limit + 1` probe fetch.
    ///
    /// Fetching one document past the requested page answers "is there more"
    /// without a second round-trip: an overflow row means `has_more`, and the
    /// cursor is the `_id` of the last document actually returned.
    pub fn from_probe(mut docs: Vec<Document>, limit: i64) -> Self {
        let has_more = docs.len() as i64 > limit;
        if has_more {
            docs.truncate(limit as usize);
        }

        let next_cursor = if has_more {
            docs.last().and_then(|d| d.get_object_id("_id").ok())
        } else {
            None
        };

        Self { items: docs, limit, has_more, next_cursor }
    }

    pub fn empty(limit: i64) -> Self {
        Self { items: Vec::new(), limit, has_more: false, next_cursor: None }
    }
}
