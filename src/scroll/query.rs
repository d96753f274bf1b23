use bson::oid::ObjectId;

use super::error::ScrollError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_SORT_BY: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Direction value for a MongoDB sort document.
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Raw scroll parameters as they arrive from the query string, defaults
/// already applied by the route layer.
#[derive(Debug, Clone)]
pub struct ScrollQuery {
    pub name: Option<String>,
    pub after_id: Option<String>,
    pub limit: i64,
    pub sort_by: String,
    pub order: String,
}

impl Default for ScrollQuery {
    fn default() -> Self {
        Self {
            name: None,
            after_id: None,
            limit: DEFAULT_LIMIT,
            sort_by: DEFAULT_SORT_BY.to_string(),
            order: "asc".to_string(),
        }
    }
}

/// Scroll parameters after bounds-checking, ready for a store backend.
#[derive(Debug, Clone)]
pub struct ValidatedScroll {
    pub name: Option<String>,
    pub after_id: Option<ObjectId>,
    pub limit: i64,
    pub sort_by: String,
    pub order: SortOrder,
}

impl ScrollQuery {
    /// Bounds-check every parameter against the domain's allow-list.
    /// Validation is syntactic only: a well-formed `after_id` passes here
    /// even if no document carries it; the store resolves existence when it
    /// looks up the anchor.
    pub fn validate(self, allowed_sort_fields: &[&str]) -> Result<ValidatedScroll, ScrollError> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(ScrollError::InvalidLimit(self.limit));
        }

        if !allowed_sort_fields.contains(&self.sort_by.as_str()) {
            return Err(ScrollError::InvalidSortField(self.sort_by));
        }

        let order = match self.order.as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => return Err(ScrollError::InvalidOrder(other.to_string())),
        };

        let after_id = match self.after_id {
            Some(raw) => Some(
                ObjectId::parse_str(&raw).map_err(|_| ScrollError::InvalidCursor(raw))?,
            ),
            None => None,
        };

        Ok(ValidatedScroll { name: self.name, after_id, limit: self.limit, sort_by: self.sort_by, order })
    }
}
