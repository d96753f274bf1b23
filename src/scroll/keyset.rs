//! Keyset predicates and ordering for cursor pagination.
//!
//! A page boundary is the pair `(sort_by value, _id)` of the anchor document.
//! The next page is everything strictly after that pair under the requested
//! order, with `_id` breaking ties so the ordering is total even when sort
//! values collide.

use std::cmp::Ordering;

use bson::{doc, Bson, Document};

use super::query::{SortOrder, ValidatedScroll};

/// Build the find filter for one page: the optional case-insensitive `name`
/// substring match plus, when continuing from a cursor, the keyset predicate
/// derived from the anchor document.
pub fn find_filter(scroll: &ValidatedScroll, anchor: Option<&Document>) -> Document {
    let mut filter = Document::new();

    if let Some(name) = &scroll.name {
        filter.insert("name", name_filter(name));
    }

    if let Some(anchor) = anchor {
        let (sort_value, anchor_id) = anchor_pair(anchor, &scroll.sort_by);
        let cmp = match scroll.order {
            SortOrder::Asc => "$gt",
            SortOrder::Desc => "$lt",
        };

        let mut beyond = Document::new();
        beyond.insert(scroll.sort_by.as_str(), op_doc(cmp, sort_value.clone()));

        let mut tied = Document::new();
        tied.insert(scroll.sort_by.as_str(), op_doc("$eq", sort_value));
        tied.insert("_id", op_doc(cmp, anchor_id));

        filter.insert("$or", vec![beyond, tied]);
    }

    filter
}

/// Sort document over `(sort_by, _id)`, both in the requested direction.
pub fn sort_document(scroll: &ValidatedScroll) -> Document {
    let mut sort = Document::new();
    sort.insert(scroll.sort_by.as_str(), scroll.order.direction());
    sort.insert("_id", scroll.order.direction());
    sort
}

fn op_doc(op: &str, value: Bson) -> Document {
    let mut doc = Document::new();
    doc.insert(op, value);
    doc
}

/// Case-insensitive substring match on `name`. The input is escaped so it is
/// matched literally, never interpreted as a pattern.
pub fn name_filter(name: &str) -> Document {
    doc! { "$regex": escape_regex(name), "$options": "i" }
}

/// The `(sort value, _id)` boundary pair of an anchor document. A missing
/// sort field compares as null, matching how MongoDB sorts absent fields.
pub fn anchor_pair(anchor: &Document, sort_by: &str) -> (Bson, Bson) {
    let sort_value = dotted_get(anchor, sort_by).cloned().unwrap_or(Bson::Null);
    let anchor_id = anchor.get("_id").cloned().unwrap_or(Bson::Null);
    (sort_value, anchor_id)
}

/// Resolve a dotted path like `created.at_time` through nested documents.
pub fn dotted_get<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut current = doc;
    let mut parts = path.split('.').peekable();

    while let Some(part) = parts.next() {
        let value = current.get(part)?;
        if parts.peek().is_none() {
            return Some(value);
        }
        current = value.as_document()?;
    }
    None
}

fn escape_regex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}')
        {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Compare two documents under `(sort_by, _id)` in the requested order.
/// This is the in-process mirror of [`sort_document`], used by the memory
/// backend and anywhere page order needs checking without a database.
pub fn cmp_documents(a: &Document, b: &Document, sort_by: &str, order: SortOrder) -> Ordering {
    let av = dotted_get(a, sort_by).unwrap_or(&Bson::Null);
    let bv = dotted_get(b, sort_by).unwrap_or(&Bson::Null);

    let primary = bson_cmp(av, bv).then_with(|| {
        let aid = a.get("_id").unwrap_or(&Bson::Null);
        let bid = b.get("_id").unwrap_or(&Bson::Null);
        bson_cmp(aid, bid)
    });

    match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    }
}

/// Total order over BSON values following MongoDB's comparison rules:
/// values compare within a type bracket, brackets compare by rank
/// (null < numbers < strings < objects < ... < dates). Only the types this
/// API stores get a within-bracket comparison; anything exotic falls back to
/// its bracket rank alone.
pub fn bson_cmp(a: &Bson, b: &Bson) -> Ordering {
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }

    match (a, b) {
        (Bson::Null, Bson::Null) => Ordering::Equal,
        (Bson::String(x), Bson::String(y)) => x.cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (Bson::DateTime(x), Bson::DateTime(y)) => {
            x.timestamp_millis().cmp(&y.timestamp_millis())
        }
        _ if matches!(ra, 2) => numeric_value(a)
            .partial_cmp(&numeric_value(b))
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::MinKey => 0,
        Bson::Null | Bson::Undefined => 1,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 2,
        Bson::String(_) | Bson::Symbol(_) => 3,
        Bson::Document(_) => 4,
        Bson::Array(_) => 5,
        Bson::Binary(_) => 6,
        Bson::ObjectId(_) => 7,
        Bson::Boolean(_) => 8,
        Bson::DateTime(_) => 9,
        Bson::Timestamp(_) => 10,
        Bson::RegularExpression(_) => 11,
        _ => 12,
    }
}

fn numeric_value(value: &Bson) -> f64 {
    match value {
        Bson::Int32(v) => *v as f64,
        Bson::Int64(v) => *v as f64,
        Bson::Double(v) => *v,
        _ => f64::NAN,
    }
}
