//! Wire formatting of store-native values.
//!
//! BSON documents cross the HTTP boundary as plain JSON: ObjectIds become
//! their hex strings and datetimes RFC 3339 strings, recursively. This keeps
//! the driver's extended-JSON forms (`{"$oid": ...}`, `{"$date": ...}`) out
//! of client payloads.

use bson::{Bson, Document};
use serde_json::{json, Map, Value};

use crate::scroll::Page;

pub fn document_to_json(doc: &Document) -> Value {
    let mut obj = Map::new();
    for (key, value) in doc {
        obj.insert(key.clone(), bson_to_json(value));
    }
    Value::Object(obj)
}

pub fn page_to_json(page: &Page) -> Value {
    json!({
        "items": page.items.iter().map(document_to_json).collect::<Vec<_>>(),
        "limit": page.limit,
        "has_more": page.has_more,
        "next_cursor": page.next_cursor.map(|id| Value::String(id.to_hex())).unwrap_or(Value::Null),
    })
}

fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.try_to_rfc3339_string().unwrap_or_else(|_| dt.timestamp_millis().to_string()),
        ),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        other => other.clone().into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[test]
    fn object_ids_render_as_hex_strings() {
        let id = ObjectId::new();
        let value = document_to_json(&doc! { "_id": id, "name": "alpha" });
        assert_eq!(value["_id"], Value::String(id.to_hex()));
        assert_eq!(value["name"], "alpha");
    }

    #[test]
    fn datetimes_render_as_rfc3339_even_when_nested() {
        let stamp = bson::DateTime::from_millis(1_700_000_000_000);
        let value = document_to_json(&doc! { "created": { "at_time": stamp, "by_user": "u1" } });
        let rendered = value["created"]["at_time"].as_str().unwrap();
        assert!(rendered.starts_with("2023-11-14T"), "got {}", rendered);
        assert_eq!(value["created"]["by_user"], "u1");
    }

    #[test]
    fn scalars_and_arrays_pass_through() {
        let value = document_to_json(&doc! {
            "count": 3,
            "ratio": 1.5,
            "active": true,
            "tags": ["a", "b"],
        });
        assert_eq!(value["count"], 3);
        assert_eq!(value["ratio"], 1.5);
        assert_eq!(value["active"], true);
        assert_eq!(value["tags"], json!(["a", "b"]));
    }

    #[test]
    fn page_renders_cursor_or_null() {
        use crate::scroll::Page;

        let id = ObjectId::new();
        let page = Page {
            items: vec![doc! { "_id": id, "name": "alpha" }],
            limit: 10,
            has_more: true,
            next_cursor: Some(id),
        };
        let value = page_to_json(&page);
        assert_eq!(value["limit"], 10);
        assert_eq!(value["has_more"], true);
        assert_eq!(value["next_cursor"], Value::String(id.to_hex()));

        let done = Page { next_cursor: None, has_more: false, ..page };
        assert_eq!(page_to_json(&done)["next_cursor"], Value::Null);
    }
}
