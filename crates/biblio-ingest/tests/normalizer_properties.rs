//! Property tests for priority-fallback extraction

use biblio_ingest::{normalize_entry, NormalizedRecord};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Keys that no extraction path looks at
fn unrelated_key() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|k| format!("x-{}", k))
}

fn non_empty_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,24}"
}

proptest! {
    #[test]
    fn entries_without_known_paths_normalize_to_defaults(
        fields in prop::collection::btree_map(unrelated_key(), non_empty_text(), 0..6)
    ) {
        let entry = Value::Object(
            fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect::<Map<_, _>>()
        );
        prop_assert_eq!(normalize_entry(&entry), NormalizedRecord::default());
    }

    #[test]
    fn title_takes_earliest_populated_candidate(
        inner in proptest::option::of(non_empty_text()),
        prefixed in proptest::option::of(non_empty_text()),
        plain in proptest::option::of(non_empty_text()),
    ) {
        let mut entry = Map::new();
        if let Some(ref t) = inner {
            entry.insert("coredata".to_string(), json!({"dc:title": t}));
        }
        if let Some(ref t) = prefixed {
            entry.insert("dc:title".to_string(), json!(t));
        }
        if let Some(ref t) = plain {
            entry.insert("title".to_string(), json!(t));
        }

        let expected = inner.or(prefixed).or(plain);
        prop_assert_eq!(normalize_entry(&Value::Object(entry)).title, expected);
    }

    #[test]
    fn eid_prefers_coredata(inner in non_empty_text(), outer in non_empty_text()) {
        let entry = json!({"eid": outer, "coredata": {"eid": inner.clone()}});
        prop_assert_eq!(normalize_entry(&entry).eid, Some(inner));
    }

    #[test]
    fn citedby_count_prefers_coredata(inner in 1i64..1_000_000, outer in 1i64..1_000_000) {
        let entry = json!({
            "citedby-count": outer.to_string(),
            "coredata": {"citedby-count": inner.to_string()}
        });
        prop_assert_eq!(normalize_entry(&entry).citedby_count, inner);
    }

    #[test]
    fn author_ids_keep_order_and_duplicates(ids in prop::collection::vec("[0-9]{1,6}", 0..12)) {
        let authors: Vec<Value> = ids.iter().map(|id| json!({"@auid": id})).collect();
        let entry = json!({"authors": {"author": authors}});
        prop_assert_eq!(normalize_entry(&entry).author_ids, ids);
    }
}
