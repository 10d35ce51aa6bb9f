//! Record-list extraction
//!
//! One export file can hold a single abstract, a page of search results, a
//! vendor dump with the records under some list field, or a bare array. This
//! module turns any of those shapes into the list of entries to normalize.

use serde_json::{Map, Value};

/// Wrapper key of a single Abstract Retrieval response
pub const ABSTRACT_ENVELOPE: &str = "abstracts-retrieval-response";

/// Wrapper key of a Search API response
pub const SEARCH_ENVELOPE: &str = "search-results";

/// Key of the entry list inside [`SEARCH_ENVELOPE`]
pub const SEARCH_ENTRY_KEY: &str = "entry";

/// Split a parsed document into candidate record entries.
///
/// - `{"abstracts-retrieval-response": R}` yields `[R]`
/// - `{"search-results": {"entry": [..]}}` yields the entries; a null
///   `entry` yields none and any other single value is one entry
/// - any other mapping yields its first field holding a non-empty list whose
///   first element is a mapping, or the mapping itself when there is none
/// - a top-level array is used as is
/// - any other value becomes a single entry
pub fn extract_records(document: Value) -> Vec<Value> {
    match document {
        Value::Object(mut map) => {
            if let Some(record) = map.remove(ABSTRACT_ENVELOPE) {
                return vec![record];
            }
            if let Some(entries) = take_search_entries(&mut map) {
                return entries;
            }
            match first_record_list_key(&map) {
                Some(key) => match map.remove(&key) {
                    Some(Value::Array(records)) => records,
                    _ => Vec::new(),
                },
                None => vec![Value::Object(map)],
            }
        },
        Value::Array(records) => records,
        other @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
            vec![other]
        },
    }
}

fn take_search_entries(map: &mut Map<String, Value>) -> Option<Vec<Value>> {
    let has_entries = matches!(
        map.get(SEARCH_ENVELOPE),
        Some(Value::Object(results)) if results.contains_key(SEARCH_ENTRY_KEY)
    );
    if !has_entries {
        return None;
    }

    match map.remove(SEARCH_ENVELOPE) {
        Some(Value::Object(mut results)) => match results.remove(SEARCH_ENTRY_KEY) {
            Some(Value::Array(entries)) => Some(entries),
            Some(Value::Null) => Some(Vec::new()),
            Some(single) => Some(vec![single]),
            None => Some(Vec::new()),
        },
        _ => None,
    }
}

/// First key, in document order, whose value looks like a list of records.
///
/// Document order is only meaningful because `serde_json` is built with
/// `preserve_order`. Exports with several such lists are ambiguous; the first
/// one wins.
fn first_record_list_key(map: &Map<String, Value>) -> Option<String> {
    map.iter()
        .find(|(_, value)| match value {
            Value::Array(items) => matches!(items.first(), Some(Value::Object(_))),
            _ => false,
        })
        .map(|(key, _)| key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abstract_envelope_is_single_record() {
        let doc = json!({ABSTRACT_ENVELOPE: {"coredata": {"eid": "X1"}}});
        assert_eq!(extract_records(doc), vec![json!({"coredata": {"eid": "X1"}})]);
    }

    #[test]
    fn test_abstract_envelope_wins_over_search_results() {
        let doc = json!({
            SEARCH_ENVELOPE: {"entry": [{"eid": "S"}]},
            ABSTRACT_ENVELOPE: {"eid": "A"}
        });
        assert_eq!(extract_records(doc), vec![json!({"eid": "A"})]);
    }

    #[test]
    fn test_search_results_entries() {
        let doc = json!({SEARCH_ENVELOPE: {
            "opensearch:totalResults": "2",
            "entry": [{"eid": "X2"}, {"eid": "X3"}]
        }});
        assert_eq!(extract_records(doc), vec![json!({"eid": "X2"}), json!({"eid": "X3"})]);
    }

    #[test]
    fn test_search_results_without_entry_falls_through() {
        let doc = json!({SEARCH_ENVELOPE: {"opensearch:totalResults": "0"}});
        let records = extract_records(doc.clone());
        assert_eq!(records, vec![doc]);
    }

    #[test]
    fn test_search_results_null_entry_yields_nothing() {
        let doc = json!({SEARCH_ENVELOPE: {"opensearch:totalResults": "0", "entry": null}});
        assert!(extract_records(doc).is_empty());
    }

    #[test]
    fn test_search_results_single_entry_mapping() {
        let doc = json!({SEARCH_ENVELOPE: {"entry": {"eid": "only"}}});
        assert_eq!(extract_records(doc), vec![json!({"eid": "only"})]);
    }

    #[test]
    fn test_first_list_of_mappings_field_is_used() {
        let doc = json!({
            "meta": {"source": "dump"},
            "tags": ["a", "b"],
            "empty": [],
            "papers": [{"eid": "P1"}, {"eid": "P2"}],
            "others": [{"eid": "O1"}]
        });
        assert_eq!(extract_records(doc), vec![json!({"eid": "P1"}), json!({"eid": "P2"})]);
    }

    #[test]
    fn test_plain_mapping_is_single_record() {
        let doc = json!({"eid": "solo", "tags": ["x"]});
        assert_eq!(extract_records(doc.clone()), vec![doc]);
    }

    #[test]
    fn test_top_level_array_used_directly() {
        let doc = json!([{"eid": "1"}, "junk", {"eid": "2"}]);
        assert_eq!(extract_records(doc).len(), 3);
    }

    #[test]
    fn test_scalar_document_is_single_entry() {
        assert_eq!(extract_records(json!(42)), vec![json!(42)]);
        assert_eq!(extract_records(json!(null)), vec![json!(null)]);
    }
}
