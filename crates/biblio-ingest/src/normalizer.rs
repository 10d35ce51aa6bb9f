//! Record normalization
//!
//! Maps one raw export entry onto the flat [`NormalizedRecord`] shape. The
//! same logical field lives under different keys and depths depending on the
//! export (`coredata.dc:title` in an abstract retrieval, `dc:title` in a search
//! result, `title` in hand-made dumps), so each field is read from an ordered
//! list of candidate paths and the first populated one wins. Candidates are
//! never merged.
//!
//! Normalization cannot fail. Anything unexpected inside an entry falls back
//! to the field's default and is not logged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{first_key_text, first_populated, first_text, get_path, integer, is_populated};

const EID_PATHS: &[&str] = &["coredata.eid", "eid"];
const TITLE_PATHS: &[&str] = &["coredata.dc:title", "dc:title", "title"];
const ABSTRACT_PATHS: &[&str] = &["coredata.dc:description", "dc:description", "abstract"];
const DOI_PATHS: &[&str] = &["coredata.prism:doi", "prism:doi", "doi"];
const PUBLICATION_PATHS: &[&str] = &["coredata.prism:publicationName", "prism:publicationName"];
const COVER_DATE_PATHS: &[&str] = &["coredata.prism:coverDate", "prism:coverDate"];
const CITEDBY_PATHS: &[&str] = &["coredata.citedby-count", "citedby-count"];

const AUTHOR_CONTAINER_PATHS: &[&str] = &["authors.author", "authors", "author"];
const AUTHOR_ID_KEYS: &[&str] = &["@auid", "authid", "authorId", "id"];

const SUBJECT_CONTAINER_PATHS: &[&str] = &["subject-areas.subject-area", "subject_areas"];
const SUBJECT_LABEL_KEYS: &[&str] = &["$", "name", "@abbrev"];

const AFFILIATION_CONTAINER_PATHS: &[&str] = &["affiliation", "affiliations"];
const AFFILIATION_ID_KEYS: &[&str] = &["@afid", "afid", "id"];
const AFFILIATION_NAME_KEYS: &[&str] = &["affilname", "name"];
const AFFILIATION_COUNTRY_KEYS: &[&str] = &["affiliation-country", "country"];

/// One publication row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Scopus electronic identifier, e.g. `2-s2.0-85012345678`
    pub eid: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub doi: Option<String>,
    pub publication_name: Option<String>,
    pub cover_date: Option<String>,
    pub citedby_count: i64,
    pub author_ids: Vec<String>,
    pub subject_areas: Vec<String>,
    pub affiliations: Vec<Affiliation>,
}

/// Affiliation triple; each part may be missing independently
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub afid: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
}

/// Normalize one export entry.
pub fn normalize_entry(entry: &Value) -> NormalizedRecord {
    NormalizedRecord {
        eid: first_text(entry, EID_PATHS),
        title: first_text(entry, TITLE_PATHS),
        abstract_text: first_text(entry, ABSTRACT_PATHS),
        doi: first_text(entry, DOI_PATHS),
        publication_name: first_text(entry, PUBLICATION_PATHS),
        cover_date: first_text(entry, COVER_DATE_PATHS),
        citedby_count: citedby_count(entry),
        author_ids: author_ids(entry),
        subject_areas: subject_areas(entry),
        affiliations: affiliations(entry),
    }
}

fn citedby_count(entry: &Value) -> i64 {
    CITEDBY_PATHS
        .iter()
        .filter_map(|path| get_path(entry, path))
        .filter(|candidate| is_populated(candidate))
        .find_map(integer)
        .unwrap_or(0)
}

/// Resolve a list container, unwrapping one `{wrapper_key: [...]}` level.
fn container<'a>(entry: &'a Value, paths: &[&str], wrapper_key: &str) -> &'a [Value] {
    let resolved = match first_populated(entry, paths) {
        Some(Value::Object(map)) if map.contains_key(wrapper_key) => map.get(wrapper_key),
        other => other,
    };

    match resolved {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

fn mappings(items: &[Value]) -> impl Iterator<Item = &Map<String, Value>> {
    items.iter().filter_map(Value::as_object)
}

fn author_ids(entry: &Value) -> Vec<String> {
    mappings(container(entry, AUTHOR_CONTAINER_PATHS, "author"))
        .filter_map(|author| first_key_text(author, AUTHOR_ID_KEYS))
        .collect()
}

fn subject_areas(entry: &Value) -> Vec<String> {
    let items: &[Value] = match first_populated(entry, SUBJECT_CONTAINER_PATHS) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };

    mappings(items)
        .filter_map(|area| first_key_text(area, SUBJECT_LABEL_KEYS))
        .collect()
}

fn affiliations(entry: &Value) -> Vec<Affiliation> {
    mappings(container(entry, AFFILIATION_CONTAINER_PATHS, "affiliation"))
        .map(|aff| Affiliation {
            afid: first_key_text(aff, AFFILIATION_ID_KEYS),
            name: first_key_text(aff, AFFILIATION_NAME_KEYS),
            country: first_key_text(aff, AFFILIATION_COUNTRY_KEYS),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abstract_retrieval_entry() {
        let entry = json!({
            "coredata": {
                "eid": "2-s2.0-85000000001",
                "dc:title": "Perovskite solar cells",
                "dc:description": "We report...",
                "prism:doi": "10.1000/xyz",
                "prism:publicationName": "Nature Energy",
                "prism:coverDate": "2019-03-01",
                "citedby-count": "17"
            },
            "authors": {"author": [{"@auid": "111"}, {"@auid": "222"}]},
            "subject-areas": {"subject-area": [{"$": "Energy", "@abbrev": "ENER"}]},
            "affiliation": [{
                "@id": "ignored",
                "afid": "60000001",
                "affilname": "Delft University of Technology",
                "affiliation-country": "Netherlands"
            }]
        });

        let record = normalize_entry(&entry);
        assert_eq!(record.eid.as_deref(), Some("2-s2.0-85000000001"));
        assert_eq!(record.title.as_deref(), Some("Perovskite solar cells"));
        assert_eq!(record.abstract_text.as_deref(), Some("We report..."));
        assert_eq!(record.doi.as_deref(), Some("10.1000/xyz"));
        assert_eq!(record.publication_name.as_deref(), Some("Nature Energy"));
        assert_eq!(record.cover_date.as_deref(), Some("2019-03-01"));
        assert_eq!(record.citedby_count, 17);
        assert_eq!(record.author_ids, vec!["111", "222"]);
        assert_eq!(record.subject_areas, vec!["Energy"]);
        assert_eq!(
            record.affiliations,
            vec![Affiliation {
                afid: Some("60000001".to_string()),
                name: Some("Delft University of Technology".to_string()),
                country: Some("Netherlands".to_string()),
            }]
        );
    }

    #[test]
    fn test_search_entry_uses_flat_keys() {
        let entry = json!({
            "eid": "X9",
            "dc:title": "Flat",
            "prism:doi": "10.1/flat",
            "citedby-count": 4,
            "author": [{"authid": "A"}, {"authorId": "B"}, {"id": 7}],
            "subject_areas": [{"name": "Chemistry"}, {"@abbrev": "MATE"}],
            "affiliations": {"affiliation": [{"@afid": "1", "name": "MIT", "country": "USA"}]}
        });

        let record = normalize_entry(&entry);
        assert_eq!(record.eid.as_deref(), Some("X9"));
        assert_eq!(record.title.as_deref(), Some("Flat"));
        assert_eq!(record.citedby_count, 4);
        assert_eq!(record.author_ids, vec!["A", "B", "7"]);
        assert_eq!(record.subject_areas, vec!["Chemistry", "MATE"]);
        assert_eq!(record.affiliations[0].afid.as_deref(), Some("1"));
        assert_eq!(record.affiliations[0].name.as_deref(), Some("MIT"));
        assert_eq!(record.affiliations[0].country.as_deref(), Some("USA"));
    }

    #[test]
    fn test_empty_entry_gets_defaults() {
        let record = normalize_entry(&json!({}));
        assert_eq!(record, NormalizedRecord::default());
        assert_eq!(record.citedby_count, 0);
    }

    #[test]
    fn test_non_mapping_entry_gets_defaults() {
        assert_eq!(normalize_entry(&json!("just text")), NormalizedRecord::default());
        assert_eq!(normalize_entry(&json!([1, 2])), NormalizedRecord::default());
        assert_eq!(normalize_entry(&json!(null)), NormalizedRecord::default());
    }

    #[test]
    fn test_single_author_mapping_is_skipped() {
        let entry = json!({"authors": {"author": {"@auid": "A1"}}});
        assert!(normalize_entry(&entry).author_ids.is_empty());
    }

    #[test]
    fn test_author_elements_without_id_are_skipped() {
        let entry = json!({
            "authors": {"author": [{"@auid": "A1"}, "stray", {"ce:surname": "Doe"}, {"@auid": "A1"}]}
        });
        assert_eq!(normalize_entry(&entry).author_ids, vec!["A1", "A1"]);
    }

    #[test]
    fn test_author_id_priority() {
        let entry = json!({"author": [{"id": "last", "authid": "second", "@auid": "first"}]});
        assert_eq!(normalize_entry(&entry).author_ids, vec!["first"]);
    }

    #[test]
    fn test_coredata_wins_over_top_level() {
        let entry = json!({
            "coredata": {"dc:title": "Inner", "citedby-count": "3"},
            "dc:title": "Outer",
            "title": "Plain",
            "citedby-count": "99"
        });
        let record = normalize_entry(&entry);
        assert_eq!(record.title.as_deref(), Some("Inner"));
        assert_eq!(record.citedby_count, 3);
    }

    #[test]
    fn test_unparseable_citedby_count_defaults_to_zero() {
        let entry = json!({"citedby-count": "n/a"});
        assert_eq!(normalize_entry(&entry).citedby_count, 0);
    }

    #[test]
    fn test_affiliation_single_mapping_is_skipped() {
        let entry = json!({"affiliation": {"@afid": "1", "affilname": "Solo"}});
        assert!(normalize_entry(&entry).affiliations.is_empty());
    }

    #[test]
    fn test_affiliation_fields_individually_nullable() {
        let entry = json!({"affiliation": [{"affilname": "Only name"}, 5]});
        assert_eq!(
            normalize_entry(&entry).affiliations,
            vec![Affiliation {
                afid: None,
                name: Some("Only name".to_string()),
                country: None,
            }]
        );
    }

    #[test]
    fn test_record_serializes_abstract_column_name() {
        let record = NormalizedRecord {
            abstract_text: Some("text".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["abstract"], json!("text"));
    }
}
