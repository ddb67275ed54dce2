//! End-to-end behavior of the document store over the in-memory backend.

use chrono::{DateTime, Duration, TimeZone, Utc};
use docstash::{memory::InMemoryStore, prelude::*};
use serde_json::json;

fn t(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

fn doc(author_id: &str, title: &str, content: &str, created: DateTime<Utc>) -> Document {
    Document::builder(Author::new(author_id, format!("Author {author_id}")), created)
        .title(title)
        .content(content)
        .build()
}

fn store() -> DocumentStore<InMemoryStore> {
    DocumentStore::new(InMemoryStore::new())
}

fn store_with(config: StoreConfig) -> DocumentStore<InMemoryStore> {
    DocumentStore::with_config(InMemoryStore::new(), config)
}

/// Sorted numeric ids, since search order is unspecified.
fn ids(documents: &[Document]) -> Vec<u64> {
    let mut ids = documents
        .iter()
        .map(|document| document.id().unwrap().parse::<u64>().unwrap())
        .collect::<Vec<_>>();
    ids.sort_unstable();
    ids
}

/// Three documents by authors a1, a2 and a3. The first two have titles starting with "Intro".
fn seeded(store: &DocumentStore<InMemoryStore>) {
    store.save(doc("a1", "Intro to X", "hello world", t(1))).unwrap();
    store.save(doc("a2", "Intro to Y", "goodbye world", t(2))).unwrap();
    store.save(doc("a3", "Notes", "scratch", t(3))).unwrap();
}

#[test]
fn walkthrough_scenario() {
    let store = store();

    let first = store.save(doc("a1", "Intro to X", "hello world", t(1))).unwrap();
    let second = store.save(doc("a2", "Other", "text", t(2))).unwrap();

    assert_eq!(first.id(), Some("1"));
    assert_eq!(second.id(), Some("2"));

    let found = store
        .search(&SearchRequest::builder().title_prefixes(["Intro"]).build())
        .unwrap();
    assert_eq!(found, vec![first.clone()]);

    assert_eq!(store.find_by_id("1").unwrap(), Some(first));
    assert_eq!(store.find_by_id("2").unwrap(), Some(second));
    assert_eq!(store.find_by_id("3").unwrap(), None);
}

#[test]
fn saved_document_can_be_found_by_its_assigned_id() {
    let store = store();

    let saved = store.save(doc("a1", "t", "c", t(1))).unwrap();
    let id = saved.id().expect("store assigns an id");

    assert_eq!(store.find_by_id(id).unwrap(), Some(saved));
}

#[test]
fn upsert_replaces_fields_and_stores_callers_created() {
    let store = store();
    let original = store.save(doc("a1", "Draft", "v1", t(1))).unwrap();

    let replacement = Document {
        id: original.id.clone(),
        ..doc("a2", "Final", "v2", t(20))
    };
    let saved = store.save(replacement.clone()).unwrap();

    assert_eq!(saved, replacement);
    let stored = store.find_by_id("1").unwrap().unwrap();
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.content, "v2");
    assert_eq!(stored.author.id, "a2");
    assert_eq!(stored.created, t(20));
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn explicit_id_keeps_its_string_form() {
    let store = store();

    store
        .save(Document { id: Some("007".to_string()), ..doc("a1", "t", "c", t(1)) })
        .unwrap();

    assert_eq!(store.find_by_id("7").unwrap().unwrap().id(), Some("007"));
}

#[test]
fn explicit_high_id_pushes_counter_past_it() {
    let store = store();

    store
        .save(Document { id: Some("100".to_string()), ..doc("a1", "t", "c", t(1)) })
        .unwrap();
    let next = store.save(doc("a1", "t", "c", t(1))).unwrap();

    assert_eq!(next.id(), Some("101"));
}

#[test]
fn keep_counter_policy_ignores_explicit_ids() {
    let store = store_with(StoreConfig::default().with_id_policy(IdPolicy::KeepCounter));

    store
        .save(Document { id: Some("100".to_string()), ..doc("a1", "t", "c", t(1)) })
        .unwrap();
    let next = store.save(doc("a1", "t", "c", t(1))).unwrap();

    assert_eq!(next.id(), Some("1"));
    assert_eq!(store.next_id().unwrap(), 2);
}

#[test]
fn keep_counter_policy_lets_generated_ids_overwrite_explicit_ones() {
    let store = store_with(StoreConfig::default().with_id_policy(IdPolicy::KeepCounter));

    store
        .save(Document { id: Some("2".to_string()), ..doc("a1", "explicit", "c", t(1)) })
        .unwrap();
    store.save(doc("a1", "generated one", "c", t(1))).unwrap();
    store.save(doc("a1", "generated two", "c", t(1))).unwrap();

    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(store.find_by_id("2").unwrap().unwrap().title, "generated two");
}

#[test]
fn advance_policy_protects_explicit_ids() {
    let store = store();

    store
        .save(Document { id: Some("2".to_string()), ..doc("a1", "explicit", "c", t(1)) })
        .unwrap();
    store.save(doc("a1", "generated one", "c", t(1))).unwrap();
    store.save(doc("a1", "generated two", "c", t(1))).unwrap();

    assert_eq!(store.len().unwrap(), 3);
    assert_eq!(store.find_by_id("2").unwrap().unwrap().title, "explicit");
    assert_eq!(store.find_by_id("3").unwrap().unwrap().title, "generated one");
    assert_eq!(store.find_by_id("4").unwrap().unwrap().title, "generated two");
}

#[test]
fn non_numeric_explicit_id_is_rejected() {
    let store = store();

    let err = store
        .save(Document { id: Some("abc".to_string()), ..doc("a1", "t", "c", t(1)) })
        .unwrap_err();

    assert!(matches!(err, DocumentStoreError::InvalidArgument(_)));
    assert!(store.is_empty().unwrap());
    assert_eq!(store.next_id().unwrap(), 1);
}

#[test]
fn search_joins_fields_with_or() {
    let store = store();
    seeded(&store);

    let request = SearchRequest::builder()
        .author_ids(["a1"])
        .title_prefixes(["Intro"])
        .build();

    assert_eq!(ids(&store.search(&request).unwrap()), vec![1, 2]);
}

#[test]
fn all_mode_intersects_fields() {
    let store = store_with(StoreConfig::default().with_match_mode(MatchMode::All));
    seeded(&store);

    let request = SearchRequest::builder()
        .author_ids(["a1"])
        .title_prefixes(["Intro"])
        .build();

    assert_eq!(ids(&store.search(&request).unwrap()), vec![1]);
}

#[test]
fn empty_request_matches_nothing() {
    let store = store();
    seeded(&store);

    assert!(store.search(&SearchRequest::default()).unwrap().is_empty());

    let empty_lists = SearchRequest {
        author_ids: Some(vec![]),
        title_prefixes: Some(vec![]),
        ..Default::default()
    };
    assert!(store.search(&empty_lists).unwrap().is_empty());
}

#[test]
fn empty_request_matches_everything_in_all_mode() {
    let store = store_with(StoreConfig::default().with_match_mode(MatchMode::All));
    seeded(&store);

    assert_eq!(ids(&store.search(&SearchRequest::default()).unwrap()), vec![1, 2, 3]);
}

#[test]
fn single_time_bound_does_not_filter() {
    let store = store();
    seeded(&store);

    let request = SearchRequest::builder().created_from(t(1)).build();

    assert!(store.search(&request).unwrap().is_empty());
}

#[test]
fn time_window_bounds_are_exclusive() {
    let store = store();
    seeded(&store);

    let request = SearchRequest::builder()
        .created_from(t(1))
        .created_to(t(3))
        .build();
    assert_eq!(ids(&store.search(&request).unwrap()), vec![2]);

    let widened = SearchRequest::builder()
        .created_from(t(1) - Duration::seconds(1))
        .created_to(t(3) + Duration::seconds(1))
        .build();
    assert_eq!(ids(&store.search(&widened).unwrap()), vec![1, 2, 3]);
}

#[test]
fn content_and_title_matching_is_case_sensitive() {
    let store = store();
    seeded(&store);

    let by_content = SearchRequest::builder().contains_contents(["World", "scratch"]).build();
    assert_eq!(ids(&store.search(&by_content).unwrap()), vec![3]);

    let by_title = SearchRequest::builder().title_prefixes(["intro"]).build();
    assert!(store.search(&by_title).unwrap().is_empty());
}

#[test]
fn search_accepts_json_requests() {
    let store = store();
    seeded(&store);

    let found = store
        .search_json(json!({
            "containsContents": ["world"],
            "createdFrom": "2024-01-01T12:00:00Z",
            "createdTo": "2024-01-05T00:00:00Z",
        }))
        .unwrap();

    assert_eq!(ids(&found), vec![1, 2, 3]);
}

#[test]
fn null_inputs_are_invalid_arguments() {
    let store = store();

    assert_eq!(
        store.save_json(serde_json::Value::Null).unwrap_err(),
        DocumentStoreError::InvalidArgument("document must not be null".to_string()),
    );
    assert!(matches!(
        store.search_json(serde_json::Value::Null).unwrap_err(),
        DocumentStoreError::InvalidArgument(_),
    ));
}

#[test]
fn save_json_assigns_ids_like_save() {
    let store = store();

    let saved = store
        .save_json(json!({
            "title": "Intro",
            "content": "body",
            "author": { "id": "a1", "name": "Ada" },
            "created": "2024-01-01T00:00:00Z",
        }))
        .unwrap();

    assert_eq!(saved.id(), Some("1"));
    assert_eq!(saved.created, t(1));
}

#[test]
fn lenient_lookups_return_none() {
    let store = store();
    seeded(&store);

    assert_eq!(store.find_by_id("abc").unwrap(), None);
    assert_eq!(store.find_by_id("9999").unwrap(), None);
    assert_eq!(store.find_by_id("").unwrap(), None);
    assert_eq!(store.find_by_id("-1").unwrap(), None);
}

#[test]
fn raw_expressions_reach_the_backend() {
    let store = store();
    seeded(&store);

    let found = store
        .query(&Filter::eq(Field::AuthorName, "Author a3").or(Filter::eq(Field::Id, "1")))
        .unwrap();

    assert_eq!(ids(&found), vec![1, 3]);
}

#[test]
fn stores_do_not_share_state() {
    let first = store();
    let second = store();

    first.save(doc("a1", "t", "c", t(1))).unwrap();

    assert!(second.is_empty().unwrap());
    assert_eq!(second.save(doc("a1", "t", "c", t(1))).unwrap().id(), Some("1"));
}

#[test]
fn config_loads_from_json() {
    let config = StoreConfig::from_json_str(r#"{ "match_mode": "all", "id_policy": "keep_counter" }"#)
        .unwrap();
    let store = store_with(config);

    assert_eq!(store.config().match_mode, MatchMode::All);
    assert_eq!(store.config().id_policy, IdPolicy::KeepCounter);
}
