use indexmap::IndexMap;
use locres::{AggregateDictionary, Culture, Dictionary, ResourceDictionary, ResourceError};

fn culture(tag: &str) -> Culture {
    tag.parse().expect("valid culture")
}

fn dictionary(tag: &str, values: &[(&str, &str)]) -> Dictionary {
    let values: IndexMap<String, String> = values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Dictionary::new(culture(tag), values)
}

#[test]
fn merges_dictionaries_of_the_same_culture() {
    let aggregate = AggregateDictionary::new(culture("en-US"));
    aggregate
        .add(&dictionary("en-US", &[("Key1", "Value1"), ("Key2", "Value2")]))
        .expect("add first");

    assert_eq!(aggregate.len().unwrap(), 2);
    assert_eq!(aggregate.get("Key1").unwrap().as_deref(), Some("Value1"));
    assert_eq!(aggregate.get("Key2").unwrap().as_deref(), Some("Value2"));
}

#[test]
fn last_write_wins_and_keys_are_united() {
    let aggregate = AggregateDictionary::new(culture("en"));
    aggregate
        .add(&dictionary("en", &[("Title", "First"), ("Only:First", "a")]))
        .expect("add first");
    aggregate
        .add(&dictionary("en", &[("Title", "Second"), ("Only:Second", "b")]))
        .expect("add second");

    assert_eq!(aggregate.len().unwrap(), 3);
    assert_eq!(aggregate.get("Title").unwrap().as_deref(), Some("Second"));
    assert_eq!(aggregate.get("Only:First").unwrap().as_deref(), Some("a"));
    assert_eq!(aggregate.get("Only:Second").unwrap().as_deref(), Some("b"));
}

#[test]
fn rejects_other_cultures_without_mutation() {
    let aggregate = AggregateDictionary::new(culture("en-US"));
    aggregate
        .add(&dictionary("en-US", &[("Key1", "Value1")]))
        .expect("add same culture");

    let err = aggregate
        .add(&dictionary("cs-CZ", &[("Key1", "Hodnota"), ("Key2", "Jiná")]))
        .expect_err("different culture must fail");

    match err {
        ResourceError::CultureConflict { expected, found } => {
            assert_eq!(expected, culture("en-US"));
            assert_eq!(found, culture("cs-CZ"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(aggregate.len().unwrap(), 1);
    assert_eq!(aggregate.get("Key1").unwrap().as_deref(), Some("Value1"));
}

#[test]
fn parent_culture_is_a_different_culture() {
    let aggregate = AggregateDictionary::new(culture("en"));
    let err = aggregate
        .add(&dictionary("en-GB", &[("Colour", "Colour")]))
        .expect_err("en-GB is not en");
    assert!(matches!(err, ResourceError::CultureConflict { .. }));
}

#[test]
fn culture_tags_are_normalized_before_comparison() {
    let aggregate = AggregateDictionary::new(culture("en-us"));
    aggregate
        .add(&dictionary("EN_US", &[("Key", "Value")]))
        .expect("same culture in another spelling");
    assert_eq!(aggregate.culture().to_string(), "en-US");
}

#[test]
fn keys_match_case_insensitively() {
    let aggregate = AggregateDictionary::new(culture("de"));
    aggregate
        .add(&dictionary("de", &[("Search:Label", "Suche")]))
        .expect("add first");
    aggregate
        .add(&dictionary("de", &[("SEARCH:label", "Suchen")]))
        .expect("add second");

    assert_eq!(aggregate.len().unwrap(), 1);
    assert_eq!(aggregate.get("search:LABEL").unwrap().as_deref(), Some("Suchen"));
    assert!(aggregate.contains_key("Search:Label").unwrap());
    assert_eq!(aggregate.keys().unwrap(), ["Search:Label"]);
}

#[test]
fn non_ascii_keys_fold_too() {
    let aggregate = AggregateDictionary::new(culture("tr"));
    aggregate
        .add(&dictionary("tr", &[("ÇIKIŞ", "Çıkış")]))
        .expect("add");
    assert_eq!(aggregate.get("çikiş").unwrap().as_deref(), Some("Çıkış"));
}

#[test]
fn snapshot_is_an_ordered_copy() {
    let aggregate = AggregateDictionary::new(culture("en"));
    aggregate
        .add(&dictionary("en", &[("B", "b"), ("A", "a")]))
        .expect("add");

    let snapshot = aggregate.snapshot().expect("snapshot");
    aggregate.add(&dictionary("en", &[("C", "c")])).expect("add more");

    assert_eq!(snapshot.culture(), &culture("en"));
    let keys: Vec<&str> = snapshot.values().keys().map(String::as_str).collect();
    assert_eq!(keys, ["B", "A"]);
    assert_eq!(aggregate.len().unwrap(), 3);
}

#[test]
fn empty_aggregate() {
    let aggregate = AggregateDictionary::new(culture("en"));
    assert!(aggregate.is_empty().unwrap());
    assert_eq!(aggregate.get("Anything").unwrap(), None);
}
