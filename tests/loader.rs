use locres::l10n::format::json;
use locres::{Culture, Dictionary, DictionaryLoader, ResourceDictionary, ResourceError, Resources, Xml};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures");
    for part in parts {
        p.push(part);
    }
    p
}

fn culture(tag: &str) -> Culture {
    tag.parse().expect("valid culture")
}

#[test]
fn loads_json_and_xml_from_a_folder() {
    let resources = Resources::new();
    DictionaryLoader::new(&resources, fixture_path(&[]))
        .expect("loader")
        .load_json("dictionaries")
        .expect("load json")
        .load_xml("dictionaries")
        .expect("load xml");

    let tags: Vec<String> = resources.cultures().unwrap().iter().map(Culture::to_string).collect();
    assert_eq!(tags, ["cs-CZ", "en", "en-US"]);

    assert_eq!(
        resources.get(&culture("cs-CZ"), "Search:Label").unwrap().as_deref(),
        Some("Hledat")
    );
    assert_eq!(
        resources.get(&culture("en-US"), "Title").unwrap().as_deref(),
        Some("Application Title (US)")
    );
    assert_eq!(
        resources.get(&culture("en-GB"), "Admin/Title").unwrap().as_deref(),
        Some("Administration")
    );
}

#[test]
fn pattern_selects_files() {
    let resources = Resources::new();
    DictionaryLoader::new(&resources, fixture_path(&[]))
        .unwrap()
        .load_json("dictionaries")
        .unwrap();

    let tags: Vec<String> = resources.cultures().unwrap().iter().map(Culture::to_string).collect();
    assert_eq!(tags, ["en", "en-US"], "xml and txt files must be skipped");
}

#[test]
fn files_are_merged_in_file_name_order() {
    let resources = Resources::new();
    DictionaryLoader::new(&resources, fixture_path(&[]))
        .unwrap()
        .load_json("dictionaries")
        .unwrap();

    // admin/en.json is visited before en.json: its key spelling stays, the value is replaced
    let en = resources.dictionary(&culture("en")).unwrap();
    assert_eq!(en.get("Search:Label").unwrap().as_deref(), Some("Search"));
    assert!(en.keys().unwrap().contains(&"search:label".to_string()));
    assert_eq!(en.len().unwrap(), 3);
}

#[test]
fn absolute_folder_ignores_root() {
    let resources = Resources::new();
    DictionaryLoader::new(&resources, "/nonexistent-root")
        .unwrap()
        .load::<Xml>(fixture_path(&["dictionaries"]))
        .expect("absolute folder");

    assert_eq!(resources.cultures().unwrap(), [culture("cs-CZ")]);
}

#[test]
fn relative_folder_is_joined_to_root() {
    let resources = Resources::new();
    let loader = DictionaryLoader::new(&resources, fixture_path(&["dictionaries"])).unwrap();
    assert_eq!(loader.root(), fixture_path(&["dictionaries"]));

    loader.load_json("admin").unwrap();
    assert_eq!(resources.cultures().unwrap(), [culture("en")]);
    assert_eq!(resources.dictionary(&culture("en")).unwrap().len().unwrap(), 2);
}

#[test]
fn blank_root_is_rejected() {
    let resources = Resources::new();
    assert!(matches!(DictionaryLoader::new(&resources, ""), Err(ResourceError::InvalidRoot)));
    assert!(matches!(DictionaryLoader::new(&resources, "  "), Err(ResourceError::InvalidRoot)));
}

#[test]
fn invalid_pattern_is_rejected() {
    let resources = Resources::new();
    let loader = DictionaryLoader::new(&resources, fixture_path(&[])).unwrap();
    let err = loader
        .load_with("dictionaries", "*.{json", |r| json::load(r))
        .expect_err("unclosed alternate group");
    assert!(matches!(err, ResourceError::InvalidPattern(_)), "unexpected error: {}", err);
}

#[test]
fn missing_folder_is_an_io_error() {
    let resources = Resources::new();
    let loader = DictionaryLoader::new(&resources, fixture_path(&[])).unwrap();
    let err = loader.load_json("does-not-exist").expect_err("missing folder");
    assert!(matches!(err, ResourceError::Io(_)), "unexpected error: {}", err);
}

#[test]
fn failing_file_stops_the_walk() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("a.json"), r#"{"culture":"en","A":"a"}"#).unwrap();
    fs::write(dir.path().join("b.json"), r#"{"culture":"en","B":true}"#).unwrap();
    fs::write(dir.path().join("c.json"), r#"{"culture":"en","C":"c"}"#).unwrap();

    let resources = Resources::new();
    let err = DictionaryLoader::new(&resources, dir.path())
        .unwrap()
        .load_json(".")
        .expect_err("b.json must fail");

    match &err {
        ResourceError::Load { path, source } => {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("b.json"));
            assert!(matches!(**source, ResourceError::Format(_)), "source: {}", source);
        }
        other => panic!("unexpected error: {}", other),
    }

    let en = resources.dictionary(&culture("en")).unwrap();
    assert_eq!(en.get("A").unwrap().as_deref(), Some("a"));
    assert_eq!(en.get("C").unwrap(), None);
}

#[test]
fn custom_parser() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("de.txt"), "Title=Titel\nSearch:Label=Suche\n").unwrap();
    fs::write(dir.path().join("ignored.json"), "not json").unwrap();

    let parse_lines = |reader: &mut dyn Read| -> locres::Result<Dictionary> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let values = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Ok(Dictionary::new(culture("de"), values))
    };

    let resources = Resources::new();
    DictionaryLoader::new(&resources, dir.path())
        .unwrap()
        .load_with(".", "*.txt", parse_lines)
        .expect("custom format");

    let de = resources.dictionary(&culture("de")).unwrap().snapshot().unwrap();
    assert_eq!(de.culture(), &culture("de"));
    assert_eq!(de.get("Search:Label"), Some("Suche"));
    assert_eq!(de.len(), 2);
}
