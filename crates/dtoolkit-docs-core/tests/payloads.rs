//! Tests against the documentation payloads shipped in `docs/api`

use std::path::{Path, PathBuf};

use dtoolkit_docs_core::doc::{load, DocStore, FunctionType, ParseError, StoreError, SymbolKind};
use dtoolkit_docs_core::{PageRenderer, SiteConfig, SiteGenerator};

fn payload_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../docs/api")
}

fn payload_paths() -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(payload_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths
}

fn load_store() -> DocStore {
    DocStore::load_dir(payload_dir()).unwrap()
}

#[test]
fn loads_every_payload() {
    let store = load_store();
    assert_eq!(
        store.names().collect::<Vec<_>>(),
        vec![
            "BaseStorage",
            "Bind",
            "Color3Util",
            "Flow",
            "OrderedStorage",
            "Stopwatch",
            "Storage",
            "Timer",
            "Value",
        ]
    );
}

#[test]
fn timer_payload() {
    let raw = std::fs::read(payload_dir().join("Timer.json")).unwrap();
    let timer = load(&raw).unwrap();

    assert_eq!(timer.name, "Timer");
    let functions: Vec<_> = timer.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        functions,
        vec![
            "new",
            "Start",
            "Pause",
            "Stop",
            "IsRunning",
            "SetDuration",
            "GetRemaining",
            "Destroy",
            "withUpdate",
        ]
    );
    assert_eq!(timer.properties[0].name, "Finished");
    assert_eq!(timer.functions[0].function_type, FunctionType::Static);
    assert_eq!(timer.functions[0].returns[0].lua_type.raw(), "Timer\r\n");

    let updated = &timer.properties[2];
    assert_eq!(updated.name, "Updated");
    assert_eq!(updated.deprecated.as_ref().unwrap().version, "v2.0.0");

    let source = timer.source.as_ref().unwrap();
    assert_eq!(source.path, "lib/Timer.lua");
}

#[test]
fn payloads_round_trip() {
    for path in payload_paths() {
        let raw = std::fs::read(&path).unwrap();
        let entry = load(&raw).unwrap();

        let serialized = serde_json::to_vec(&entry).unwrap();
        assert_eq!(load(&serialized).unwrap(), entry, "{}", path.display());

        // Nothing is lost or invented on the way through the model
        let original: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        let reserialized: serde_json::Value = serde_json::from_slice(&serialized).unwrap();
        assert_eq!(original, reserialized, "{}", path.display());
    }
}

#[test]
fn member_order_is_preserved() {
    for path in payload_paths() {
        let raw = std::fs::read(&path).unwrap();
        let original: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        let entry = load(&raw).unwrap();

        let names = |section: &str| -> Vec<String> {
            original[section]
                .as_array()
                .unwrap()
                .iter()
                .map(|m| m["name"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(
            names("functions"),
            entry.functions.iter().map(|f| f.name.clone()).collect::<Vec<_>>()
        );
        assert_eq!(
            names("properties"),
            entry.properties.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
        );
        assert_eq!(
            names("types"),
            entry.types.iter().map(|t| t.name.clone()).collect::<Vec<_>>()
        );
    }
}

#[test]
fn lookup_not_found_on_timer_only_store() {
    let raw = std::fs::read(payload_dir().join("Timer.json")).unwrap();
    let store = DocStore::from_entries([load(&raw).unwrap()]).unwrap();

    assert!(store.lookup("DoesNotExist").is_none());
    assert_eq!(store.lookup("Timer").unwrap().name, "Timer");
}

#[test]
fn ignored_members_are_not_rendered() {
    let store = load_store();
    let config = SiteConfig::default();
    let renderer = PageRenderer::new(&store, &config);

    let color = store.lookup("Color3Util").unwrap();
    let hidden = color.functions.iter().find(|f| f.ignore).unwrap();
    let page = renderer.render_entry(color);
    assert!(!page.contains(&format!("id=\"function-{}\"", hidden.name)));
    assert!(store.resolve(&format!("Color3Util.{}", hidden.name)).is_none());

    let storage = renderer.render_symbol("Storage").unwrap();
    assert!(!storage.contains("id=\"type-SaveStatus\""));
    assert!(!storage.contains("id=\"type-LoadStatus\""));
    assert!(storage.contains("id=\"type-StorageType\""));
}

#[test]
fn cross_entry_references_resolve() {
    let store = load_store();

    let start = store.resolve("Timer:Start").unwrap();
    assert_eq!(start.kind, SymbolKind::Function);
    assert_eq!(start.link(), "Timer.html#function-Start");

    let style = store.resolve("Flow.Style").unwrap();
    assert_eq!(style.kind, SymbolKind::Type);
}

#[test]
fn malformed_payload_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(payload_dir().join("Timer.json"), dir.path().join("Timer.json")).unwrap();
    std::fs::write(dir.path().join("Broken.json"), r#"{"functions": []}"#).unwrap();
    std::fs::write(dir.path().join("README.md"), "not a payload").unwrap();

    let err = DocStore::load_dir(dir.path()).unwrap_err();
    match err {
        StoreError::Payload { path, source } => {
            assert!(path.ends_with("Broken.json"));
            assert!(matches!(source, ParseError::MissingField("name")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn payload_names_cannot_leave_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let payloads = dir.path().join("payloads");
    std::fs::create_dir(&payloads).unwrap();
    std::fs::write(payloads.join("Escaped.json"), r#"{"name": "../../escaped"}"#).unwrap();

    let err = DocStore::load_dir(&payloads).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Payload {
            source: ParseError::InvalidField("name"),
            ..
        }
    ));

    std::fs::write(payloads.join("Escaped.json"), r#"{"name": "Storage/Base"}"#).unwrap();
    let err = DocStore::load_dir(&payloads).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Payload {
            source: ParseError::InvalidField("name"),
            ..
        }
    ));
    assert!(!dir.path().join("escaped.html").exists());
}

#[test]
fn non_json_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(payload_dir().join("Timer.json"), dir.path().join("Timer.json")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a payload").unwrap();

    let store = DocStore::load_dir(dir.path()).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn generates_full_site() {
    let store = load_store();
    let config = SiteConfig::default();
    let dir = tempfile::tempdir().unwrap();

    let report = SiteGenerator::new(&store, &config).generate(dir.path()).unwrap();
    assert_eq!(report.pages, 9);

    let timer = std::fs::read_to_string(dir.path().join("api/Timer.html")).unwrap();
    assert!(timer.contains("<title>Timer | dToolkit</title>"));
    assert!(timer.contains("admonition-note"));
    assert!(timer.contains("<strong>Deprecated in v2.0.0</strong>"));

    let home = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert_eq!(home.matches("<div class=\"col col--4\">").count(), 3);

    let index = std::fs::read(dir.path().join("search-index.json")).unwrap();
    let index: serde_json::Value = serde_json::from_slice(&index).unwrap();
    assert!(index
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["link"] == "api/Timer.html#function-Start"));
}
