use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use zr_core::prelude::*;
use zr_core::LEGACY_REQUESTS_KEY;
use zr_requests::LibraryAccess;
use zr_schema::section_defaults;
use zr_test_utils::{fully_populated_store, legacy_manual_settings, sample_data_requests, RecordingStore};

#[test]
fn first_run_writes_every_section_default() {
    let mut store = RecordingStore::new();

    let result = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();

    assert_eq!(result.settings, merge(Some(&json!({}))).settings);
    assert_eq!(result.settings, get_defaults());
    assert_eq!(store.write_count(), SectionName::ALL.len());
    for section in SectionName::ALL {
        assert_eq!(store.entry(section.as_str()), Some(&section_defaults(section)));
    }
    assert!(result.requests.is_empty());
    assert_eq!(store.get_all_count(), 1);
}

#[test]
fn second_run_writes_nothing() {
    let mut store = RecordingStore::new();

    let first = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();
    store.reset_calls();
    let second = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();

    assert_eq!(store.write_count(), 0);
    assert_eq!(first.settings, second.settings);
}

#[test]
fn populated_store_is_idempotent() {
    let mut store = RecordingStore::with_entries(fully_populated_store());

    let first = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();
    let second = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();

    assert_eq!(store.write_count(), 0);
    assert!(store.get_calls().is_empty());
    assert_eq!(first, second);
}

#[test]
fn partial_section_stays_partial_in_store() {
    let mut store = RecordingStore::with_entries(json!({"annotations": {"use": "function"}}));

    let result = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();

    assert_eq!(result.settings.get("/annotations/func"), Some(&json!("")));
    assert_eq!(result.settings.get("/annotations/use"), Some(&json!("function")));
    assert_eq!(store.entry("annotations"), Some(&json!({"use": "function"})));
    assert!(!store.written_keys().contains(&"annotations"));
    assert_eq!(store.write_count(), SectionName::ALL.len() - 1);
}

#[test]
fn falsy_stored_values_survive_reconciliation() {
    let mut stored = fully_populated_store();
    stored["copy"]["template"] = json!("");
    stored["pageMenu"]["trigger"] = json!(false);
    stored["sciteBadge"]["tooltipSlide"] = json!(0);
    let mut store = RecordingStore::with_entries(stored);

    let result = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();

    assert_eq!(result.settings.get("/copy/template"), Some(&json!("")));
    assert_eq!(result.settings.get("/pageMenu/trigger"), Some(&json!(false)));
    assert_eq!(result.settings.get("/sciteBadge/tooltipSlide"), Some(&json!(0)));
}

#[test]
fn depot_requests_are_deduplicated() {
    let mut store = RecordingStore::with_entries(fully_populated_store());

    let requests = initialize(ExecutionContext::roam_depot(&mut store)).unwrap().requests;

    assert_eq!(requests.data_requests.len(), 3);
    assert_eq!(requests.api_keys, vec!["K1", "K2"]);
    assert_eq!(
        requests.libraries,
        vec![
            LibraryAccess { path: "users/123".into(), apikey: "K1".into() },
            LibraryAccess { path: "groups/456".into(), apikey: "K1".into() },
            LibraryAccess { path: "users/123".into(), apikey: "K2".into() },
        ]
    );
}

#[test]
fn depot_accepts_bare_request_array() {
    let mut stored = fully_populated_store();
    stored["requests"] = sample_data_requests();
    let mut store = RecordingStore::with_entries(stored);

    let result = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();
    assert_eq!(result.requests.len(), 3);
}

#[test]
fn legacy_context_reads_top_level_requests() {
    let result = initialize(ExecutionContext::legacy(legacy_manual_settings())).unwrap();

    assert_eq!(result.requests.data_requests.len(), 1);
    assert_eq!(result.requests.api_keys, vec!["K"]);
    assert_eq!(result.settings.get("/other/autoload"), Some(&json!(true)));
    assert!(result.written_sections.is_empty());
    assert!(result.settings.as_map().contains_key(LEGACY_REQUESTS_KEY));
}

#[test]
fn host_write_between_snapshot_and_write_back_wins() {
    struct RacingStore {
        inner: RecordingStore,
    }

    impl SettingsAccessor for RacingStore {
        fn get_all(&self) -> Result<Option<Value>, AccessorError> {
            self.inner.get_all()
        }

        fn get(&self, key: &str) -> Result<Option<Value>, AccessorError> {
            if key == "metadata" {
                return Ok(Some(json!({"use": "smartblock"})));
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: Value) -> Result<(), AccessorError> {
            self.inner.set(key, value)
        }
    }

    let mut stored = fully_populated_store();
    stored.as_object_mut().unwrap().remove("metadata");
    let mut store = RacingStore {
        inner: RecordingStore::with_entries(stored),
    };

    let result = initialize(ExecutionContext::roam_depot(&mut store)).unwrap();

    assert!(result.written_sections.is_empty());
    assert_eq!(store.inner.write_count(), 0);
}

#[test]
fn failed_write_back_aborts() {
    let mut store = RecordingStore::new().failing_writes();

    let err = initialize(ExecutionContext::roam_depot(&mut store)).unwrap_err();

    assert!(matches!(err, ReconcileError::WriteBack { section: SectionName::Annotations, .. }));
}

#[test]
fn resolve_then_initialize() {
    let mut store = RecordingStore::with_entries(fully_populated_store());
    let context = ExecutionContext::resolve(Some(&mut store), Some(legacy_manual_settings())).unwrap();

    let result = Reconciler::new(ReconcileConfig::dry_run()).initialize(context).unwrap();
    assert_eq!(result.requests.len(), 3);

    let err = ExecutionContext::resolve(None, None).unwrap_err();
    assert!(matches!(err, ReconcileError::Configuration(_)));
}
