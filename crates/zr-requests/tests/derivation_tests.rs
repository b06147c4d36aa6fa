use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{json, Value};
use zr_requests::{derive_requests, derive_requests_detailed, LibraryAccess, RequestEntryError};

#[test]
fn shared_keys_and_paths_dedup() {
    let raw = json!({"dataRequests": [
        {"apikey": "K1", "dataURI": "users/123/items", "name": "Mine"},
        {"apikey": "K1", "dataURI": "groups/456/items", "name": "Lab"},
        {"apikey": "K2", "dataURI": "users/123/items/top", "name": "Mine (top)"}
    ]});
    let requests = derive_requests(&raw);

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
fn same_library_same_key_listed_once() {
    let raw = json!([
        {"apikey": "K1", "dataURI": "users/123/items"},
        {"apiKey": "K1", "dataURI": "users/123/collections/ABC/items"}
    ]);
    let requests = derive_requests(&raw);

    assert_eq!(requests.data_requests.len(), 2);
    assert_eq!(requests.libraries.len(), 1);
    assert_eq!(requests.api_keys, vec!["K1"]);
}

#[test]
fn one_bad_entry_does_not_block_the_rest() {
    let raw = json!([
        {"apikey": "K", "dataURI": "users/1/items"},
        {"apikey": "K", "dataURI": "not-a-library"},
        {"apikey": "K", "dataURI": "groups/2/items"}
    ]);
    let derived = derive_requests_detailed(&raw);

    assert_eq!(derived.collection.len(), 2);
    assert_eq!(derived.rejected.len(), 1);
    assert!(matches!(
        &derived.rejected[0],
        RequestEntryError::UnresolvableLibrary { index: 1, data_uri, .. } if data_uri == "not-a-library"
    ));
}

#[test]
fn normalized_output_derives_to_itself() {
    let raw = json!([
        {"apikey": "K1", "dataURI": "users/1/items", "name": "A"},
        {"apikey": "K2", "dataURI": "groups/2/items/top", "name": "B"}
    ]);
    let first = derive_requests(&raw);
    let stored = serde_json::to_value(&first).unwrap();
    let second = derive_requests(&stored);

    assert_eq!(first, second);
}

fn raw_entry() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("K1"), Just("K2"), Just("K3"), Just("")],
        prop_oneof![Just("users"), Just("groups"), Just("orgs")],
        1u32..4,
        any::<bool>(),
    )
        .prop_map(|(key, kind, id, camel)| {
            let field = if camel { "apiKey" } else { "apikey" };
            json!({ field: key, "dataURI": format!("{kind}/{id}/items") })
        })
}

proptest! {
    #[test]
    fn prop_derived_sets_are_consistent(entries in proptest::collection::vec(raw_entry(), 0..12)) {
        let derived = derive_requests_detailed(&Value::Array(entries.clone()));
        let requests = &derived.collection;

        prop_assert_eq!(requests.len() + derived.rejected.len(), entries.len());

        let keys: HashSet<_> = requests.api_keys.iter().collect();
        prop_assert_eq!(keys.len(), requests.api_keys.len());

        let pairs: HashSet<_> = requests.libraries.iter().collect();
        prop_assert_eq!(pairs.len(), requests.libraries.len());

        for request in &requests.data_requests {
            prop_assert!(keys.contains(&request.apikey));
            let pair = LibraryAccess {
                path: request.library.path.clone(),
                apikey: request.apikey.clone(),
            };
            prop_assert!(requests.libraries.contains(&pair));
        }
    }
}
