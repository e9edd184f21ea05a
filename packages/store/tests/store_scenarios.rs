//! End-to-end store scenarios against a file-backed snapshot target.

use dntree_core::Attributes;
use dntree_store::{JsonSnapshotStore, StoreError, TreeError, TreeStore};
use serde_json::json;

fn attrs(key: &str, value: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(key.to_string(), json!(value));
    attributes
}

/// Bedding-sheet catalog: material branches under a Unicode root, color
/// and size levels below.
fn seed(store: &mut TreeStore<JsonSnapshotStore>) {
    for identifier in [
        "o=ผ้าปู,m=cotton",
        "o=ผ้าปู,m=silk",
        "o=ผ้าปู,m=wool",
        "o=ผ้าปู,m=linen",
        "o=ผ้าปู,m=cotton,c=white",
        "o=ผ้าปู,m=cotton,c=black",
        "o=ผ้าปู,m=silk,c=red",
        "o=ผ้าปู,m=cotton,c=white,s=king",
        "o=ผ้าปู,m=cotton,c=white,s=queen",
        "o=ผ้าปู,m=cotton,c=black,s=king",
    ] {
        store.insert(attrs("meta1", "meta_val"), identifier).unwrap();
    }
}

#[test]
fn full_lifecycle_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data.db");

    let mut store = TreeStore::create(
        JsonSnapshotStore::new(&db_path),
        Attributes::new(),
        "o=ผ้าปู",
    )
    .unwrap();
    seed(&mut store);
    assert_eq!(store.all_children().len(), 11);

    let expected = store.all_children();
    drop(store);

    // A reloaded store sees the identical tree, identities included.
    let reloaded = TreeStore::load(JsonSnapshotStore::new(&db_path), None).unwrap();
    assert_eq!(reloaded.all_children(), expected);

    let king = reloaded
        .query("o=ผ้าปู,m=cotton,c=white,s=king")
        .unwrap()
        .unwrap();
    assert_eq!(king.attributes().get("meta1"), Some(&json!("meta_val")));
}

#[test]
fn deletion_cascades_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data.db");

    let mut store = TreeStore::create(
        JsonSnapshotStore::new(&db_path),
        Attributes::new(),
        "o=ผ้าปู",
    )
    .unwrap();
    seed(&mut store);

    store.delete("o=ผ้าปู,m=cotton,c=white").unwrap();

    // The node and every descendant are gone.
    for query in [
        "o=ผ้าปู,m=cotton,c=white",
        "o=ผ้าปู,m=cotton,c=white,s=king",
        "o=ผ้าปู,m=cotton,c=white,s=queen",
    ] {
        assert!(store.query(query).unwrap().is_none());
    }
    // Siblings are untouched.
    assert!(store.query("o=ผ้าปู,m=cotton,c=black,s=king").unwrap().is_some());

    drop(store);
    let reloaded = TreeStore::load(JsonSnapshotStore::new(&db_path), None).unwrap();
    assert!(reloaded
        .query("o=ผ้าปู,m=cotton,c=white,s=king")
        .unwrap()
        .is_none());
    assert_eq!(reloaded.all_children().len(), 8);
}

#[test]
fn delete_prefers_exact_identifier_over_shared_trailing_pair() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TreeStore::create(
        JsonSnapshotStore::new(dir.path().join("data.db")),
        Attributes::new(),
        "o=root",
    )
    .unwrap();
    store.insert(Attributes::new(), "o=root,m=a").unwrap();
    store.insert(Attributes::new(), "o=root,m=b").unwrap();
    store.insert(attrs("branch", "a"), "o=root,m=a,c=x").unwrap();
    store.insert(attrs("branch", "b"), "o=root,m=b,c=x").unwrap();

    store.delete("o=root,m=b,c=x").unwrap();

    assert!(store.query("o=root,m=b,c=x").unwrap().is_none());
    let survivor = store.query("o=root,m=a,c=x").unwrap().unwrap();
    assert_eq!(survivor.attributes().get("branch"), Some(&json!("a")));
}

#[test]
fn load_auto_creates_root_for_fresh_target() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data.db");

    let store =
        TreeStore::load(JsonSnapshotStore::new(&db_path), Some("o=ผ้าปู")).unwrap();
    assert_eq!(store.root().identifier().to_string(), "o=ผ้าปู");
    assert!(db_path.exists());

    // Without a root identifier a fresh target is an error.
    let missing = TreeStore::load(JsonSnapshotStore::new(dir.path().join("other.db")), None);
    assert!(matches!(missing, Err(StoreError::NotFound)));
}

#[test]
fn tree_errors_pass_through_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TreeStore::create(
        JsonSnapshotStore::new(dir.path().join("data.db")),
        Attributes::new(),
        "o=root",
    )
    .unwrap();

    let err = store.insert(Attributes::new(), "o=root,m=a,c=1").unwrap_err();
    match err {
        StoreError::Tree(TreeError::ParentNotFound { identifier }) => {
            assert_eq!(identifier, "o=root,m=a,c=1");
        }
        other => panic!("expected ParentNotFound, got {other:?}"),
    }
}

#[test]
fn structure_and_rendering_reflect_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TreeStore::create(
        JsonSnapshotStore::new(dir.path().join("data.db")),
        Attributes::new(),
        "o=ผ้าปู",
    )
    .unwrap();
    seed(&mut store);

    assert_eq!(
        store.structure(),
        json!({
            "m=cotton": {
                "c=white": {
                    "s=king": [],
                    "s=queen": [],
                },
                "c=black": {
                    "s=king": [],
                },
            },
            "m=silk": {
                "c=red": [],
            },
            "m=wool": [],
            "m=linen": [],
        })
    );

    let outline = store.render_tree_compact();
    assert!(outline.starts_with("└── o=ผ้าปู\n"));
    assert!(outline.contains("├── m=cotton\n"));
    assert!(outline.contains("│   │   ├── s=king\n"));
    assert_eq!(outline.lines().count(), 11);
}
