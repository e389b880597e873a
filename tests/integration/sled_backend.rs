//! Integration tests for sled-backed frames

use super::test_utils::relations;
use semframe::config::{SemframeConfig, StorageBackend};
use semframe::manager::DEFAULT_NAMESPACE;
use semframe::store::{SledStore, TripleStore};
use semframe::uri::UriGenerator;
use semframe::vocab::{RDFS_SUBCLASS_OF, RDF_TYPE};
use semframe::{FrameManager, InferencePolicy, Proposition, SledFrameFactory};
use std::sync::Arc;
use tempfile::TempDir;

fn sled_config(temp_dir: &TempDir) -> SemframeConfig {
    let mut config = SemframeConfig::default();
    config.storage.backend = StorageBackend::Sled;
    config.storage.path = temp_dir.path().join("store");
    config
}

fn has_tree(db: &sled::Db, name: &str) -> bool {
    db.tree_names()
        .iter()
        .any(|tree| tree.as_ref() == name.as_bytes())
}

#[test]
fn test_manager_from_sled_config() {
    let temp_dir = TempDir::new().unwrap();
    let manager = FrameManager::from_config(&sled_config(&temp_dir)).unwrap();

    let frame = manager.create_frame(None).unwrap();
    let sem = frame.create_sem("T", "Dog", "A canine", None).unwrap();

    assert_eq!(frame.size().unwrap(), 3);
    assert!(frame.knows(&sem).unwrap());
    assert!(temp_dir.path().join("store").exists());
}

#[test]
fn test_sled_frames_are_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let manager = FrameManager::from_config(&sled_config(&temp_dir)).unwrap();

    let f1 = manager
        .create_frame(Some(&relations(&[("urn:a", "urn:p", "urn:b")])))
        .unwrap();
    let f2 = manager.create_frame(None).unwrap();

    assert_eq!(f1.size().unwrap(), 1);
    assert_eq!(f2.size().unwrap(), 0);

    assert_eq!(f2.bind_knowledge(f1.uri()).unwrap(), 1);
    assert_eq!(f2.unbind_knowledge(f1.uri()).unwrap(), 1);
    assert_eq!(f1.size().unwrap(), 1);
}

#[test]
fn test_sled_frames_apply_inference() {
    let temp_dir = TempDir::new().unwrap();
    let manager = FrameManager::from_config(&sled_config(&temp_dir)).unwrap();
    let frame = manager
        .create_frame(Some(&relations(&[
            ("urn:Dog", RDFS_SUBCLASS_OF, "urn:Animal"),
            ("urn:rex", RDF_TYPE, "urn:Dog"),
        ])))
        .unwrap();

    assert_eq!(frame.size().unwrap(), 3);
    assert!(frame
        .knowledge()
        .unwrap()
        .contains(&Proposition::relation("urn:rex", RDF_TYPE, "urn:Animal")));
}

#[test]
fn test_removing_sled_frame_drops_its_tree() {
    let temp_dir = TempDir::new().unwrap();
    let factory = Arc::new(
        SledFrameFactory::open(temp_dir.path().join("store"), InferencePolicy::None).unwrap(),
    );
    let manager = FrameManager::with_factory(DEFAULT_NAMESPACE, factory.clone()).unwrap();

    let frame = manager
        .create_frame(Some(&relations(&[("urn:a", "urn:p", "urn:b")])))
        .unwrap();
    let tree = SledStore::tree_name(frame.uri());
    assert!(has_tree(factory.db(), &tree));

    manager.remove_frame(frame.uri()).unwrap();
    assert!(!has_tree(factory.db(), &tree));
}

#[test]
fn test_sled_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store");
    let frame_uri = "http://example.org/frames#1";

    {
        let db = sled::open(&path).unwrap();
        let mut store = SledStore::open(&db, frame_uri).unwrap();
        store
            .insert(&relations(&[("urn:a", "urn:p", "urn:b"), ("urn:b", "urn:p", "urn:c")]))
            .unwrap();
        store.flush().unwrap();
    }

    let db = sled::open(&path).unwrap();
    let store = SledStore::open(&db, frame_uri).unwrap();
    assert_eq!(store.size().unwrap(), 2);
    assert_eq!(
        store.statements().unwrap(),
        relations(&[("urn:a", "urn:p", "urn:b"), ("urn:b", "urn:p", "urn:c")])
    );
}

/// Always issues the same frame URI, as a restarted process might.
struct RepeatingUriGenerator;

impl UriGenerator for RepeatingUriGenerator {
    fn generate(&self, prefix: &str) -> String {
        format!("{}#42", prefix)
    }
}

fn repeating_sled_manager(path: &std::path::Path) -> FrameManager {
    let factory = Arc::new(SledFrameFactory::open(path, InferencePolicy::None).unwrap());
    FrameManager::with_factory("urn:ns", factory)
        .unwrap()
        .with_uri_generator(Arc::new(RepeatingUriGenerator))
}

#[test]
fn test_reissued_uri_starts_with_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store");

    {
        let manager = repeating_sled_manager(&path);
        let frame = manager.create_frame(None).unwrap();
        frame.learn_statement("urn:a", "urn:p", "urn:b").unwrap();
        frame.create_sem("T", "Dog", "A canine", None).unwrap();
        assert_eq!(frame.size().unwrap(), 4);
    }

    let manager = repeating_sled_manager(&path);
    let frame = manager.create_frame(None).unwrap();
    assert_eq!(frame.uri(), "urn:ns#42");
    assert_eq!(frame.size().unwrap(), 0);

    let seeded = relations(&[("urn:x", "urn:p", "urn:y")]);
    manager.remove_frame(frame.uri()).unwrap();
    drop(manager);

    let manager = repeating_sled_manager(&path);
    let frame = manager.create_frame(Some(&seeded)).unwrap();
    assert_eq!(frame.knowledge().unwrap(), seeded);
}
