mod common;

use common::{at, statement, MemoryStore};
use empathy_core::{
    CollectionStore, KeyValueStore, LoadStatus, NvcStatement, Slot, SqliteKvStore, StoreError,
};

#[test]
fn upsert_is_visible_immediately_and_persisted() {
    let store = MemoryStore::new();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);

    let upserted = statements.upsert_at(&store, statement("a", at(9, 0)), at(9, 0));
    assert!(!upserted.replaced);
    assert!(upserted.write.is_durable());
    assert_eq!(statements.find("a").unwrap().title, "Statement a");

    let raw = store.raw(Slot::NvcStatements.key()).expect("slot should be written");
    let persisted: Vec<NvcStatement> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, statements.list());
}

#[test]
fn removing_unknown_id_does_not_write() {
    let store = MemoryStore::new();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    statements.upsert_at(&store, statement("a", at(9, 0)), at(9, 0));
    let writes = store.writes();

    assert!(statements.remove(&store, "missing").is_none());
    assert_eq!(store.writes(), writes);
    assert_eq!(statements.len(), 1);

    let write = statements.remove(&store, "a").expect("existing id is removed");
    assert!(write.is_durable());
    assert!(statements.is_empty());
    assert_eq!(store.raw(Slot::NvcStatements.key()).as_deref(), Some("[]"));
}

#[test]
fn replacing_keeps_position_and_created_date() {
    let store = MemoryStore::new();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    statements.upsert_at(&store, statement("a", at(9, 0)), at(9, 0));
    statements.upsert_at(&store, statement("b", at(9, 5)), at(9, 5));

    let mut edited = statement("a", at(11, 0));
    edited.title = "Edited".to_string();
    // Same clock reading as creation: modified must still move forward.
    let upserted = statements.upsert_at(&store, edited, at(9, 0));

    assert!(upserted.replaced);
    assert_eq!(upserted.record.date_created, at(9, 0));
    assert!(upserted.record.date_modified > upserted.record.date_created);

    let ids: Vec<&str> = statements.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(statements.find("a").unwrap().title, "Edited");
}

#[test]
fn reload_from_sqlite_file_restores_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
        statements.upsert_at(&store, statement("first", at(8, 0)), at(8, 0));
        statements.upsert_at(&store, statement("second", at(8, 1)), at(8, 1));
    }

    let store = SqliteKvStore::open(&path).unwrap();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    assert_eq!(statements.load(&store), LoadStatus::Loaded(2));
    let ids: Vec<&str> = statements.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["first", "second"]);
}

#[test]
fn replacement_survives_reload_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.db");

    {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
        statements.upsert_at(&store, statement("first", at(8, 0)), at(8, 0));
        statements.upsert_at(&store, statement("second", at(8, 1)), at(8, 1));

        let mut edited = statement("first", at(12, 0));
        edited.request = "Could you text me next time?".to_string();
        assert!(statements.upsert_at(&store, edited, at(12, 0)).replaced);
    }

    let store = SqliteKvStore::open(&path).unwrap();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    assert_eq!(statements.load(&store), LoadStatus::Loaded(2));

    let ids: Vec<&str> = statements.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["first", "second"]);
    let first = statements.find("first").unwrap();
    assert_eq!(first.request, "Could you text me next time?");
    assert_eq!(first.date_created, at(8, 0));
    assert_eq!(first.date_modified, at(12, 0));
}

#[test]
fn editing_record_stamped_at_max_instant_keeps_it() {
    let store = MemoryStore::new();
    let mut seeded = serde_json::to_value(vec![statement("a", at(9, 0))]).unwrap();
    seeded[0]["dateModified"] = serde_json::json!("+262142-12-31T23:59:59.999999999Z");
    store.seed(Slot::NvcStatements.key(), &seeded.to_string());

    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    assert_eq!(statements.load(&store), LoadStatus::Loaded(1));
    let stored_modified = statements.find("a").unwrap().date_modified;

    let mut edited = statement("a", at(10, 0));
    edited.title = "Edited".to_string();
    let upserted = statements.upsert_at(&store, edited, at(10, 0));

    assert!(upserted.replaced);
    assert!(upserted.write.is_durable());
    assert_eq!(upserted.record.date_created, at(9, 0));
    assert_eq!(upserted.record.date_modified, stored_modified);
    assert_eq!(statements.find("a").unwrap().title, "Edited");
}

#[test]
fn absent_and_malformed_slots_load_empty() {
    let store = MemoryStore::new();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    assert_eq!(statements.load(&store), LoadStatus::Missing);

    statements.upsert_at(&store, statement("a", at(9, 0)), at(9, 0));
    store.seed(Slot::NvcStatements.key(), "{not json");
    assert_eq!(statements.load(&store), LoadStatus::Defaulted);
    assert!(statements.is_empty());
}

#[test]
fn unreadable_backend_loads_empty() {
    let store = MemoryStore::new();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);
    statements.upsert_at(&store, statement("a", at(9, 0)), at(9, 0));

    store.set_fail_reads(true);
    assert_eq!(statements.load(&store), LoadStatus::Defaulted);
    assert!(statements.is_empty());

    store.set_fail_reads(false);
    assert_eq!(statements.load(&store), LoadStatus::Loaded(1));
}

#[test]
fn failed_write_keeps_in_memory_state() {
    let store = MemoryStore::failing();
    let mut statements = CollectionStore::<NvcStatement>::new(Slot::NvcStatements);

    let upserted = statements.upsert_at(&store, statement("a", at(9, 0)), at(9, 0));
    assert!(!upserted.write.is_durable());
    assert_eq!(upserted.write.slot(), Slot::NvcStatements);
    assert!(statements.contains("a"));
    assert!(store.get(Slot::NvcStatements.key()).unwrap().is_none());

    match upserted.write.wait() {
        Err(StoreError::Unavailable(message)) => assert!(message.contains("nvc_statements")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
