//! Integration test: data survives close + reopen of the database file.

use banter_core::config::StorageConfig;
use banter_core::conversation::{ResponseLink, Statement};
use banter_core::traits::IStatementStorage;
use banter_storage::SqliteStorage;

#[test]
fn statements_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("banter.db");

    {
        let storage = SqliteStorage::open(&db_path).unwrap();
        let mut statement = Statement::new("hi there");
        statement.add_response(ResponseLink::with_occurrence("hello", 2));
        storage.update(&statement).unwrap();
    }

    let reopened = SqliteStorage::open(&db_path).unwrap();
    assert_eq!(reopened.count().unwrap(), 2);

    let stored = reopened.find("hi there").unwrap().unwrap();
    assert_eq!(stored.in_response_to().len(), 1);
    assert_eq!(stored.in_response_to()[0].text(), "hello");
    assert_eq!(stored.in_response_to()[0].occurrence(), 2);
}

#[test]
fn schema_init_is_idempotent_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("banter.db");

    for _ in 0..3 {
        let storage = SqliteStorage::open(&db_path).unwrap();
        storage.update(&Statement::new("still here")).unwrap();
    }

    let storage = SqliteStorage::open(&db_path).unwrap();
    assert_eq!(storage.count().unwrap(), 1);
}

#[test]
fn read_only_config_protects_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("banter.db");

    {
        let storage = SqliteStorage::open(&db_path).unwrap();
        storage.update(&Statement::new("seeded")).unwrap();
    }

    let config = StorageConfig {
        read_only: true,
        ..StorageConfig::default()
    };
    let guarded = SqliteStorage::open_with(&db_path, &config).unwrap();
    guarded.update(&Statement::new("intruder")).unwrap();
    guarded.remove("seeded").unwrap();
    guarded.drop_all().unwrap();

    assert_eq!(guarded.count().unwrap(), 1);
    assert!(guarded.find("intruder").unwrap().is_none());
    assert_eq!(guarded.find("seeded").unwrap().unwrap().text(), "seeded");
}
