//! Property tests: update→find roundtrip, dedup under repeated learning.

use proptest::prelude::*;

use banter_core::conversation::{ResponseLink, Statement};
use banter_core::traits::IStatementStorage;
use banter_storage::{InMemoryStorage, SqliteStorage};

proptest! {
    #[test]
    fn prop_update_find_roundtrip(
        text in "[a-zA-Z0-9 ]{1,60}",
        prompts in proptest::collection::btree_set("[a-z ]{1,20}", 0..8)
    ) {
        let storage = SqliteStorage::open_in_memory().unwrap();

        let mut statement = Statement::new(&text);
        for prompt in &prompts {
            statement.add_response(ResponseLink::new(prompt));
        }
        storage.update(&statement).unwrap();

        let stored = storage.find(&text).unwrap().unwrap();
        prop_assert_eq!(stored.text(), text.as_str());

        // The prompt set survives; if text collides with one of its own
        // prompts the self-link still counts once.
        prop_assert_eq!(stored.in_response_to().len(), prompts.len());
        for prompt in &prompts {
            prop_assert!(stored.responds_to(prompt));
        }
    }

    #[test]
    fn prop_repeated_updates_never_duplicate_rows(
        rounds in 1usize..6,
        prompts in proptest::collection::vec("[a-z]{1,10}", 1..5)
    ) {
        let storage = InMemoryStorage::new();

        for _ in 0..rounds {
            let mut statement = Statement::new("reply");
            for prompt in &prompts {
                statement.add_response(ResponseLink::new(prompt));
            }
            storage.update(&statement).unwrap();
        }

        // One row for the reply plus one per distinct prompt.
        let mut distinct = prompts.clone();
        distinct.sort();
        distinct.dedup();
        let expected = distinct.len() + if distinct.iter().any(|p| p == "reply") { 0 } else { 1 };
        prop_assert_eq!(storage.count().unwrap(), expected);
    }
}
