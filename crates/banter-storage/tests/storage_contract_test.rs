//! Integration test: the storage contract, exercised against both backends.

use banter_core::conversation::{ResponseLink, Statement};
use banter_core::errors::BanterError;
use banter_core::traits::{FilterSpec, IStatementStorage};
use banter_storage::{InMemoryStorage, SqliteStorage};
use serde_json::json;

fn backends() -> Vec<(&'static str, Box<dyn IStatementStorage>)> {
    vec![
        ("sqlite", Box::new(SqliteStorage::open_in_memory().unwrap())),
        ("in-memory", Box::new(InMemoryStorage::new())),
    ]
}

fn statement_with_response(text: &str, prompt: &str) -> Statement {
    let mut statement = Statement::new(text);
    statement.add_response(ResponseLink::new(prompt));
    statement
}

#[test]
fn fresh_storage_is_empty() {
    for (name, storage) in backends() {
        assert_eq!(storage.count().unwrap(), 0, "backend: {name}");
        assert!(storage.find("anything").unwrap().is_none(), "backend: {name}");
        assert!(
            storage.filter(&FilterSpec::All).unwrap().is_empty(),
            "backend: {name}"
        );
        assert!(
            matches!(storage.get_random(), Err(BanterError::EmptyDataset)),
            "backend: {name}"
        );
    }
}

#[test]
fn update_then_find_round_trips_links_and_extra() {
    for (name, storage) in backends() {
        let mut statement = Statement::new("fine thanks");
        statement.add_response(ResponseLink::with_occurrence("how are you", 3));
        statement.add_response(ResponseLink::new("all good?"));
        statement.set_extra("speaker", json!("bot"));

        storage.update(&statement).unwrap();

        let stored = storage.find("fine thanks").unwrap().unwrap();
        assert_eq!(stored.in_response_to().len(), 2, "backend: {name}");
        assert_eq!(stored.in_response_to()[0].text(), "how are you");
        assert_eq!(stored.in_response_to()[0].occurrence(), 3);
        assert_eq!(stored.in_response_to()[1].text(), "all good?");
        assert_eq!(stored.in_response_to()[1].occurrence(), 1);
        assert_eq!(stored.extra("speaker"), Some(&json!("bot")), "backend: {name}");
    }
}

#[test]
fn update_replaces_occurrence_instead_of_adding() {
    for (name, storage) in backends() {
        let mut statement = Statement::new("yes");
        statement.add_response(ResponseLink::with_occurrence("ready?", 5));
        storage.update(&statement).unwrap();

        let mut replacement = Statement::new("yes");
        replacement.add_response(ResponseLink::with_occurrence("ready?", 2));
        storage.update(&replacement).unwrap();

        let stored = storage.find("yes").unwrap().unwrap();
        assert_eq!(stored.in_response_to()[0].occurrence(), 2, "backend: {name}");
    }
}

#[test]
fn update_merge_preserves_stored_links_missing_from_incoming() {
    for (name, storage) in backends() {
        storage
            .update(&statement_with_response("sure", "coming?"))
            .unwrap();
        storage
            .update(&statement_with_response("sure", "lunch?"))
            .unwrap();

        let stored = storage.find("sure").unwrap().unwrap();
        assert!(stored.responds_to("coming?"), "backend: {name}");
        assert!(stored.responds_to("lunch?"), "backend: {name}");
    }
}

#[test]
fn update_upserts_referenced_prompts_as_statements() {
    for (name, storage) in backends() {
        storage
            .update(&statement_with_response("hi there", "hello"))
            .unwrap();

        assert_eq!(storage.count().unwrap(), 2, "backend: {name}");
        let prompt = storage.find("hello").unwrap();
        assert!(prompt.is_some(), "backend: {name}");
        assert!(prompt.unwrap().in_response_to().is_empty(), "backend: {name}");
    }
}

#[test]
fn filter_by_text_matches_exactly() {
    for (name, storage) in backends() {
        storage.update(&Statement::new("hello")).unwrap();
        storage.update(&Statement::new("hello there")).unwrap();

        let matches = storage
            .filter(&FilterSpec::ByText("hello".to_string()))
            .unwrap();
        assert_eq!(matches.len(), 1, "backend: {name}");
        assert_eq!(matches[0].text(), "hello");
    }
}

#[test]
fn filter_in_response_to_finds_all_replies() {
    for (name, storage) in backends() {
        storage
            .update(&statement_with_response("hi there", "hello"))
            .unwrap();
        storage
            .update(&statement_with_response("hey", "hello"))
            .unwrap();
        storage
            .update(&statement_with_response("not much", "what's up"))
            .unwrap();

        let replies = storage
            .filter(&FilterSpec::InResponseTo("hello".to_string()))
            .unwrap();
        let texts: Vec<&str> = replies.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["hey", "hi there"], "backend: {name}");
    }
}

#[test]
fn response_statements_require_a_recorded_reply() {
    for (name, storage) in backends() {
        // "hello" has a reply on record, "hi there" does not.
        storage
            .update(&statement_with_response("hi there", "hello"))
            .unwrap();

        let eligible = storage.get_response_statements().unwrap();
        let texts: Vec<&str> = eligible.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["hello"], "backend: {name}");
    }
}

#[test]
fn get_random_returns_the_only_statement() {
    for (name, storage) in backends() {
        storage.update(&Statement::new("solo")).unwrap();
        assert_eq!(storage.get_random().unwrap().text(), "solo", "backend: {name}");
    }
}

#[test]
fn remove_deletes_links_from_both_endpoints() {
    for (name, storage) in backends() {
        storage
            .update(&statement_with_response("hi there", "hello"))
            .unwrap();

        // Removing the prompt side must clear the link held by the reply.
        storage.remove("hello").unwrap();
        assert!(storage.find("hello").unwrap().is_none(), "backend: {name}");
        let reply = storage.find("hi there").unwrap().unwrap();
        assert!(reply.in_response_to().is_empty(), "backend: {name}");
        assert!(
            storage.get_response_statements().unwrap().is_empty(),
            "backend: {name}"
        );
    }
}

#[test]
fn drop_all_leaves_nothing_behind() {
    for (name, storage) in backends() {
        storage
            .update(&statement_with_response("hi there", "hello"))
            .unwrap();
        storage.drop_all().unwrap();

        assert_eq!(storage.count().unwrap(), 0, "backend: {name}");
        assert!(
            storage.filter(&FilterSpec::All).unwrap().is_empty(),
            "backend: {name}"
        );
    }
}

#[test]
fn read_only_storage_ignores_every_mutation() {
    let storage = InMemoryStorage::read_only();
    storage.update(&Statement::new("ignored")).unwrap();
    storage.remove("ignored").unwrap();
    storage.drop_all().unwrap();
    assert_eq!(storage.count().unwrap(), 0);
}
