//! Property tests: link dedup invariant, serialize→from_value roundtrip.

use proptest::prelude::*;

use banter_core::conversation::{ResponseLink, Statement};

proptest! {
    #[test]
    fn prop_links_stay_deduplicated(
        prompts in proptest::collection::vec("[a-z ]{1,20}", 0..30)
    ) {
        let mut statement = Statement::new("reply");
        for prompt in &prompts {
            statement.add_response(ResponseLink::new(prompt));
        }

        // At most one link per distinct prompt text.
        let mut seen: Vec<&str> = statement
            .in_response_to()
            .iter()
            .map(|link| link.text())
            .collect();
        seen.sort_unstable();
        let before = seen.len();
        seen.dedup();
        prop_assert_eq!(before, seen.len());

        // Total occurrences equal the number of recordings.
        let total: u64 = statement
            .in_response_to()
            .iter()
            .map(|link| u64::from(link.occurrence()))
            .sum();
        prop_assert_eq!(total, prompts.len() as u64);
    }

    #[test]
    fn prop_serialize_roundtrip(
        text in "[a-zA-Z0-9 ]{1,40}",
        prompts in proptest::collection::vec(("[a-z ]{1,20}", 1u32..50), 0..10)
    ) {
        let mut statement = Statement::new(&text);
        for (prompt, occurrence) in &prompts {
            statement.upsert_response(ResponseLink::with_occurrence(prompt, *occurrence));
        }

        let restored = Statement::from_value(statement.serialize()).unwrap();
        prop_assert_eq!(restored.text(), statement.text());
        prop_assert_eq!(
            restored.in_response_to().len(),
            statement.in_response_to().len()
        );
        for (restored_link, original_link) in restored
            .in_response_to()
            .iter()
            .zip(statement.in_response_to())
        {
            prop_assert_eq!(restored_link.text(), original_link.text());
            prop_assert_eq!(restored_link.occurrence(), original_link.occurrence());
        }
    }
}
