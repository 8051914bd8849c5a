//! Response selection strategies.

use rand::seq::SliceRandom;

use banter_core::config::ResponseSelection;
use banter_core::conversation::Statement;
use banter_core::errors::{BanterError, BanterResult};

/// Pick one statement from the candidate pool.
///
/// `prompt_text` is the matched statement's text; the weighted strategy
/// uses each candidate's occurrence count toward that prompt as its weight.
/// When every weight is zero the weighted strategy degrades to uniform.
pub fn select_response(
    pool: &[Statement],
    strategy: ResponseSelection,
    prompt_text: &str,
) -> BanterResult<Statement> {
    let mut rng = rand::thread_rng();
    let selected = match strategy {
        ResponseSelection::Uniform => pool.choose(&mut rng),
        ResponseSelection::WeightedOccurrence => pool
            .choose_weighted(&mut rng, |statement| occurrence_toward(statement, prompt_text))
            .ok()
            .or_else(|| pool.choose(&mut rng)),
    };
    selected.cloned().ok_or(BanterError::EmptyDataset)
}

fn occurrence_toward(statement: &Statement, prompt_text: &str) -> u64 {
    statement
        .in_response_to()
        .iter()
        .find(|link| link.text() == prompt_text)
        .map(|link| u64::from(link.occurrence()))
        .unwrap_or(0)
}
