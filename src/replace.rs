use log::trace;

use crate::error::{Error, Result};
use crate::paragraph::contains;
use crate::runs::{Run, RunIndex, StagedEdits};

/// Replace every occurrence of `key` in the paragraph with `value`.
///
/// Occurrences that sit inside a single run are replaced in place. Occurrences split
/// across runs are rewritten one at a time: the whole value lands in the run holding
/// the first character of the key and the remaining key characters are blanked, so
/// every run keeps its formatting. Returns whether anything was replaced.
pub fn replace_key<R: Run>(runs: &mut [R], key: &str, value: &str, max_retries: usize) -> Result<bool> {
    if !contains(runs, key) {
        return Ok(false);
    }

    for run in runs.iter_mut() {
        if run.text().contains(key) {
            let replaced = run.text().replace(key, value);
            run.set_text(replaced);
        }
    }

    let mut attempts = 0;
    while contains(runs, key) {
        if attempts >= max_retries {
            return Err(Error::RetryLimitExceeded {
                key: key.to_string(),
                limit: max_retries,
            });
        }
        replace_first_split_occurrence(runs, key, value);
        attempts += 1;
    }
    trace!("replaced '{key}' ({attempts} split occurrences)");
    Ok(true)
}

fn replace_first_split_occurrence<R: Run>(runs: &mut [R], key: &str, value: &str) {
    let index = RunIndex::build(runs);
    let Some(start) = index.find(key) else {
        return;
    };

    let mut edits = StagedEdits::new(runs.len());
    for idx in start..start + key.chars().count() {
        let Some(position) = index.position(idx) else {
            break;
        };
        let replacement = if idx == start { value } else { "" };
        edits.stage(runs, position, replacement);
    }
    edits.flush(runs);
}
