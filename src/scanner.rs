use log::trace;

use crate::block::{clear_tag_and_after, clear_tag_and_before, edit_range};
use crate::document::ParagraphSource;
use crate::error::{Error, Result};
use crate::key::BlockTags;
use crate::paragraph::{contains, ends_with, is_only, starts_with};
use crate::runs::Run;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    SeekingInitial,
    SeekingEnd,
}

/// Result of one scan over the document for a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// One block was found and resolved; there may be more.
    Resolved,
    /// The initial tag does not occur anywhere.
    NotPresent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Keep,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Next {
    Continue(ScanState),
    Done,
}

/// Walk the paragraphs once, resolving the first block of `tags`.
///
/// The block may start and end in the same paragraph or span any number of
/// paragraphs. A paragraph is deleted outright when nothing in it survives: block
/// content when removing, a bare tag when keeping.
pub fn scan_block<D: ParagraphSource>(document: &mut D, tags: &BlockTags, keep_block: bool) -> Result<PassOutcome> {
    let mut ids = document.paragraph_ids();
    let mut position = 0;
    let mut state = ScanState::SeekingInitial;

    while let Some(id) = ids.get(position).cloned() {
        let Some(mut runs) = document.runs_mut(&id) else {
            position += 1;
            continue;
        };
        let (action, next) = transition(state, &mut runs, tags, keep_block)?;
        trace!("{id:?}: {state:?} -> {next:?} ({action:?})");

        if action == Action::Delete && document.delete_paragraph(&id) {
            // The paragraph that followed now sits at `position`.
            ids = document.paragraph_ids();
        } else {
            position += 1;
        }

        match next {
            Next::Done => return Ok(PassOutcome::Resolved),
            Next::Continue(next_state) => state = next_state,
        }
    }

    match state {
        ScanState::SeekingInitial => Ok(PassOutcome::NotPresent),
        ScanState::SeekingEnd => Err(Error::EndDelimiterMissing {
            initial: tags.initial.clone(),
            end: tags.end.clone(),
        }),
    }
}

fn transition<R: Run>(state: ScanState, runs: &mut [R], tags: &BlockTags, keep_block: bool) -> Result<(Action, Next)> {
    let BlockTags { initial, end } = tags;
    match state {
        ScanState::SeekingInitial => {
            if !contains(runs, initial) {
                return Ok((Action::Keep, Next::Continue(ScanState::SeekingInitial)));
            }
            if contains(runs, end) {
                edit_range(runs, initial, end, keep_block)?;
                return Ok((Action::Keep, Next::Done));
            }
            if starts_with(runs, initial) && (!keep_block || is_only(runs, initial)) {
                return Ok((Action::Delete, Next::Continue(ScanState::SeekingEnd)));
            }
            clear_tag_and_after(runs, initial, keep_block);
            Ok((Action::Keep, Next::Continue(ScanState::SeekingEnd)))
        }
        ScanState::SeekingEnd => {
            if !contains(runs, end) {
                let action = if keep_block { Action::Keep } else { Action::Delete };
                return Ok((action, Next::Continue(ScanState::SeekingEnd)));
            }
            if ends_with(runs, end) && (!keep_block || is_only(runs, end)) {
                return Ok((Action::Delete, Next::Done));
            }
            clear_tag_and_before(runs, end, keep_block);
            Ok((Action::Keep, Next::Done))
        }
    }
}

/// Fail if any paragraph still holds the end tag of `tags`, which means it has no
/// initial tag before it.
pub fn find_orphan_end<D: ParagraphSource>(document: &mut D, tags: &BlockTags) -> Result<()> {
    for id in document.paragraph_ids() {
        let Some(runs) = document.runs_mut(&id) else {
            continue;
        };
        if contains(&runs, &tags.end) {
            return Err(Error::InitialDelimiterMissing {
                initial: tags.initial.clone(),
                end: tags.end.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod scanner_tests;
