use std::ops::Range;

use crate::error::{Error, Result};
use crate::runs::{Run, RunIndex, StagedEdits};

/// Resolve a block whose initial and end tags are both in this paragraph.
///
/// Both tags are always removed. The content between them survives only when
/// `keep_block` is set. Text outside the block is left untouched.
pub fn edit_range<R: Run>(runs: &mut [R], initial: &str, end: &str, keep_block: bool) -> Result<()> {
    let index = RunIndex::build(runs);
    let initial_start = index.find(initial).ok_or_else(|| Error::InitialDelimiterMissing {
        initial: initial.to_string(),
        end: end.to_string(),
    })?;
    let end_start = index.find(end).ok_or_else(|| Error::EndDelimiterMissing {
        initial: initial.to_string(),
        end: end.to_string(),
    })?;
    if end_start < initial_start {
        return Err(Error::DelimitersReversed {
            initial: initial.to_string(),
            end: end.to_string(),
        });
    }

    let initial_span = initial_start..initial_start + initial.chars().count();
    let end_span = end_start..end_start + end.chars().count();
    let range = initial_span.start..end_span.end;
    blank(runs, &index, range, |idx| {
        !keep_block || initial_span.contains(&idx) || end_span.contains(&idx)
    });
    Ok(())
}

/// Remove `tag` and, unless `keep_block` is set, everything after it. The text before
/// the tag is always kept. Does nothing when the tag is absent.
pub fn clear_tag_and_after<R: Run>(runs: &mut [R], tag: &str, keep_block: bool) {
    let index = RunIndex::build(runs);
    let Some(start) = index.find(tag) else {
        return;
    };
    let tag_span = start..start + tag.chars().count();
    let range = start..index.len();
    blank(runs, &index, range, |idx| !keep_block || tag_span.contains(&idx));
}

/// Remove `tag` and, unless `keep_block` is set, everything before it. The text after
/// the tag is always kept. Does nothing when the tag is absent.
pub fn clear_tag_and_before<R: Run>(runs: &mut [R], tag: &str, keep_block: bool) {
    let index = RunIndex::build(runs);
    let Some(start) = index.find(tag) else {
        return;
    };
    let tag_span = start..start + tag.chars().count();
    let range = 0..tag_span.end;
    blank(runs, &index, range, |idx| !keep_block || tag_span.contains(&idx));
}

fn blank<R: Run>(runs: &mut [R], index: &RunIndex, range: Range<usize>, remove: impl Fn(usize) -> bool) {
    let mut edits = StagedEdits::new(runs.len());
    for idx in range {
        let Some(position) = index.position(idx) else {
            break;
        };
        if remove(idx) {
            edits.stage(runs, position, "");
        }
    }
    edits.flush(runs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::paragraph_text;

    fn runs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn remove_block_within_paragraph() {
        let mut runs = runs(&["Hi<blk>sec", "ret</b", "lk> bye"]);
        edit_range(&mut runs, "<blk>", "</blk>", false).unwrap();
        assert_eq!(paragraph_text(&runs), "Hi bye");
        assert_eq!(runs, vec!["Hi", "", " bye"]);
    }

    #[test]
    fn keep_block_strips_only_the_tags() {
        let mut runs = runs(&["Hi<blk>sec", "ret</b", "lk> bye"]);
        edit_range(&mut runs, "<blk>", "</blk>", true).unwrap();
        assert_eq!(paragraph_text(&runs), "Hisecret bye");
    }

    #[test]
    fn empty_block_is_removed_either_way() {
        for keep in [false, true] {
            let mut runs = runs(&["a<x></x>b"]);
            edit_range(&mut runs, "<x>", "</x>", keep).unwrap();
            assert_eq!(paragraph_text(&runs), "ab");
        }
    }

    #[test]
    fn reversed_tags_are_rejected() {
        let mut runs = runs(&["</b> then <b>"]);
        let err = edit_range(&mut runs, "<b>", "</b>", false).unwrap_err();
        assert_eq!(
            err,
            Error::DelimitersReversed {
                initial: "<b>".to_string(),
                end: "</b>".to_string(),
            }
        );
        assert_eq!(paragraph_text(&runs), "</b> then <b>");
    }

    #[test]
    fn missing_tag_is_reported() {
        let mut runs = runs(&["only <b> here"]);
        assert!(matches!(
            edit_range(&mut runs, "<b>", "</b>", true),
            Err(Error::EndDelimiterMissing { .. })
        ));
    }

    #[test]
    fn clear_tag_and_after_keeps_prefix() {
        let mut removed = runs(&["Start <b", "lk>tail"]);
        clear_tag_and_after(&mut removed, "<blk>", false);
        assert_eq!(paragraph_text(&removed), "Start ");

        let mut kept = runs(&["Start <b", "lk>tail"]);
        clear_tag_and_after(&mut kept, "<blk>", true);
        assert_eq!(paragraph_text(&kept), "Start tail");
    }

    #[test]
    fn clear_tag_and_before_keeps_suffix() {
        let mut removed = runs(&["head</bl", "k> End"]);
        clear_tag_and_before(&mut removed, "</blk>", false);
        assert_eq!(paragraph_text(&removed), " End");

        let mut kept = runs(&["head</bl", "k> End"]);
        clear_tag_and_before(&mut kept, "</blk>", true);
        assert_eq!(paragraph_text(&kept), "head End");
    }

    #[test]
    fn clearing_an_absent_tag_changes_nothing() {
        let mut runs = runs(&["plain"]);
        clear_tag_and_after(&mut runs, "<x>", false);
        clear_tag_and_before(&mut runs, "</x>", false);
        assert_eq!(runs, vec!["plain"]);
    }
}
