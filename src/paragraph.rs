use crate::runs::Run;

/// Visible text of a paragraph: all run texts in order.
pub fn paragraph_text<R: Run>(runs: &[R]) -> String {
    runs.iter().map(Run::text).collect()
}

pub fn contains<R: Run>(runs: &[R], tag: &str) -> bool {
    paragraph_text(runs).contains(tag)
}

/// Leading whitespace, including whitespace-only runs, is ignored.
pub fn starts_with<R: Run>(runs: &[R], tag: &str) -> bool {
    paragraph_text(runs).trim().starts_with(tag)
}

/// Trailing whitespace, including whitespace-only runs, is ignored.
pub fn ends_with<R: Run>(runs: &[R], tag: &str) -> bool {
    paragraph_text(runs).trim().ends_with(tag)
}

/// Whether the paragraph holds nothing but `tag`, give or take whitespace.
pub fn is_only<R: Run>(runs: &[R], tag: &str) -> bool {
    paragraph_text(runs).trim() == tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn contains_sees_tags_split_across_runs() {
        let runs = runs(&["Hi <b", "lk> there"]);
        assert!(contains(&runs, "<blk>"));
        assert!(!contains(&runs, "</blk>"));
    }

    #[test]
    fn starts_and_ends_with_ignore_whitespace_runs() {
        let runs = runs(&["  ", "<blk>", "text", "</blk>", "\t "]);
        assert!(starts_with(&runs, "<blk>"));
        assert!(ends_with(&runs, "</blk>"));
        assert!(!starts_with(&runs, "text"));
        assert!(!is_only(&runs, "<blk>"));
        assert!(is_only(&runs[..2], "<blk>"));
    }

    #[test]
    fn text_of_empty_paragraph_is_empty() {
        let runs: Vec<String> = Vec::new();
        assert_eq!(paragraph_text(&runs), "");
        assert!(!contains(&runs, "<blk>"));
    }
}
