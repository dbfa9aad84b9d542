use log::debug;

use crate::document::ParagraphSource;
use crate::error::{Error, Result};
use crate::key::{BlockTags, placeholder};
use crate::replace::replace_key;
use crate::scanner::{PassOutcome, find_orphan_end, scan_block};

/// Attempts allowed to clear one key from one paragraph.
pub const DEFAULT_MAX_RETRIES: usize = 100;
/// Document scans allowed to resolve every block of one name.
pub const DEFAULT_MAX_PASSES: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub max_retries: usize,
    pub max_passes: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Fills placeholders and resolves conditional blocks across a whole document.
///
/// Edits are applied in place as they are made. When an error is returned, the
/// document keeps every change made before the failing key; clone it first if the
/// caller needs all-or-nothing behavior.
#[derive(Clone, Debug, Default)]
pub struct Replacer {
    options: Options,
}

impl Replacer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Replace every `${name}` with its value, for every entry of `mapping` in order.
    /// Returns the number of paragraphs rewritten, summed over all entries.
    pub fn substitute<D, I, K, V>(&self, document: &mut D, mapping: I) -> Result<usize>
    where
        D: ParagraphSource,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut rewritten = 0;
        for (name, value) in mapping {
            let key = placeholder(name.as_ref());
            let mut paragraphs = 0;
            for id in document.paragraph_ids() {
                let Some(mut runs) = document.runs_mut(&id) else {
                    continue;
                };
                if replace_key(&mut runs, &key, value.as_ref(), self.options.max_retries)? {
                    paragraphs += 1;
                }
            }
            debug!("{key}: rewrote {paragraphs} paragraph(s)");
            rewritten += paragraphs;
        }
        Ok(rewritten)
    }

    /// Resolve every `<name>`...`</name>` block, keeping the content between the tags
    /// when the entry's flag is set and removing it otherwise. Returns the number of
    /// blocks resolved, summed over all entries.
    pub fn apply_blocks<D, I, K>(&self, document: &mut D, mapping: I) -> Result<usize>
    where
        D: ParagraphSource,
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut resolved = 0;
        for (name, keep_block) in mapping {
            let tags = BlockTags::new(name.as_ref());
            let blocks = self.resolve_all(document, &tags, keep_block)?;
            find_orphan_end(document, &tags)?;
            debug!("{}: resolved {blocks} block(s), keep={keep_block}", tags.initial);
            resolved += blocks;
        }
        Ok(resolved)
    }

    fn resolve_all<D: ParagraphSource>(&self, document: &mut D, tags: &BlockTags, keep_block: bool) -> Result<usize> {
        let mut passes = 0;
        loop {
            if passes >= self.options.max_passes {
                return Err(Error::RetryLimitExceeded {
                    key: tags.initial.clone(),
                    limit: self.options.max_passes,
                });
            }
            match scan_block(document, tags, keep_block)? {
                PassOutcome::Resolved => passes += 1,
                PassOutcome::NotPresent => return Ok(passes),
            }
        }
    }
}

/// [`Replacer::substitute`] with default options.
pub fn substitute<D, I, K, V>(document: &mut D, mapping: I) -> Result<usize>
where
    D: ParagraphSource,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Replacer::default().substitute(document, mapping)
}

/// [`Replacer::apply_blocks`] with default options.
pub fn apply_blocks<D, I, K>(document: &mut D, mapping: I) -> Result<usize>
where
    D: ParagraphSource,
    I: IntoIterator<Item = (K, bool)>,
    K: AsRef<str>,
{
    Replacer::default().apply_blocks(document, mapping)
}

#[cfg(test)]
#[path = "fill_tests.rs"]
mod fill_tests;
