/// A piece of paragraph text carrying its own formatting. Only the text is visible
/// here; whatever formatting the run has stays attached to it across edits.
pub trait Run {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
}

impl Run for String {
    fn text(&self) -> &str {
        self
    }

    fn set_text(&mut self, text: String) {
        *self = text;
    }
}

impl<T: Run + ?Sized> Run for &mut T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn set_text(&mut self, text: String) {
        (**self).set_text(text);
    }
}

/// Location of one character of the flattened paragraph text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunPosition {
    /// Position of the owning run within the paragraph.
    pub run: usize,
    /// Character offset inside that run.
    pub offset: usize,
}

/// Flattened text of a paragraph together with a reverse map from every character
/// back to the run that holds it.
///
/// Indices are counted in characters. The index is a snapshot: it goes stale as soon
/// as any run's text changes and has to be rebuilt before it is used again.
#[derive(Clone, Debug, Default)]
pub struct RunIndex {
    flattened: String,
    positions: Vec<RunPosition>,
}

impl RunIndex {
    pub fn build<R: Run>(runs: &[R]) -> Self {
        let mut flattened = String::new();
        let mut positions = Vec::new();
        for (run, item) in runs.iter().enumerate() {
            let text = item.text();
            flattened.push_str(text);
            positions.extend((0..text.chars().count()).map(|offset| RunPosition { run, offset }));
        }
        Self {
            flattened,
            positions,
        }
    }

    pub fn flattened(&self) -> &str {
        &self.flattened
    }

    /// Number of characters in the flattened text.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, index: usize) -> Option<RunPosition> {
        self.positions.get(index).copied()
    }

    /// Character index of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        let byte_idx = self.flattened.find(needle)?;
        Some(byte_to_char_idx(&self.flattened, byte_idx))
    }
}

pub fn byte_to_char_idx(text: &str, byte_idx: usize) -> usize {
    text[..byte_idx].chars().count()
}

/// Point edits staged against the runs of one paragraph, written back in one go.
///
/// Each touched run is split into one slot per character the first time it is staged;
/// every later edit to the same run mutates those slots.
#[derive(Debug, Default)]
pub struct StagedEdits {
    slots: Vec<Option<Vec<String>>>,
}

impl StagedEdits {
    pub fn new(run_count: usize) -> Self {
        Self {
            slots: vec![None; run_count],
        }
    }

    pub fn stage<R: Run>(&mut self, runs: &[R], at: RunPosition, replacement: impl Into<String>) {
        if at.run >= self.slots.len() {
            self.slots.resize(at.run + 1, None);
        }
        let slots = self.slots[at.run].get_or_insert_with(|| {
            runs[at.run].text().chars().map(String::from).collect()
        });
        if let Some(slot) = slots.get_mut(at.offset) {
            *slot = replacement.into();
        }
    }

    /// Write every touched run back. Untouched runs are left alone.
    pub fn flush<R: Run>(self, runs: &mut [R]) {
        for (run, slots) in self.slots.into_iter().enumerate() {
            if let (Some(slots), Some(target)) = (slots, runs.get_mut(run)) {
                target.set_text(slots.concat());
            }
        }
    }
}
