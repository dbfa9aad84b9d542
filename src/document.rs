use std::fmt;

use tdoc::{ChecklistItem, Document, Paragraph, Span};

/// A document as seen by the replacement engines: an ordered sequence of paragraphs,
/// each made of runs with mutable text.
pub trait ParagraphSource {
    type Id: Clone + fmt::Debug;

    /// Every text-holding paragraph, in document order.
    fn paragraph_ids(&self) -> Vec<Self::Id>;

    /// Mutable access to the texts of a paragraph's runs, in order.
    fn runs_mut(&mut self, id: &Self::Id) -> Option<Vec<&mut String>>;

    /// Detach a paragraph from its container.
    ///
    /// Removing a paragraph must drop exactly that one entry from `paragraph_ids()` and
    /// keep the order of all others; ids of paragraphs before it stay valid. The removed
    /// id must not be used afterwards.
    fn delete_paragraph(&mut self, id: &Self::Id) -> bool;
}

/// Paragraphs of plain runs.
impl ParagraphSource for Vec<Vec<String>> {
    type Id = usize;

    fn paragraph_ids(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    fn runs_mut(&mut self, id: &usize) -> Option<Vec<&mut String>> {
        self.get_mut(*id).map(|runs| runs.iter_mut().collect())
    }

    fn delete_paragraph(&mut self, id: &usize) -> bool {
        if *id < self.len() {
            self.remove(*id);
            true
        } else {
            false
        }
    }
}

/// Location of a text-holding paragraph (or checklist item) inside a [`Document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParagraphPath {
    steps: Vec<PathStep>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathStep {
    Root(usize),
    Child(usize),
    Entry {
        entry_index: usize,
        paragraph_index: usize,
    },
    ChecklistItem {
        indices: Vec<usize>,
    },
}

impl ParagraphPath {
    fn new_root(idx: usize) -> Self {
        Self {
            steps: vec![PathStep::Root(idx)],
        }
    }

    fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    fn push_child(&mut self, idx: usize) {
        self.steps.push(PathStep::Child(idx));
    }

    fn push_entry(&mut self, entry_index: usize, paragraph_index: usize) {
        self.steps.push(PathStep::Entry {
            entry_index,
            paragraph_index,
        });
    }

    fn push_checklist_item(&mut self, indices: Vec<usize>) {
        self.steps.push(PathStep::ChecklistItem { indices });
    }

    fn pop(&mut self) {
        if self.steps.len() > 1 {
            self.steps.pop();
        }
    }

    fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

/// Body paragraphs in order, descending depth-first into quotes, list entries and
/// checklist items.
impl ParagraphSource for Document {
    type Id = ParagraphPath;

    fn paragraph_ids(&self) -> Vec<ParagraphPath> {
        let mut result = Vec::new();
        for (idx, paragraph) in self.paragraphs.iter().enumerate() {
            let mut path = ParagraphPath::new_root(idx);
            collect_paragraph_paths(paragraph, &mut path, &mut result);
        }
        result
    }

    fn runs_mut(&mut self, id: &ParagraphPath) -> Option<Vec<&mut String>> {
        let spans = spans_mut(self, id)?;
        let mut runs = Vec::new();
        collect_span_texts(spans, &mut runs);
        Some(runs)
    }

    fn delete_paragraph(&mut self, id: &ParagraphPath) -> bool {
        remove_paragraph_by_path(self, id)
    }
}

fn collect_paragraph_paths(paragraph: &Paragraph, path: &mut ParagraphPath, out: &mut Vec<ParagraphPath>) {
    match paragraph {
        Paragraph::Text { .. }
        | Paragraph::Header1 { .. }
        | Paragraph::Header2 { .. }
        | Paragraph::Header3 { .. }
        | Paragraph::CodeBlock { .. } => out.push(path.clone()),
        Paragraph::Quote { children } => {
            for (child_index, child) in children.iter().enumerate() {
                path.push_child(child_index);
                collect_paragraph_paths(child, path, out);
                path.pop();
            }
        }
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
            for (entry_index, entry) in entries.iter().enumerate() {
                for (child_index, child) in entry.iter().enumerate() {
                    path.push_entry(entry_index, child_index);
                    collect_paragraph_paths(child, path, out);
                    path.pop();
                }
            }
        }
        Paragraph::Checklist { items } => {
            for (item_index, item) in items.iter().enumerate() {
                collect_checklist_item_paths(item, path, &[item_index], out);
            }
        }
    }
}

fn collect_checklist_item_paths(
    item: &ChecklistItem,
    path: &mut ParagraphPath,
    indices: &[usize],
    out: &mut Vec<ParagraphPath>,
) {
    path.push_checklist_item(indices.to_vec());
    out.push(path.clone());
    path.pop();

    for (child_index, child) in item.children.iter().enumerate() {
        let mut child_indices = indices.to_vec();
        child_indices.push(child_index);
        collect_checklist_item_paths(child, path, &child_indices, out);
    }
}

/// A span's own text comes before the texts of its children.
fn collect_span_texts<'a>(spans: &'a mut [Span], out: &mut Vec<&'a mut String>) {
    for span in spans.iter_mut() {
        out.push(&mut span.text);
        collect_span_texts(&mut span.children, out);
    }
}

fn spans_mut<'a>(document: &'a mut Document, path: &ParagraphPath) -> Option<&'a mut Vec<Span>> {
    if matches!(path.steps().last(), Some(PathStep::ChecklistItem { .. })) {
        return checklist_item_mut(document, path).map(|item| &mut item.content);
    }
    match paragraph_mut(document, path)? {
        Paragraph::Text { content }
        | Paragraph::Header1 { content }
        | Paragraph::Header2 { content }
        | Paragraph::Header3 { content }
        | Paragraph::CodeBlock { content } => Some(content),
        _ => None,
    }
}

fn paragraph_mut<'a>(document: &'a mut Document, path: &ParagraphPath) -> Option<&'a mut Paragraph> {
    let mut iter = path.steps().iter();
    let first = iter.next()?;
    let mut paragraph = match first {
        PathStep::Root(idx) => document.paragraphs.get_mut(*idx)?,
        _ => return None,
    };
    for step in iter {
        paragraph = match step {
            PathStep::Child(idx) => {
                let Paragraph::Quote { children } = paragraph else {
                    return None;
                };
                children.get_mut(*idx)?
            }
            PathStep::Entry {
                entry_index,
                paragraph_index,
            } => match paragraph {
                Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
                    entries.get_mut(*entry_index)?.get_mut(*paragraph_index)?
                }
                _ => return None,
            },
            PathStep::ChecklistItem { .. } | PathStep::Root(_) => return None,
        };
    }
    Some(paragraph)
}

/// Splits a checklist item path into the path of its checklist and the item indices.
fn split_checklist_path(path: &ParagraphPath) -> Option<(ParagraphPath, &[usize])> {
    let (last, prefix) = path.steps().split_last()?;
    let PathStep::ChecklistItem { indices } = last else {
        return None;
    };
    Some((ParagraphPath::from_steps(prefix.to_vec()), indices))
}

fn checklist_item_mut<'a>(document: &'a mut Document, path: &ParagraphPath) -> Option<&'a mut ChecklistItem> {
    let (checklist_path, indices) = split_checklist_path(path)?;
    let Paragraph::Checklist { items } = paragraph_mut(document, &checklist_path)? else {
        return None;
    };
    let (first, rest) = indices.split_first()?;
    let mut item = items.get_mut(*first)?;
    for &idx in rest {
        item = item.children.get_mut(idx)?;
    }
    Some(item)
}

fn remove_paragraph_by_path(document: &mut Document, path: &ParagraphPath) -> bool {
    let mut steps = path.steps().to_vec();
    let Some(last) = steps.pop() else {
        return false;
    };
    if !detach(document, &steps, last) {
        return false;
    }

    // A container left without paragraphs goes too, and so on upwards.
    let parent_path = ParagraphPath::from_steps(steps);
    if paragraph_mut(document, &parent_path).is_some_and(|parent| is_empty_container(parent)) {
        remove_paragraph_by_path(document, &parent_path);
    }
    true
}

fn is_empty_container(paragraph: &Paragraph) -> bool {
    match paragraph {
        Paragraph::Quote { children } => children.is_empty(),
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => entries.is_empty(),
        Paragraph::Checklist { items } => items.is_empty(),
        _ => false,
    }
}

/// Removes the paragraph at `last` from the container at `parent_steps`.
fn detach(document: &mut Document, parent_steps: &[PathStep], last: PathStep) -> bool {
    match last {
        PathStep::Root(idx) => {
            if !parent_steps.is_empty() || idx >= document.paragraphs.len() {
                return false;
            }
            document.paragraphs.remove(idx);
            true
        }
        PathStep::Child(idx) => {
            let parent_path = ParagraphPath::from_steps(parent_steps.to_vec());
            let Some(Paragraph::Quote { children }) = paragraph_mut(document, &parent_path) else {
                return false;
            };
            if idx >= children.len() {
                return false;
            }
            children.remove(idx);
            true
        }
        PathStep::Entry {
            entry_index,
            paragraph_index,
        } => {
            let parent_path = ParagraphPath::from_steps(parent_steps.to_vec());
            let entries = match paragraph_mut(document, &parent_path) {
                Some(Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries }) => entries,
                _ => return false,
            };
            let Some(entry) = entries.get_mut(entry_index) else {
                return false;
            };
            if paragraph_index >= entry.len() {
                return false;
            }
            entry.remove(paragraph_index);
            if entry.is_empty() {
                entries.remove(entry_index);
            }
            true
        }
        PathStep::ChecklistItem { indices } => {
            let checklist_path = ParagraphPath::from_steps(parent_steps.to_vec());
            let Some(Paragraph::Checklist { items }) = paragraph_mut(document, &checklist_path) else {
                return false;
            };
            let Some((&last, parents)) = indices.split_last() else {
                return false;
            };
            let mut siblings = items;
            for &idx in parents {
                let Some(item) = siblings.get_mut(idx) else {
                    return false;
                };
                siblings = &mut item.children;
            }
            if last >= siblings.len() {
                return false;
            }
            // Nested items move up into the removed item's place.
            let removed = siblings.remove(last);
            for (offset, child) in removed.children.into_iter().enumerate() {
                siblings.insert(last + offset, child);
            }
            true
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
