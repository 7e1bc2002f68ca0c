//! Append/rewind history container.
//!
//! A `Timeline` is a vector of entries plus a head index. Moving the head back
//! keeps the later entries around; the next `add_next` prunes everything past
//! the head before pushing, so a rewound history can never fork.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<T> {
    entries: Vec<T>,
    head: Option<usize>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            head: None,
        }
    }

    /// Timeline holding `first` as its only, current entry.
    pub fn with_first(first: T) -> Self {
        Self {
            entries: vec![first],
            head: Some(0),
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.head?)
    }

    /// Index of the current entry; `None` when positioned before the first.
    pub fn head_index(&self) -> Option<usize> {
        self.head
    }

    /// Move the head, clamping to the last stored entry. `None` rewinds
    /// before the first entry.
    pub fn set_head_index(&mut self, index: Option<usize>) {
        self.head = match (index, self.entries.len()) {
            (_, 0) | (None, _) => None,
            (Some(index), len) => Some(index.min(len - 1)),
        };
    }

    /// Drop every entry after the head, then append `entry` as the new head.
    pub fn add_next(&mut self, entry: T) {
        self.pop_future();
        self.entries.push(entry);
        self.head = Some(self.entries.len() - 1);
    }

    /// Remove the entries after the head, returning how many were dropped.
    pub fn pop_future(&mut self) -> usize {
        let keep = self.head.map_or(0, |head| head + 1);
        let dropped = self.entries.len().saturating_sub(keep);
        self.entries.truncate(keep);
        dropped
    }

    /// Entries from the first up to and including the head.
    pub fn start_to_current(&self) -> &[T] {
        match self.head {
            Some(head) => &self.entries[..=head],
            None => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Stored entries, including any past the head.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the head sits on the newest stored entry.
    pub fn is_up_to_date(&self) -> bool {
        self.head.map_or(0, |head| head + 1) == self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.head = None;
    }
}

impl<'a, T> IntoIterator for &'a Timeline<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
