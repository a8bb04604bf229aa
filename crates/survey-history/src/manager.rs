//! Bounded, most-recent-first history with a current selection.

use polars::prelude::DataFrame;
use survey_model::DEFAULT_MAX_HISTORY;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entry::HistoryEntry;

/// Tracks loaded tables for one session.
///
/// The selection, when set, names a listed entry, except after
/// [`HistoryManager::set_current`] with an unknown id, which lookups then
/// treat as absent.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    current: Option<Uuid>,
    max_history: usize,
}

impl HistoryManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            max_history,
        }
    }

    /// Stores a copy of `df` at the front and selects it.
    ///
    /// Entries past `max_history` are evicted from the tail. With a bound of
    /// zero the new entry is evicted at once and the selection resolves to
    /// nothing.
    pub fn add(
        &mut self,
        filename: impl Into<String>,
        df: &DataFrame,
        file_size: impl Into<String>,
    ) -> Uuid {
        let entry = HistoryEntry::new(filename, df, file_size);
        let id = entry.id;
        info!(
            id = %id,
            filename = %entry.filename,
            rows = entry.row_count,
            columns = entry.column_count,
            "added history entry"
        );
        self.entries.insert(0, entry);

        if self.entries.len() > self.max_history {
            for evicted in self.entries.drain(self.max_history..) {
                info!(id = %evicted.id, filename = %evicted.filename, "evicted history entry");
            }
        }

        self.current = Some(id);
        id
    }

    /// Entries, most recent first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get_entry(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn get_data(&self, id: Uuid) -> Option<&DataFrame> {
        self.get_entry(id).map(|entry| &entry.data)
    }

    /// Removes an entry; unknown ids are ignored.
    ///
    /// Deleting the current entry selects the new head, or nothing.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            debug!(id = %id, "delete ignored, no such history entry");
            return;
        }
        info!(id = %id, remaining = self.entries.len(), "deleted history entry");

        if self.current == Some(id) {
            self.current = self.entries.first().map(|entry| entry.id);
        }
    }

    pub fn clear(&mut self) {
        info!(removed = self.entries.len(), "cleared history");
        self.entries.clear();
        self.current = None;
    }

    pub fn current_data(&self) -> Option<&DataFrame> {
        self.current.and_then(|id| self.get_data(id))
    }

    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.current.and_then(|id| self.get_entry(id))
    }

    /// Selects `id` without checking that it is listed.
    pub fn set_current(&mut self, id: Uuid) {
        self.current = Some(id);
    }

    pub fn current_id(&self) -> Option<Uuid> {
        self.current
    }

    pub fn is_current(&self, id: Uuid) -> bool {
        self.current == Some(id)
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill label for the history header, e.g. "2/5".
    pub fn usage_label(&self) -> String {
        format!("{}/{}", self.entries.len(), self.max_history)
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
