//! Upload history for a dashboard session.
//!
//! A [`HistoryManager`] remembers the last few loaded tables so a user can
//! switch back to one without loading it again. It is a plain value owned by
//! the session; nothing here is global.

mod entry;
mod manager;

pub use entry::HistoryEntry;
pub use manager::HistoryManager;
