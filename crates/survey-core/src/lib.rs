//! Session state for the survey dashboard.
//!
//! A [`Session`] owns everything one person's dashboard remembers between
//! interactions: the upload history with its current selection, the age-group
//! filter and the export cache. There is no shared or global state; callers
//! create one session per interactive user.

mod error;
mod session;

pub use error::{Result, SessionError};
pub use session::Session;
