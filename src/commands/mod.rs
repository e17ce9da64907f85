//! Note commands
//!
//! The user-facing actions (add, delete, edit, export, import, show, list)
//! built on the resolver and the store. Each returns the message shown to
//! the user, or a [`NoteError`](crate::NoteError) whose text is shown as is.

pub mod operations;

pub use operations::{DeleteTarget, NoteOperations};
