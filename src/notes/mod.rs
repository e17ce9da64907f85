//! Notes module
//!
//! Keys, the in-session note store, and the YAML notes file format.

pub mod models;
pub mod store;
pub mod yaml;

pub use models::*;
pub use store::NoteStore;
pub use yaml::{from_yaml, read_notes_file, to_yaml, write_notes_file};
