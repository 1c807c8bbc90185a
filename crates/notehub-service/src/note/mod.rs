//! Note management and the folder membership index.

pub mod index;
pub mod service;

pub use index::FolderNoteIndex;
pub use service::NoteService;
