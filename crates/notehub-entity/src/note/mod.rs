//! Note domain entities.

pub mod model;

pub use model::{
    MAX_KEY_POINTS_LEN, MAX_NOTE_TITLE_LEN, MAX_SUMMARY_LEN, NewNote, Note, NoteContent,
};
