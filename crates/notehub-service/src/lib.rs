//! # notehub-service
//!
//! Business logic service layer for NoteHub. The folder hierarchy rules,
//! the note-folder association, and the deletion cascade live here; every
//! store mutation goes through these services.
//!
//! Services take all of their dependencies as `Arc` references at
//! construction time.

pub mod context;
pub mod folder;
pub mod note;
pub mod reconcile;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use folder::{CascadeCoordinator, CascadeReport, FolderService, ParentChange, TreeService};
pub use note::{FolderNoteIndex, NoteService};
pub use reconcile::{FolderDrift, ReconcileReport, ReconcileService};
pub use user::AuthService;
