//! # notehub-entity
//!
//! Domain entity models for NoteHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; everything serializes with camelCase field names.

pub mod folder;
pub mod note;
pub mod user;
