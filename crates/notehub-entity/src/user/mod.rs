//! User domain entities.

pub mod model;

pub use model::{MAX_USERNAME_LEN, NewUser, User};
