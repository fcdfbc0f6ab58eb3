//! Auth domain actions - business logic functions
//!
//! Each action talks to the hosted auth service through `BaseAuthProvider`
//! and keeps the `users` table in step.

mod login;
mod password;
mod register;

pub use login::{login, logout};
pub use password::{request_password_reset, update_password, PASSWORD_RESET_MESSAGE};
pub use register::register;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;
