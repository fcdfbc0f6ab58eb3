//! Auth domain - facade over the hosted auth service
//!
//! Responsibilities:
//! - Registration (auth account + marketplace profile row)
//! - Password login / logout / recovery / change
//! - Local verification of the service's access tokens

pub mod actions;
pub mod data;
pub mod jwt;

pub use data::{LoginRequest, RegisterRequest, TokenResponse};
pub use jwt::{Claims, JwtService};
