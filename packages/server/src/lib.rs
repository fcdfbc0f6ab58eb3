// IP Marketplace - API Core
//
// Backend for a marketplace where creators list scripts and treatments,
// buyers browse, save and inquire, and admins moderate. AI analysis and
// pitch materials are generated per listing.
//
// Business logic lives in domains/*/actions, persistence in domains/*/models,
// and the HTTP surface in server/routes.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
