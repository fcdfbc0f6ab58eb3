//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod pdf;
pub mod test_dependencies;
pub mod traits;

pub use deps::{AnthropicAdapter, ServerDeps, SupabaseAuthAdapter, SupabaseStorageAdapter};
pub use test_dependencies::{MockAI, MockAuthProvider, MockObjectStorage, TestDependencies};
pub use traits::*;
