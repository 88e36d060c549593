/*!
 * Core Module
 * Fundamental types, descriptor guards and error handling
 */

pub mod errors;
pub mod guard;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use guard::{FdEvents, FdGuard, GuardMetadata, GuardResult};
pub use types::*;
