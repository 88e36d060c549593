/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

pub use crate::core::guard::GuardError;
pub use crate::syscalls::SyscallError;

/// Unified shim error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum ShimError {
    #[error("Syscall error: {0}")]
    #[diagnostic(transparent)]
    Syscall(#[from] SyscallError),

    #[error("Guard error: {0}")]
    #[diagnostic(transparent)]
    Guard(#[from] GuardError),

    #[error("Tracing setup failed: {0}")]
    #[diagnostic(
        code(shim::tracing),
        help("A global subscriber is probably installed already.")
    )]
    Tracing(String),
}

impl From<ShimError> for std::io::Error {
    fn from(err: ShimError) -> Self {
        match err {
            ShimError::Syscall(e) => e.into(),
            ShimError::Guard(GuardError::Close(errno)) => errno.into(),
            other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
        }
    }
}
