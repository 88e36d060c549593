/*!
 * Syscall Error Types
 * Defines error types for syscall operations
 */

use super::syscall::SyscallOp;
use miette::Diagnostic;
use nix::errno::Errno;
use thiserror::Error;

/// Syscall operation errors
///
/// Kernel failures carry the errno exactly as the kernel reported it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[non_exhaustive]
pub enum SyscallError {
    /// The kernel rejected the request
    #[error("{op} failed: {errno}")]
    #[diagnostic(code(syscall::kernel))]
    Kernel { op: SyscallOp, errno: Errno },

    /// Path argument cannot be passed as a C string
    #[error("Invalid path (interior NUL byte): {0}")]
    #[diagnostic(
        code(syscall::invalid_path),
        help("Paths handed to the kernel must not contain NUL bytes.")
    )]
    InvalidPath(String),
}

impl SyscallError {
    /// Create a kernel-reported error
    #[inline]
    pub fn kernel(op: SyscallOp, errno: Errno) -> Self {
        Self::Kernel { op, errno }
    }

    /// Capture `errno` for a call that just returned -1
    #[inline]
    pub fn last(op: SyscallOp) -> Self {
        Self::kernel(op, Errno::last())
    }

    /// Kernel errno, if the kernel produced this error
    #[inline]
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::Kernel { errno, .. } => Some(*errno),
            Self::InvalidPath(_) => None,
        }
    }

    /// Operation that failed, if a syscall was made
    #[inline]
    pub fn op(&self) -> Option<SyscallOp> {
        match self {
            Self::Kernel { op, .. } => Some(*op),
            Self::InvalidPath(_) => None,
        }
    }

    /// The process named by the pid or pidfd no longer exists
    #[inline]
    pub fn is_process_gone(&self) -> bool {
        self.errno() == Some(Errno::ESRCH)
    }

    /// Descriptor duplication lost a race with the target process
    ///
    /// Either the process exited or it closed the descriptor between
    /// inspection and the call. Callers should treat this as routine.
    pub fn is_race(&self) -> bool {
        matches!(
            self,
            Self::Kernel {
                op: SyscallOp::PidfdGetfd,
                errno: Errno::ESRCH | Errno::EBADF,
            }
        )
    }

    /// The running kernel does not implement the syscall
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        self.errno() == Some(Errno::ENOSYS)
    }
}

impl From<SyscallError> for std::io::Error {
    fn from(err: SyscallError) -> Self {
        match err {
            SyscallError::Kernel { errno, .. } => errno.into(),
            SyscallError::InvalidPath(path) => std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path contains an interior NUL byte: {}", path),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kernel_error_display() {
        let err = SyscallError::kernel(SyscallOp::PivotRoot, Errno::EINVAL);
        assert_eq!(err.to_string(), "pivot_root failed: EINVAL: Invalid argument");
        assert_eq!(err.errno(), Some(Errno::EINVAL));
        assert_eq!(err.op(), Some(SyscallOp::PivotRoot));
    }

    #[test]
    fn test_race_classification() {
        assert!(SyscallError::kernel(SyscallOp::PidfdGetfd, Errno::ESRCH).is_race());
        assert!(SyscallError::kernel(SyscallOp::PidfdGetfd, Errno::EBADF).is_race());
        assert!(!SyscallError::kernel(SyscallOp::PidfdGetfd, Errno::EPERM).is_race());
        // EBADF on pidfd_open is a caller bug, not a race
        assert!(!SyscallError::kernel(SyscallOp::PidfdOpen, Errno::EBADF).is_race());
    }

    #[test]
    fn test_process_gone() {
        assert!(SyscallError::kernel(SyscallOp::PidfdOpen, Errno::ESRCH).is_process_gone());
        assert!(!SyscallError::kernel(SyscallOp::PidfdOpen, Errno::EPERM).is_process_gone());
        assert!(!SyscallError::InvalidPath("a\0b".into()).is_process_gone());
    }

    #[test]
    fn test_unsupported() {
        assert!(SyscallError::kernel(SyscallOp::PidfdGetfd, Errno::ENOSYS).is_unsupported());
    }

    #[test]
    fn test_into_io_error() {
        let io: std::io::Error = SyscallError::kernel(SyscallOp::PidfdOpen, Errno::EPERM).into();
        assert_eq!(io.raw_os_error(), Some(libc::EPERM));

        let io: std::io::Error = SyscallError::InvalidPath("bad".into()).into();
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidInput);
    }
}
