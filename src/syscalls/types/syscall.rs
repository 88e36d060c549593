/*!
 * Syscall Operations
 * Names the kernel requests the bridge can make
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kernel request issued by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyscallOp {
    /// Move the root mount (`SYS_pivot_root`)
    PivotRoot,
    /// `prctl(PR_SET_CHILD_SUBREAPER, 1)`
    SetChildSubreaper,
    /// `prctl(PR_GET_CHILD_SUBREAPER, ..)`
    GetChildSubreaper,
    /// Obtain a pidfd (`SYS_pidfd_open`)
    PidfdOpen,
    /// Duplicate a descriptor out of another process (`SYS_pidfd_getfd`)
    PidfdGetfd,
}

impl SyscallOp {
    /// Kernel-side name, as it appears in man pages and strace
    pub const fn name(self) -> &'static str {
        match self {
            Self::PivotRoot => "pivot_root",
            Self::SetChildSubreaper => "prctl(PR_SET_CHILD_SUBREAPER)",
            Self::GetChildSubreaper => "prctl(PR_GET_CHILD_SUBREAPER)",
            Self::PidfdOpen => "pidfd_open",
            Self::PidfdGetfd => "pidfd_getfd",
        }
    }
}

impl fmt::Display for SyscallOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
