/*!
 * Process Snapshot Types
 * Point-in-time records describing host processes
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot capture result
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot capture errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum SnapshotError {
    #[error("Process table unavailable: {0}")]
    Unavailable(String),

    #[error("Process table read failed: {0}")]
    Io(String),

    #[error("Malformed process record: {0}")]
    Malformed(String),
}

/// Scheduling state decoded from the host's raw state word
///
/// The numeric mapping follows the classic task state bits; values outside
/// the table decode as `Unknown` and render with an empty name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Running,
    Interruptible,
    Uninterruptible,
    Stopped,
    Traced,
    Unknown,
}

impl TaskState {
    /// Decode the raw state word
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        match raw {
            0 => Self::Running,
            1 => Self::Interruptible,
            2 => Self::Uninterruptible,
            4 => Self::Stopped,
            8 => Self::Traced,
            _ => Self::Unknown,
        }
    }

    /// Kernel-style state name, empty for `Unknown`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Running => "TASK_RUNNING",
            Self::Interruptible => "TASK_INTERRUPTIBLE",
            Self::Uninterruptible => "TASK_UNINTERRUPTIBLE",
            Self::Stopped => "TASK_STOPPED",
            Self::Traced => "TASK_TRACED",
            Self::Unknown => "",
        }
    }
}

impl Default for TaskState {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Memory layout bounds for a process that owns an address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AddressSpace {
    pub task_size: u64,
    pub code_start: u64,
    pub code_end: u64,
    pub heap_start: u64,
    pub heap_end: u64,
}

/// Point-in-time record for one process
///
/// Captured once per activation and never refreshed. Kernel threads carry
/// no address space, so `mm` stays `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub ppid: Pid,
    pub comm: String,
    pub state: TaskState,
    pub prio: i32,
    pub static_prio: i32,
    pub normal_prio: i32,
    pub start_time: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mm: Option<AddressSpace>,
    pub children: Vec<Pid>,
}

impl ProcessSnapshot {
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, comm: impl Into<String>) -> Self {
        Self {
            pid,
            ppid: 0,
            comm: comm.into(),
            state: TaskState::Running,
            prio: 120,
            static_prio: 120,
            normal_prio: 120,
            start_time: 0,
            mm: None,
            children: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_parent(mut self, ppid: Pid) -> Self {
        self.ppid = ppid;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_priorities(mut self, prio: i32, static_prio: i32, normal_prio: i32) -> Self {
        self.prio = prio;
        self.static_prio = static_prio;
        self.normal_prio = normal_prio;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = start_time;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_mm(mut self, mm: AddressSpace) -> Self {
        self.mm = Some(mm);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: Vec<Pid>) -> Self {
        self.children = children;
        self
    }

    /// Whether the process owns an address space
    #[inline]
    #[must_use]
    pub const fn has_mm(&self) -> bool {
        self.mm.is_some()
    }
}
