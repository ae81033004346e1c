/*!
 * Host Process Table
 * Snapshot source backed by the kernel's proc report
 */

use super::source::SnapshotSource;
use super::table::ProcessTree;
use super::types::{AddressSpace, ProcessSnapshot, SnapshotError, SnapshotResult, TaskState};
use crate::core::types::{Pid, Signum};
use crate::signals::types::{Signal, SignalError, SignalResult};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

#[cfg(unix)]
use nix::sys::signal::{kill, Signal as NixSignal};
#[cfg(unix)]
use nix::unistd::Pid as NixPid;

/// Baseline of the kernel's static priority scale
const PRIO_BASE: i32 = 120;

/// Snapshot source reading `<root>/<pid>/stat` records
///
/// The default root is `/proc`. Scans are best-effort: records that vanish
/// or fail to parse mid-scan are skipped with a log line. Pid 0 is
/// synthesized as the tree root since the kernel does not expose one.
pub struct HostSource {
    proc_root: PathBuf,
}

impl HostSource {
    /// Source over the host's `/proc`
    #[must_use]
    pub fn new() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
        }
    }

    /// Source over an alternate proc-format root
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: root.into(),
        }
    }

    fn scan(&self) -> SnapshotResult<ProcessTree> {
        if !self.proc_root.is_dir() {
            return Err(SnapshotError::Unavailable(format!(
                "process table not exposed at {}",
                self.proc_root.display()
            )));
        }

        let entries = fs::read_dir(&self.proc_root)
            .map_err(|e| SnapshotError::Io(format!("{}: {}", self.proc_root.display(), e)))?;

        // Pid 0 is reserved for the synthetic root
        let mut pids: Vec<Pid> = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            match name.to_str().and_then(|n| n.parse::<Pid>().ok()) {
                Some(pid) if pid != 0 => pids.push(pid),
                _ => {}
            }
        }
        pids.sort_unstable();

        let mut scanned: Vec<ProcessSnapshot> = Vec::with_capacity(pids.len());
        for pid in pids {
            match self.read_snapshot(pid) {
                Ok(snapshot) => scanned.push(snapshot),
                Err(e) => debug!("skipping pid {}: {}", pid, e),
            }
        }
        if scanned.is_empty() {
            return Err(SnapshotError::Malformed(format!(
                "no process records under {}",
                self.proc_root.display()
            )));
        }

        // Orphans reparent to the synthetic root so every captured process
        // stays reachable from it.
        let present: HashSet<Pid> = scanned.iter().map(|s| s.pid).collect();
        let mut children: HashMap<Pid, Vec<Pid>> = HashMap::new();
        for snapshot in &mut scanned {
            let parent = if snapshot.ppid != snapshot.pid && present.contains(&snapshot.ppid) {
                snapshot.ppid
            } else {
                0
            };
            snapshot.ppid = parent;
            children.entry(parent).or_default().push(snapshot.pid);
        }

        let mut tree = ProcessTree::new(0);
        let root_children = children.remove(&0).unwrap_or_default();
        for mut snapshot in scanned {
            if let Some(kids) = children.remove(&snapshot.pid) {
                snapshot.children = kids;
            }
            tree.insert(snapshot);
        }
        tree.insert(
            ProcessSnapshot::new(0, "swapper")
                .with_state(TaskState::Running)
                .with_priorities(PRIO_BASE, PRIO_BASE, PRIO_BASE)
                .with_children(root_children),
        );
        Ok(tree)
    }

    fn read_snapshot(&self, pid: Pid) -> SnapshotResult<ProcessSnapshot> {
        let stat_path = self.proc_root.join(pid.to_string()).join("stat");
        let stat = fs::read_to_string(&stat_path)
            .map_err(|e| SnapshotError::Io(format!("{}: {}", stat_path.display(), e)))?;
        let mut snapshot = parse_stat(pid, &stat)?;
        if snapshot.mm.is_some() {
            if let Some((start, end)) = self.read_heap_range(pid) {
                if let Some(mm) = snapshot.mm.as_mut() {
                    mm.heap_start = start;
                    mm.heap_end = end;
                }
            }
        }
        Ok(snapshot)
    }

    /// Heap bounds from the maps report, if readable
    fn read_heap_range(&self, pid: Pid) -> Option<(u64, u64)> {
        let maps_path = self.proc_root.join(pid.to_string()).join("maps");
        let maps = fs::read_to_string(maps_path).ok()?;
        for line in maps.lines() {
            if line.ends_with("[heap]") {
                let range = line.split_whitespace().next()?;
                let (start, end) = range.split_once('-')?;
                let start = u64::from_str_radix(start, 16).ok()?;
                let end = u64::from_str_radix(end, 16).ok()?;
                return Some((start, end));
            }
        }
        None
    }
}

impl Default for HostSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for HostSource {
    fn capture(&self) -> SnapshotResult<ProcessTree> {
        self.scan()
    }

    fn resolve(&self, pid: Pid) -> bool {
        pid != 0 && self.proc_root.join(pid.to_string()).is_dir()
    }

    fn deliver(&self, pid: Pid, signum: Signum) -> SignalResult<()> {
        // Pid 0 is the synthetic root; passed through it would address the
        // caller's own process group. Same guard for pids beyond the host range.
        if pid == 0 || pid > i32::MAX as Pid {
            return Err(SignalError::ProcessNotFound(pid));
        }

        #[cfg(unix)]
        {
            let target = NixPid::from_raw(pid as i32);
            let sig = if signum == 0 {
                // Liveness probe, nothing is sent
                None
            } else {
                let signal = Signal::from_number(signum)?;
                match NixSignal::try_from(signal.number() as i32) {
                    Ok(nix_signal) => Some(nix_signal),
                    Err(_) => return Err(SignalError::InvalidSignal(signum)),
                }
            };
            match kill(target, sig) {
                Ok(()) => Ok(()),
                Err(nix::errno::Errno::ESRCH) => Err(SignalError::ProcessNotFound(pid)),
                Err(nix::errno::Errno::EPERM) => Err(SignalError::PermissionDenied(format!(
                    "signaling pid {} refused by host",
                    pid
                ))),
                Err(errno) => Err(SignalError::DeliveryFailed(format!(
                    "pid {}: {}",
                    pid, errno
                ))),
            }
        }

        #[cfg(not(unix))]
        {
            let _ = signum;
            Err(SignalError::DeliveryFailed(
                "signal delivery not supported on this platform".to_string(),
            ))
        }
    }

    fn name(&self) -> &str {
        "host"
    }
}

/// Parse one stat record into a snapshot
///
/// The command name sits between the first `(` and the last `)`; the
/// whitespace-separated fields after it start with the state character.
/// A zero vsize marks a kernel thread, which owns no address space.
fn parse_stat(pid: Pid, stat: &str) -> SnapshotResult<ProcessSnapshot> {
    let open = match stat.find('(') {
        Some(index) => index,
        None => return Err(malformed(pid, "missing comm")),
    };
    let close = match stat.rfind(')') {
        Some(index) if index > open => index,
        _ => return Err(malformed(pid, "missing comm")),
    };
    let comm = stat[open + 1..close].to_string();
    let rest: Vec<&str> = stat[close + 1..].split_whitespace().collect();
    if rest.len() < 21 {
        return Err(malformed(pid, "truncated record"));
    }

    let state = match rest[0] {
        "R" => TaskState::Running,
        "S" => TaskState::Interruptible,
        "D" => TaskState::Uninterruptible,
        "T" => TaskState::Stopped,
        "t" => TaskState::Traced,
        _ => TaskState::Unknown,
    };
    let ppid: Pid = parse_field(pid, rest[1], "ppid")?;
    let prio: i32 = parse_field(pid, rest[15], "priority")?;
    let nice: i32 = parse_field(pid, rest[16], "nice")?;
    let start_time: u64 = parse_field(pid, rest[19], "starttime")?;
    let vsize: u64 = parse_field(pid, rest[20], "vsize")?;

    let mm = if vsize == 0 {
        None
    } else {
        let code_start = rest.get(23).and_then(|f| f.parse().ok()).unwrap_or(0);
        let code_end = rest.get(24).and_then(|f| f.parse().ok()).unwrap_or(0);
        // Fallback when the maps report is unreadable: an empty range at the
        // heap base from the stat record
        let start_brk = rest.get(44).and_then(|f| f.parse().ok()).unwrap_or(0);
        Some(AddressSpace {
            task_size: vsize,
            code_start,
            code_end,
            heap_start: start_brk,
            heap_end: start_brk,
        })
    };

    Ok(ProcessSnapshot {
        pid,
        ppid,
        comm,
        state,
        prio,
        static_prio: PRIO_BASE + nice,
        normal_prio: prio,
        start_time,
        mm,
        children: Vec::new(),
    })
}

fn malformed(pid: Pid, what: &str) -> SnapshotError {
    SnapshotError::Malformed(format!("pid {}: {}", pid, what))
}

fn parse_field<T: std::str::FromStr>(pid: Pid, field: &str, what: &str) -> SnapshotResult<T> {
    field.parse().map_err(|_| malformed(pid, what))
}
