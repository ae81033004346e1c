/*!
 * Status Rendering
 * Fixed-layout text for per-process status files
 */

use crate::process::types::ProcessSnapshot;
use std::fmt::Write as _;

/// Fixed capacity of a status file's content
pub const STATUS_FILE_CAPACITY: usize = 500;

/// Render the status block for one snapshot
///
/// Pure and deterministic: the same snapshot always yields the same bytes.
/// A process without an address space renders an explicit `(none)` marker.
/// Output beyond the file capacity is truncated at a char boundary.
#[must_use]
pub fn render_status(process: &ProcessSnapshot) -> String {
    let mut out = String::with_capacity(256);
    let _ = writeln!(out, "Process: {}", process.comm);
    let _ = writeln!(out, "Pid: {}", process.pid);
    let _ = writeln!(out, "State: {}", process.state.name());
    let _ = writeln!(out, "Prio: {}", process.prio);
    let _ = writeln!(out, "StaticPrio: {}", process.static_prio);
    let _ = writeln!(out, "NormalPrio: {}", process.normal_prio);
    let _ = writeln!(out, "StartTime: {}", process.start_time);
    match process.mm {
        Some(mm) => {
            let _ = writeln!(out, "Mm:");
            let _ = writeln!(out, "  TaskSize: {:016x}", mm.task_size);
            let _ = writeln!(out, "  Code: {:016x}-{:016x}", mm.code_start, mm.code_end);
            let _ = writeln!(out, "  Heap: {:016x}-{:016x}", mm.heap_start, mm.heap_end);
        }
        None => {
            let _ = writeln!(out, "Mm: (none)");
        }
    }
    truncate_to_capacity(out)
}

/// Truncate to the file capacity without splitting a char
fn truncate_to_capacity(mut text: String) -> String {
    if text.len() <= STATUS_FILE_CAPACITY {
        return text;
    }
    let mut cut = STATUS_FILE_CAPACITY;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}
