/*!
 * Task Filesystem Tests
 * End-to-end tests for activation, reads, writes and lifecycle
 */

use proptest::prelude::*;
use std::path::Path;
use std::sync::Arc;
use taskfs::process::{AddressSpace, StaticSource};
use taskfs::vfs::{VfsError, WRITE_CHUNK_CAPACITY};
use taskfs::{FileSystem, ProcessSnapshot, ProcessTree, TaskFs, TaskState};

/// Tree used across tests: swapper(0) -> { init(1) -> worker(7), kthread(9) }
fn fixture_tree() -> ProcessTree {
    let mut tree = ProcessTree::new(0);
    tree.insert(ProcessSnapshot::new(0, "swapper").with_children(vec![1, 9]));
    tree.insert(
        ProcessSnapshot::new(1, "init")
            .with_parent(0)
            .with_state(TaskState::Interruptible)
            .with_start_time(100)
            .with_children(vec![7]),
    );
    tree.insert(
        ProcessSnapshot::new(7, "worker")
            .with_parent(1)
            .with_state(TaskState::Running)
            .with_priorities(120, 125, 120)
            .with_start_time(4242)
            .with_mm(AddressSpace {
                task_size: 0x7ffffffff000,
                code_start: 0x400000,
                code_end: 0x452000,
                heap_start: 0x1200000,
                heap_end: 0x1263000,
            }),
    );
    tree.insert(
        ProcessSnapshot::new(9, "kthread")
            .with_parent(0)
            .with_state(TaskState::Uninterruptible),
    );
    tree
}

fn activated_fs() -> (Arc<StaticSource>, TaskFs) {
    let source = Arc::new(StaticSource::new(fixture_tree()));
    let fs = TaskFs::new(Arc::clone(&source) as Arc<dyn taskfs::SnapshotSource>);
    fs.activate().unwrap();
    (source, fs)
}

// ============================================
// Activation and Layout
// ============================================

#[test]
fn test_empty_before_activation() {
    let source = Arc::new(StaticSource::new(fixture_tree()));
    let fs = TaskFs::new(source);

    assert!(!fs.exists(Path::new("/")));
    assert!(!fs.exists(Path::new("/0")));
    assert!(fs.read(Path::new("/0/0.status")).is_err());
    assert!(fs.last_report().is_none());
}

#[test]
fn test_activation_builds_the_whole_tree() {
    let (_, fs) = activated_fs();

    let report = fs.last_report().unwrap();
    assert_eq!(report.built, 4);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.depth_pruned, 0);

    // Every process directory, nested parent over child
    for path in [
        "/0",
        "/0/0.status",
        "/0/signal",
        "/0/1",
        "/0/1/1.status",
        "/0/1/signal",
        "/0/1/7",
        "/0/1/7/7.status",
        "/0/1/7/signal",
        "/0/9",
        "/0/9/9.status",
        "/0/9/signal",
    ] {
        assert!(fs.exists(Path::new(path)), "missing {path}");
    }
}

#[test]
fn test_list_dir_is_sorted_and_complete() {
    let (_, fs) = activated_fs();

    let root = fs.list_dir(Path::new("/")).unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].name, "0");
    assert!(root[0].is_dir());

    let names: Vec<String> = fs
        .list_dir(Path::new("/0"))
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["0.status", "1", "9", "signal"]);

    // Listing a file is an error
    assert!(matches!(
        fs.list_dir(Path::new("/0/signal")),
        Err(VfsError::NotADirectory(_))
    ));
    assert!(matches!(
        fs.list_dir(Path::new("/0/404")),
        Err(VfsError::NotFound(_))
    ));
}

#[test]
fn test_metadata_reflects_node_shape() {
    let (_, fs) = activated_fs();

    let dir = fs.metadata(Path::new("/0/1")).unwrap();
    assert!(dir.is_dir());
    assert_eq!(dir.size, 0);

    let status = fs.metadata(Path::new("/0/1/1.status")).unwrap();
    assert!(status.is_file());
    assert_eq!(
        status.size,
        fs.read(Path::new("/0/1/1.status")).unwrap().len() as u64
    );

    let signal = fs.metadata(Path::new("/0/1/signal")).unwrap();
    assert!(signal.is_file());
    assert_eq!(signal.size, 0);

    assert!(fs.metadata(Path::new("/0/404")).is_err());
}

#[test]
fn test_every_node_answers_read_and_metadata() {
    let (_, fs) = activated_fs();

    for dir in ["/", "/0", "/0/1", "/0/1/7", "/0/9"] {
        let meta = fs.metadata(Path::new(dir)).unwrap();
        assert!(meta.is_dir(), "{dir} should be a directory");
        assert!(matches!(
            fs.read(Path::new(dir)),
            Err(VfsError::IsADirectory(_))
        ));
    }

    for file in [
        "/0/0.status",
        "/0/signal",
        "/0/1/1.status",
        "/0/1/signal",
        "/0/1/7/7.status",
        "/0/1/7/signal",
        "/0/9/9.status",
        "/0/9/signal",
    ] {
        let meta = fs.metadata(Path::new(file)).unwrap();
        assert!(meta.is_file(), "{file} should be a file");
        let data = fs.read(Path::new(file)).unwrap();
        assert_eq!(data.len() as u64, meta.size, "size mismatch for {file}");
    }
}

#[test]
fn test_missing_child_snapshot_skips_subtree() {
    let mut tree = ProcessTree::new(0);
    tree.insert(ProcessSnapshot::new(0, "swapper").with_children(vec![1, 2]));
    tree.insert(ProcessSnapshot::new(1, "init").with_parent(0));
    // Pid 2 has no record

    let fs = TaskFs::new(Arc::new(StaticSource::new(tree)));
    let report = fs.activate().unwrap();

    assert_eq!(report.built, 2);
    assert_eq!(report.skipped, 1);
    assert!(fs.exists(Path::new("/0/1")));
    assert!(!fs.exists(Path::new("/0/2")));
}

#[test]
fn test_filesystem_identity() {
    let (_, fs) = activated_fs();
    assert_eq!(fs.name(), "taskfs");
    assert!(!fs.readonly());
}

// ============================================
// Status Files
// ============================================

#[test]
fn test_status_content_with_address_space() {
    let (_, fs) = activated_fs();

    let data = fs.read(Path::new("/0/1/7/7.status")).unwrap();
    let text = String::from_utf8(data).unwrap();
    let expected = "Process: worker\n\
                    Pid: 7\n\
                    State: TASK_RUNNING\n\
                    Prio: 120\n\
                    StaticPrio: 125\n\
                    NormalPrio: 120\n\
                    StartTime: 4242\n\
                    Mm:\n\
                    \x20\x20TaskSize: 00007ffffffff000\n\
                    \x20\x20Code: 0000000000400000-0000000000452000\n\
                    \x20\x20Heap: 0000000001200000-0000000001263000\n";
    assert_eq!(text, expected);
}

#[test]
fn test_status_content_without_address_space() {
    let (_, fs) = activated_fs();

    let data = fs.read(Path::new("/0/9/9.status")).unwrap();
    let text = String::from_utf8(data).unwrap();
    assert!(text.contains("Process: kthread\n"));
    assert!(text.contains("State: TASK_UNINTERRUPTIBLE\n"));
    assert!(text.contains("Mm: (none)\n"));
    assert!(!text.contains("TaskSize"));
}

#[test]
fn test_reads_stay_stable_after_live_changes() {
    let (source, fs) = activated_fs();

    let before = fs.read(Path::new("/0/9/9.status")).unwrap();
    // Pid 9 exits after the snapshot
    source.retire(9);
    let after = fs.read(Path::new("/0/9/9.status")).unwrap();

    assert_eq!(before, after);
    assert!(fs.exists(Path::new("/0/9")));
}

#[test]
fn test_read_on_directory_is_rejected() {
    let (_, fs) = activated_fs();
    assert!(matches!(
        fs.read(Path::new("/0/1")),
        Err(VfsError::IsADirectory(_))
    ));
}

// ============================================
// Positioned Reads
// ============================================

#[test]
fn test_read_at_slices_content() {
    let (_, fs) = activated_fs();
    let path = Path::new("/0/1/1.status");
    let full = fs.read(path).unwrap();

    // First bytes
    let mut buf = [0u8; 12];
    let count = fs.read_at(path, &mut buf, 0).unwrap();
    assert_eq!(count, 12);
    assert_eq!(&buf[..count], &full[..12]);

    // Middle slice
    let count = fs.read_at(path, &mut buf, 4).unwrap();
    assert_eq!(&buf[..count], &full[4..4 + count]);

    // Tail shorter than the buffer
    let offset = full.len() as u64 - 3;
    let count = fs.read_at(path, &mut buf, offset).unwrap();
    assert_eq!(count, 3);
    assert_eq!(&buf[..3], &full[full.len() - 3..]);
}

#[test]
fn test_read_at_past_end_returns_zero() {
    let (_, fs) = activated_fs();
    let path = Path::new("/0/1/1.status");
    let len = fs.read(path).unwrap().len() as u64;

    let mut buf = [0u8; 8];
    assert_eq!(fs.read_at(path, &mut buf, len).unwrap(), 0);
    assert_eq!(fs.read_at(path, &mut buf, len + 100).unwrap(), 0);

    // Empty signal file reads 0 from the start
    assert_eq!(fs.read_at(Path::new("/0/signal"), &mut buf, 0).unwrap(), 0);
}

proptest! {
    /// A positioned read always matches the same slice of the full content
    #[test]
    fn prop_read_at_matches_full_read(offset in 0u64..600, size in 0usize..64) {
        let (_, fs) = activated_fs();
        let path = Path::new("/0/1/7/7.status");
        let full = fs.read(path).unwrap();

        let mut buf = vec![0u8; size];
        let count = fs.read_at(path, &mut buf, offset).unwrap();

        if offset >= full.len() as u64 {
            prop_assert_eq!(count, 0);
        } else {
            let start = offset as usize;
            let expected = size.min(full.len() - start);
            prop_assert_eq!(count, expected);
            prop_assert_eq!(&buf[..count], &full[start..start + count]);
        }
    }
}

// ============================================
// Writes
// ============================================

#[test]
fn test_signal_write_updates_buffer_and_delivers() {
    let (source, fs) = activated_fs();
    let path = Path::new("/0/1/signal");

    let written = fs.write_at(path, b"9\n", 0).unwrap();
    assert_eq!(written, 2);
    assert_eq!(fs.read(path).unwrap(), b"9\n");
    assert_eq!(source.delivered(), vec![(1, 9)]);

    // A later write replaces the buffer outright
    fs.write_at(path, b"15\n", 0).unwrap();
    assert_eq!(fs.read(path).unwrap(), b"15\n");
    assert_eq!(source.delivered(), vec![(1, 9), (1, 15)]);
}

#[test]
fn test_write_at_nonzero_offset_is_rejected() {
    let (source, fs) = activated_fs();

    let result = fs.write_at(Path::new("/0/1/signal"), b"9\n", 1);
    assert!(matches!(result, Err(VfsError::InvalidArgument(_))));
    assert!(source.delivered().is_empty());
    // Buffer untouched
    assert_eq!(fs.read(Path::new("/0/1/signal")).unwrap(), b"");
}

#[test]
fn test_write_capacity_boundary() {
    let (_, fs) = activated_fs();
    let path = Path::new("/0/1/1.status");

    // One under the limit goes through
    let fits = vec![b'x'; WRITE_CHUNK_CAPACITY - 1];
    assert_eq!(fs.write_at(path, &fits, 0).unwrap(), fits.len());
    assert_eq!(fs.read(path).unwrap(), fits);

    // At the limit is rejected and the buffer keeps its content
    let full = vec![b'y'; WRITE_CHUNK_CAPACITY];
    assert!(matches!(
        fs.write_at(path, &full, 0),
        Err(VfsError::InvalidArgument(_))
    ));
    assert_eq!(fs.read(path).unwrap(), fits);
}

#[test]
fn test_status_write_does_not_dispatch() {
    let (source, fs) = activated_fs();

    fs.write_at(Path::new("/0/1/1.status"), b"9\n", 0).unwrap();
    assert_eq!(fs.read(Path::new("/0/1/1.status")).unwrap(), b"9\n");
    assert!(source.delivered().is_empty());
}

#[test]
fn test_write_on_directory_is_rejected() {
    let (_, fs) = activated_fs();
    assert!(matches!(
        fs.write_at(Path::new("/0/1"), b"9\n", 0),
        Err(VfsError::IsADirectory(_))
    ));
}

// ============================================
// Lifecycle
// ============================================

#[test]
fn test_deactivate_releases_the_namespace() {
    let (_, fs) = activated_fs();

    fs.deactivate();
    assert!(!fs.exists(Path::new("/")));
    assert!(!fs.exists(Path::new("/0/1/signal")));
    assert!(fs.read(Path::new("/0/0.status")).is_err());
    assert!(fs.last_report().is_none());
}

#[test]
fn test_reactivation_rebuilds_fresh_buffers() {
    let (_, fs) = activated_fs();

    fs.write_at(Path::new("/0/1/signal"), b"9\n", 0).unwrap();
    assert_eq!(fs.read(Path::new("/0/1/signal")).unwrap(), b"9\n");

    // A new activation starts from a clean capture
    fs.activate().unwrap();
    assert_eq!(fs.read(Path::new("/0/1/signal")).unwrap(), b"");
    assert_eq!(fs.last_report().unwrap().built, 4);
}

// ============================================
// Path Handling
// ============================================

#[test]
fn test_paths_are_normalized() {
    let (source, fs) = activated_fs();

    assert!(fs.exists(Path::new("/0//1")));
    assert!(fs.exists(Path::new("/0/9/../1/7")));
    assert!(fs.exists(Path::new("0/1/signal")));

    // Dispatch resolves the owning directory from the cleaned path
    fs.write_at(Path::new("/0//1/../1/7/signal"), b"9\n", 0)
        .unwrap();
    assert_eq!(source.delivered(), vec![(7, 9)]);
}
