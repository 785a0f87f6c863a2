use std::collections::HashSet;
use std::fs;
use std::ops::ControlFlow;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use command_bus::{
    BusError, Command, CommandBus, CommandChannel, EnsureOutcome, FifoChannel,
    ATOMIC_WRITE_LIMIT,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fresh_channel() -> (TempDir, FifoChannel) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let channel = FifoChannel::new(dir.path().join("cmd"));
    channel.ensure().expect("endpoint should be created");
    (dir, channel)
}

fn is_fifo(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_fifo())
        .unwrap_or(false)
}

fn send_until_attached(channel: &FifoChannel, line: &str) {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        match channel.send_line(line) {
            Ok(()) => return,
            Err(err) if err.is_no_reader() && Instant::now() < deadline => {
                thread::sleep(Duration::from_millis(5));
            }
            Err(err) => panic!("send failed: {err}"),
        }
    }
}

#[test]
fn ensure_creates_endpoint_then_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path: PathBuf = dir.path().join("cmd");
    let channel = FifoChannel::new(&path);

    assert_eq!(channel.ensure().expect("create"), EnsureOutcome::Created);
    let before = fs::symlink_metadata(&path).expect("metadata");

    for _ in 0..3 {
        assert_eq!(channel.ensure().expect("repeat"), EnsureOutcome::Existing);
    }
    let after = fs::symlink_metadata(&path).expect("metadata");

    assert!(is_fifo(&path));
    assert_eq!(before.ino(), after.ino());
    assert_eq!(before.mode(), after.mode());
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 1);
}

#[test]
fn ensure_replaces_regular_file_and_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cmd");

    fs::write(&path, "stale").expect("write stale file");
    let channel = FifoChannel::new(&path);
    assert_eq!(channel.ensure().expect("replace file"), EnsureOutcome::Replaced);
    assert!(is_fifo(&path));

    fs::remove_file(&path).expect("remove fifo");
    fs::create_dir(&path).expect("create dir");
    fs::write(path.join("inner"), "x").expect("populate dir");
    assert_eq!(channel.ensure().expect("replace dir"), EnsureOutcome::Replaced);
    assert!(is_fifo(&path));
}

#[test]
fn ensure_reports_unwritable_parent() {
    let channel = FifoChannel::new("/nonexistent-oopuo-dir/cmd");
    let err = channel.ensure().expect_err("parent does not exist");
    assert!(matches!(err, BusError::Io { .. }), "{err:?}");
}

#[test]
fn send_without_reader_fails_fast() {
    let (_dir, channel) = fresh_channel();

    let start = Instant::now();
    let err = channel.send_line("SHOW_LOGS").expect_err("no reader attached");
    let elapsed = start.elapsed();

    assert!(err.is_no_reader(), "{err:?}");
    assert!(elapsed < Duration::from_millis(50), "send blocked for {elapsed:?}");
}

#[test]
fn send_to_missing_endpoint_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let channel = FifoChannel::new(dir.path().join("missing"));
    let err = channel.send_line("EXIT").expect_err("endpoint absent");
    assert!(matches!(err, BusError::Io { .. }), "{err:?}");
}

#[test]
fn oversized_line_is_rejected_before_opening() {
    let (_dir, channel) = fresh_channel();
    let line = "X".repeat(ATOMIC_WRITE_LIMIT);
    let err = channel.send_line(&line).expect_err("too long");
    assert!(matches!(err, BusError::LineTooLong { .. }), "{err:?}");
}

#[test]
fn reader_drops_oversized_foreign_lines_and_keeps_going() {
    use std::io::Write;

    let (dir, channel) = fresh_channel();
    let mut reader = channel.open_reader().expect("reader");
    let mut foreign = fs::OpenOptions::new()
        .write(true)
        .open(dir.path().join("cmd"))
        .expect("open endpoint for write");

    let flood = "X".repeat(ATOMIC_WRITE_LIMIT * 8);
    foreign
        .write_all(format!("{flood}\nSHOW_LOGS\n").as_bytes())
        .expect("write flood");

    assert_eq!(reader.read_line().expect("read").as_deref(), Some("SHOW_LOGS\n"));
}

#[test]
fn line_at_the_limit_is_still_delivered() {
    let (_dir, channel) = fresh_channel();
    let mut reader = channel.open_reader().expect("reader");
    let line = "Y".repeat(ATOMIC_WRITE_LIMIT - 1);

    channel.send_line(&line).expect("send");

    assert_eq!(reader.read_line().expect("read"), Some(format!("{line}\n")));
}

#[test]
fn single_writer_order_is_preserved() {
    let (_dir, channel) = fresh_channel();
    let mut reader = channel.open_reader().expect("reader");

    channel.send_line("A").expect("send A");
    channel.send_line("B").expect("send B");

    assert_eq!(reader.read_line().expect("read").as_deref(), Some("A\n"));
    assert_eq!(reader.read_line().expect("read").as_deref(), Some("B\n"));
}

#[test]
fn listen_over_fifo_dispatches_until_exit() {
    let (_dir, channel) = fresh_channel();
    let bus = CommandBus::new(channel.clone()).with_backoff(Duration::from_millis(10));

    let writer = thread::spawn(move || {
        send_until_attached(&channel, Command::ShowDashboard.as_str());
        let bus = CommandBus::new(channel);
        bus.send(Command::ShowLogs).expect("send logs");
        bus.send(Command::Exit).expect("send exit");
    });

    let mut seen = Vec::new();
    bus.listen(|line| {
        seen.push(line.to_string());
        if line == Command::Exit.as_str() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .expect("listen");
    writer.join().expect("writer thread");

    assert_eq!(seen, vec!["SHOW_DASHBOARD", "SHOW_LOGS", "EXIT"]);
}

#[test]
fn concurrent_writers_never_corrupt_framing() {
    const WRITERS: usize = 8;
    const ROUNDS: usize = 50;

    let (_dir, channel) = fresh_channel();
    let mut reader = channel.open_reader().expect("reader");

    let sent: HashSet<String> = (0..WRITERS)
        .map(|idx| format!("WRITER_{idx}_{}", "Z".repeat(64 + idx)))
        .collect();

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = sent
        .iter()
        .cloned()
        .map(|line| {
            let channel = channel.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut delivered = 0;
                for _ in 0..ROUNDS {
                    match channel.send_line(&line) {
                        Ok(()) => delivered += 1,
                        // A full pipe drops the command, which is allowed; corruption is not.
                        Err(BusError::Io { source, .. })
                            if source.kind() == std::io::ErrorKind::WouldBlock => {}
                        Err(err) => panic!("unexpected send error: {err}"),
                    }
                }
                delivered
            })
        })
        .collect();

    let mut expected = 0;
    for handle in handles {
        expected += handle.join().expect("writer thread");
    }

    for _ in 0..expected {
        let line = reader
            .read_line()
            .expect("read")
            .expect("reader never sees EOF");
        let line = line.trim_end_matches('\n');
        assert!(sent.contains(line), "corrupted line received: {line:?}");
    }
}
