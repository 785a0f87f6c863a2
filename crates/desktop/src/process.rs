use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

/// Start `command_line` through `sh -c` in its own process group with all stdio detached.
///
/// Returns the child's pid. The child is not waited on.
pub fn spawn_detached(command_line: &str) -> io::Result<u32> {
    let child = Command::new("sh")
        .args(["-c", command_line])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()?;
    Ok(child.id())
}

/// `tmux attach-session` for `session`, ready to replace the current process.
pub fn attach_command(session: &str) -> Command {
    let mut command = Command::new("tmux");
    command.args(["attach-session", "-t", session]);
    command
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::time::{Duration, Instant};

    use super::{attach_command, spawn_detached};

    #[test]
    fn attach_targets_session() {
        let command = attach_command("oopuo-desktop");
        assert_eq!(command.get_program(), OsStr::new("tmux"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, ["attach-session", "-t", "oopuo-desktop"]);
    }

    #[test]
    fn spawned_child_runs_independently() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join("ran");
        let pid = spawn_detached(&format!("touch '{}'", marker.display())).expect("spawn");
        assert!(pid > 0);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !marker.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(marker.exists());
    }
}
