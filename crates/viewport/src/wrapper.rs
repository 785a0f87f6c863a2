use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tmux_control::shell_quote;

use crate::settings::RemoteHost;

/// Text shown whenever the viewport has nothing else to display.
pub const IDLE_BANNER: &str = "[ VIEWPORT READY ]";

const SESSION_ENDED_PAUSE_SECS: u32 = 2;

/// A short bash script that runs one remote session and then restores the idle banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperScript {
    file_name: &'static str,
    body: String,
}

impl WrapperScript {
    pub fn brain(host: &RemoteHost) -> Self {
        let destination = format!("{}@{}", host.user, host.address);
        let remote = format!(
            "ssh -i {} -o StrictHostKeyChecking=no {}",
            shell_quote(&host.key_path),
            shell_quote(&destination)
        );
        Self::wrapping("oopuo_ssh_brain.sh", &remote, "[ SSH Session Ended ]")
    }

    pub fn guard(container_id: &str) -> Self {
        let remote = format!("pct enter {}", shell_quote(container_id));
        Self::wrapping("oopuo_guard.sh", &remote, "[ Container Session Ended ]")
    }

    fn wrapping(file_name: &'static str, remote: &str, ended: &str) -> Self {
        let body = format!(
            "#!/bin/bash\n{remote}\necho ''\necho {ended}\nsleep {pause}\nclear\necho {banner}\n",
            ended = shell_quote(ended),
            pause = SESSION_ENDED_PAUSE_SECS,
            banner = shell_quote(IDLE_BANNER),
        );
        Self { file_name, body }
    }

    pub fn file_name(&self) -> &str {
        self.file_name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Write the script into `dir` with mode 0755 and return its path.
    ///
    /// The script is written to a fresh temp file and renamed into place, so whatever already
    /// sits at the target path (a symlink included) is replaced, never written through.
    pub fn install(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(self.file_name);
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(self.body.as_bytes())?;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))?;
        staged.persist(&path).map_err(|err| err.error)?;
        Ok(path)
    }

    /// The script body as one command line, for when it cannot be written to disk.
    pub fn inline(&self) -> String {
        self.body
            .lines()
            .filter(|line| !line.starts_with("#!"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Command line that runs an installed script.
    pub fn invocation(path: &Path) -> String {
        format!("bash {}", shell_quote(&path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn host() -> RemoteHost {
        RemoteHost {
            address: "10.0.0.5".to_string(),
            user: "adminuser".to_string(),
            key_path: "/root/oopuo_vault/oopuo_key".to_string(),
        }
    }

    #[test]
    fn brain_script_runs_ssh_then_restores_banner() {
        let script = WrapperScript::brain(&host());
        let lines: Vec<&str> = script.body().lines().collect();
        assert_eq!(
            lines,
            vec![
                "#!/bin/bash",
                "ssh -i /root/oopuo_vault/oopuo_key -o StrictHostKeyChecking=no adminuser@10.0.0.5",
                "echo ''",
                "echo '[ SSH Session Ended ]'",
                "sleep 2",
                "clear",
                "echo '[ VIEWPORT READY ]'",
            ]
        );
    }

    #[test]
    fn inline_form_chains_the_script_without_shebang() {
        let inline = WrapperScript::guard("100").inline();
        assert_eq!(
            inline,
            "pct enter 100; echo ''; echo '[ Container Session Ended ]'; sleep 2; clear; echo '[ VIEWPORT READY ]'"
        );
    }

    #[test]
    fn guard_script_enters_container() {
        let script = WrapperScript::guard("100");
        assert!(script.body().contains("\npct enter 100\n"));
        assert_eq!(script.file_name(), "oopuo_guard.sh");
    }

    #[test]
    fn install_writes_executable_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = WrapperScript::guard("101").install(dir.path()).expect("install");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        let invocation = WrapperScript::invocation(&path);
        assert!(invocation.starts_with("bash "), "{invocation}");
        assert!(invocation.contains("oopuo_guard.sh"), "{invocation}");
    }

    #[test]
    fn install_replaces_planted_symlink_without_touching_its_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let victim = dir.path().join("victim.conf");
        fs::write(&victim, "precious").expect("write victim");
        fs::set_permissions(&victim, fs::Permissions::from_mode(0o600)).expect("chmod victim");
        std::os::unix::fs::symlink(&victim, dir.path().join("oopuo_guard.sh")).expect("symlink");

        let path = WrapperScript::guard("100").install(dir.path()).expect("install");

        assert_eq!(fs::read_to_string(&victim).expect("read victim"), "precious");
        let victim_mode = fs::metadata(&victim).expect("metadata").permissions().mode();
        assert_eq!(victim_mode & 0o777, 0o600);
        let installed = fs::symlink_metadata(&path).expect("symlink_metadata");
        assert!(installed.file_type().is_file());
        assert!(fs::read_to_string(&path).expect("read script").contains("pct enter 100"));
    }

    #[test]
    fn install_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        WrapperScript::brain(&host()).install(dir.path()).expect("install");
        WrapperScript::brain(&host()).install(dir.path()).expect("reinstall");

        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["oopuo_ssh_brain.sh".to_string()]);
    }
}
