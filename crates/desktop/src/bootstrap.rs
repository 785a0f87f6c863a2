use std::thread;

use tmux_control::{MuxError, TmuxRunner};
use tracing::{info, warn};

use crate::plan::{DesktopPlan, PaneRole};

/// Global options applied to the desktop server.
const SESSION_OPTIONS: [&[&str]; 7] = [
    &["set-option", "-g", "status", "off"],
    &["set-option", "-g", "mouse", "off"],
    &["set-option", "-g", "pane-border-style", "fg=colour240"],
    &["set-option", "-g", "pane-active-border-style", "fg=colour51"],
    &["set-option", "-g", "focus-events", "on"],
    &["set-option", "-g", "history-limit", "10000"],
    &["set-option", "-sg", "escape-time", "0"],
];

/// Builds the four-pane desktop session and starts a program in each pane.
pub struct Bootstrap<R> {
    runner: R,
    plan: DesktopPlan,
}

impl<R: TmuxRunner> Bootstrap<R> {
    pub fn new(runner: R, plan: DesktopPlan) -> Self {
        Self { runner, plan }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn plan(&self) -> &DesktopPlan {
        &self.plan
    }

    /// Replace any previous session, then lay out, configure and populate a fresh one.
    ///
    /// Only failures that leave no usable layout are returned; option, binding and launch
    /// failures are logged.
    pub fn run(&mut self) -> Result<(), MuxError> {
        info!(target: "desktop", session = %self.plan.session, "bootstrap started");
        self.replace_existing_session();
        self.create_layout()?;
        self.apply_options();
        self.bind_keys();
        self.launch_panes();
        info!(target: "desktop", session = %self.plan.session, "bootstrap complete");
        Ok(())
    }

    fn replace_existing_session(&mut self) {
        let session = self.plan.session.clone();
        if self.runner.run(&["has-session", "-t", &session]).is_err() {
            return;
        }
        info!(target: "desktop", %session, "existing session found; killing it");
        self.best_effort(&["kill-session", "-t", &session]);
        if !self.plan.kill_settle.is_zero() {
            thread::sleep(self.plan.kill_settle);
        }
    }

    fn create_layout(&mut self) -> Result<(), MuxError> {
        let session = self.plan.session.clone();
        let header = self.plan.pane(PaneRole::Header).target();
        let sidebar = self.plan.pane(PaneRole::Sidebar).target();
        let main = self.plan.pane(PaneRole::Main).target();

        self.runner
            .run(&["new-session", "-d", "-s", &session, "-n", "oopuo"])?;
        self.runner
            .run(&["split-window", "-v", "-p", "90", "-t", &header])?;
        self.runner
            .run(&["split-window", "-h", "-p", "75", "-t", &sidebar])?;
        self.runner
            .run(&["split-window", "-v", "-p", "20", "-t", &main])?;

        for role in PaneRole::ALL {
            let target = self.plan.pane(role).target();
            self.best_effort(&["select-pane", "-t", &target, "-T", role.title()]);
        }
        Ok(())
    }

    fn apply_options(&mut self) {
        for option in SESSION_OPTIONS {
            self.best_effort(option);
        }
    }

    fn bind_keys(&mut self) {
        let sidebar = self.plan.pane(PaneRole::Sidebar).target();
        let main = self.plan.pane(PaneRole::Main).target();
        self.best_effort(&["bind-key", "-n", "F10", "select-pane", "-t", &sidebar]);
        self.best_effort(&["bind-key", "-n", "C-Left", "select-pane", "-t", &sidebar]);
        self.best_effort(&["bind-key", "-n", "C-Right", "select-pane", "-t", &main]);
        self.best_effort(&["unbind-key", "C-b"]);
        self.best_effort(&["set-option", "-g", "prefix", "C-a"]);
    }

    fn launch_panes(&mut self) {
        for role in PaneRole::ALL {
            let target = self.plan.pane(role).target();
            let line = self.plan.launch_line(role);
            self.best_effort(&["send-keys", "-t", &target, &line, "Enter"]);
        }
    }

    fn best_effort(&mut self, args: &[&str]) {
        if let Err(err) = self.runner.run(args) {
            warn!(target: "desktop", command = %args.join(" "), error = %err, "tmux command failed");
        }
    }
}
