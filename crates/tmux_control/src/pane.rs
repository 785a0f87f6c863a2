use std::fmt;
use std::str::FromStr;

use crate::error::MuxError;

/// Address of one pane: `session:window.pane`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneHandle {
    session: String,
    window: String,
    pane: String,
}

impl PaneHandle {
    pub fn new(
        session: impl Into<String>,
        window: impl Into<String>,
        pane: impl Into<String>,
    ) -> Self {
        Self {
            session: session.into(),
            window: window.into(),
            pane: pane.into(),
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn window(&self) -> &str {
        &self.window
    }

    pub fn pane(&self) -> &str {
        &self.pane
    }

    /// Target string for `tmux -t`.
    pub fn target(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PaneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.session, self.window, self.pane)
    }
}

impl FromStr for PaneHandle {
    type Err = MuxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MuxError::InvalidPane(s.to_string());
        let (session, rest) = s.split_once(':').ok_or_else(invalid)?;
        let (window, pane) = rest.rsplit_once('.').ok_or_else(invalid)?;
        if session.is_empty() || window.is_empty() || pane.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(session, window, pane))
    }
}
